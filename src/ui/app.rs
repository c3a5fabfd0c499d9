use eframe::{Frame, egui};
use poll_promise::Promise;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::DASHBOARD;
use crate::data::pre_main::LaunchConfig;
use crate::data::{
    BinanceRestClient, ClientSeriesSource, MarketDataClient, MarketDataError, PollingStore,
    SharedClient,
};
use crate::domain::{Selection, Series, SupportedPair, Theme};
use crate::ui::app_state::{ViewEffect, ViewState, apply_selection_event};
use crate::ui::chart_controller::ChartViewController;
use crate::ui::ui_plot_view::EguiPlotBackend;
use crate::ui::utils::setup_custom_visuals;
use crate::utils::app_time::now;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Error types for application operations
#[derive(Debug, Clone)]
pub enum AppError {
    /// The market-data client could not be built; nothing can be fetched
    ClientUnavailable(String),
    /// A snapshot action failed; the displayed series was left untouched
    SnapshotFailed(MarketDataError),
    /// The pair catalog could not be loaded; the launch catalog stays in use
    PairsUnavailable(MarketDataError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ClientUnavailable(msg) => write!(f, "Market data unavailable: {}", msg),
            AppError::SnapshotFailed(e) => write!(f, "Snapshot failed: {}", e),
            AppError::PairsUnavailable(e) => write!(f, "Pair list unavailable: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

pub(super) type SnapshotResult = Result<Series, MarketDataError>;

/// A snapshot fetch and the selection it will be written to.
pub(super) struct PendingSnapshot {
    pub(super) selection: Selection,
    pub(super) promise: Promise<SnapshotResult>,
}

pub struct CandleScopeApp {
    /// Persisted between runs
    pub(super) view: ViewState,

    pub(super) client: Option<SharedClient>,
    pub(super) pairs: Vec<SupportedPair>,
    pub(super) pairs_promise: Option<Promise<Result<Vec<SupportedPair>, MarketDataError>>>,

    pub(super) store: Option<PollingStore<ClientSeriesSource>>,
    pub(super) charts: ChartViewController<EguiPlotBackend>,
    pub(super) snapshot: Option<PendingSnapshot>,

    /// Most recent non-fatal problem, shown in the status bar
    pub(super) last_error: Option<AppError>,
    /// Theme the egui visuals were last set up for
    pub(super) visuals_theme: Option<Theme>,
}

impl CandleScopeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, launch: LaunchConfig) -> Self {
        // Attempt to load the persisted state
        let mut view: ViewState = match cc.storage {
            Some(storage) => match eframe::get_value(storage, eframe::APP_KEY) {
                Some(value) => {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_state_serde {
                        log::info!("Successfully loaded persisted state: {:?}", value);
                    }
                    value
                }
                None => {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_state_serde {
                        log::info!("No persisted view state. Creating anew.");
                    }
                    ViewState::default()
                }
            },
            None => ViewState::default(),
        };

        if let Some(selection) = launch.initial_selection.clone() {
            view.selection = selection;
        }

        // Validate that the selected pair exists in the catalog, or pick the first one
        if !launch
            .catalog
            .iter()
            .any(|p| p.identifier == view.selection.pair)
        {
            if let Some(first) = launch.catalog.first() {
                log::info!(
                    "Selected pair '{}' not offered, defaulting to {}",
                    view.selection.pair,
                    first.identifier
                );
                view.selection = view.selection.with_pair(first.identifier.clone());
            }
        }

        let mut app = Self::with_view(view, launch.catalog.clone());

        match BinanceRestClient::new(&launch.api, launch.catalog) {
            Ok(client) => {
                log::info!("Market data source: {}", client.signature());
                app.attach_client(Arc::new(client));
            }
            Err(e) => {
                log::error!("Failed to create market data client: {}", e);
                app.last_error = Some(AppError::ClientUnavailable(e.to_string()));
            }
        }

        setup_custom_visuals(&cc.egui_ctx, app.view.theme);
        app.visuals_theme = Some(app.view.theme);
        app
    }

    fn with_view(view: ViewState, pairs: Vec<SupportedPair>) -> Self {
        Self {
            view,
            client: None,
            pairs,
            pairs_promise: None,
            store: None,
            charts: ChartViewController::new(EguiPlotBackend::new()),
            snapshot: None,
            last_error: None,
            visuals_theme: None,
        }
    }

    fn attach_client(&mut self, client: SharedClient) {
        self.store = Some(PollingStore::new(
            ClientSeriesSource::new(Arc::clone(&client)),
            Duration::from_millis(DASHBOARD.refresh_interval_ms),
        ));
        self.start_pairs_fetch(Arc::clone(&client));
        self.client = Some(client);
    }

    fn apply_effect(&mut self, effect: ViewEffect) {
        match effect {
            ViewEffect::None => {}
            ViewEffect::SelectionChanged => {
                // A snapshot for the old selection must not land on the new one.
                self.snapshot = None;
            }
            ViewEffect::ThemeChanged => {}
            ViewEffect::Snapshot(action) => self.start_snapshot(action),
        }
    }

    pub(super) fn handle_selection_events(
        &mut self,
        events: Vec<crate::ui::ui_panels::SelectionEvent>,
    ) {
        for event in events {
            let effect = apply_selection_event(&mut self.view, event);
            self.apply_effect(effect);
        }
    }

    fn sync_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_theme != Some(self.view.theme) {
            setup_custom_visuals(ctx, self.view.theme);
            self.visuals_theme = Some(self.view.theme);
        }
    }

    /// Promises don't wake egui, so keep repainting while anything is in flight and
    /// otherwise sleep until the refresh timer is due.
    fn schedule_repaint(&self, ctx: &egui::Context) {
        let busy = self.snapshot.is_some()
            || self.pairs_promise.is_some()
            || self.store.as_ref().is_some_and(|s| s.is_fetching());
        if busy {
            ctx.request_repaint_after(Duration::from_millis(100));
            return;
        }
        if let Some(wait) = self
            .store
            .as_ref()
            .and_then(|s| s.time_until_refresh(now()))
        {
            // Once a second is enough for the status bar's age counter.
            ctx.request_repaint_after(wait.min(Duration::from_secs(1)));
        }
    }
}

impl eframe::App for CandleScopeApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Drop all promise-related state before the runtime goes away
        self.snapshot = None;
        self.pairs_promise = None;
        if let Some(store) = self.store.as_mut() {
            store.stop();
        }
        self.charts.teardown();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.view);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.sync_visuals(ctx);

        self.poll_pairs();
        self.poll_snapshot();
        self.poll_store();

        self.render_top_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);

        self.schedule_repaint(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::wire::TickerSnapshot;
    use crate::domain::{Candle, Timeframe};
    use crate::ui::ui_panels::SelectionEvent;
    use async_trait::async_trait;

    /// Every request fails; the store is seeded through `set_series` instead.
    struct OfflineClient;

    #[async_trait]
    impl MarketDataClient for OfflineClient {
        fn signature(&self) -> &'static str {
            "offline"
        }

        async fn list_supported_pairs(&self) -> Result<Vec<SupportedPair>, MarketDataError> {
            Err(MarketDataError::Network("offline".into()))
        }

        async fn get_candles(
            &self,
            _timeframe: Timeframe,
            _pair: &str,
        ) -> Result<Series, MarketDataError> {
            Err(MarketDataError::Network("offline".into()))
        }

        async fn get_ticker_info(&self, _pair: &str) -> Result<TickerSnapshot, MarketDataError> {
            Err(MarketDataError::Network("offline".into()))
        }
    }

    fn series_at(time: i64) -> Series {
        Series::from_candles(vec![Candle::new(time, 10.0, 12.0, 9.0, 11.0, 3.0)])
    }

    /// App showing one BTCUSDT candle at t=60, with no fetch running.
    fn app_showing_btc() -> CandleScopeApp {
        let mut app = CandleScopeApp::with_view(
            ViewState {
                selection: Selection::new(Timeframe::M1, "BTCUSDT"),
                theme: Theme::Dark,
            },
            vec![SupportedPair::new("BTCUSDT", "₿"), SupportedPair::new("ETHUSDT", "Ξ")],
        );
        let client: SharedClient = Arc::new(OfflineClient);
        let mut store = PollingStore::new(
            ClientSeriesSource::new(client),
            Duration::from_millis(DASHBOARD.refresh_interval_ms),
        );
        let t0 = now();
        store.get_series(&app.view.selection, t0);
        assert!(store.set_series(series_at(60), false, t0));
        app.store = Some(store);
        app
    }

    fn cached_view(app: &CandleScopeApp) -> (u64, i64) {
        let cached = app.store.as_ref().and_then(|s| s.cached()).unwrap();
        (cached.revision, cached.series.candles()[0].time)
    }

    fn pending_snapshot(app: &mut CandleScopeApp) -> poll_promise::Sender<SnapshotResult> {
        let (sender, promise) = Promise::new();
        app.snapshot = Some(PendingSnapshot {
            selection: app.view.selection.clone(),
            promise,
        });
        sender
    }

    #[tokio::test]
    async fn snapshot_overwrites_current_series() {
        let mut app = app_showing_btc();
        let (revision, _) = cached_view(&app);

        pending_snapshot(&mut app).send(Ok(series_at(999)));
        app.poll_snapshot();

        assert!(app.snapshot.is_none());
        assert_eq!(cached_view(&app), (revision + 1, 999));
        assert!(app.store.as_ref().unwrap().cached().unwrap().optimistic);
    }

    #[tokio::test]
    async fn failed_snapshot_leaves_series_untouched() {
        let mut app = app_showing_btc();
        let before = cached_view(&app);

        pending_snapshot(&mut app).send(Err(MarketDataError::Network("reset".into())));
        app.poll_snapshot();

        assert!(app.snapshot.is_none());
        assert_eq!(cached_view(&app), before);
        assert!(matches!(app.last_error, Some(AppError::SnapshotFailed(_))));
    }

    #[tokio::test]
    async fn snapshot_for_previous_selection_is_discarded() {
        let mut app = app_showing_btc();
        let before = cached_view(&app);

        let sender = pending_snapshot(&mut app);
        // Selection moves on before the store has seen it.
        app.view.selection = app.view.selection.with_pair("ETHUSDT");
        sender.send(Ok(series_at(999)));
        app.poll_snapshot();

        assert!(app.snapshot.is_none());
        assert_eq!(cached_view(&app), before);
        assert!(app.last_error.is_none());
    }

    #[tokio::test]
    async fn selection_change_drops_pending_snapshot() {
        let mut app = app_showing_btc();
        let before = cached_view(&app);

        let sender = pending_snapshot(&mut app);
        app.handle_selection_events(vec![SelectionEvent::Pair("ETHUSDT".into())]);
        assert!(app.snapshot.is_none());

        sender.send(Ok(series_at(999)));
        app.poll_snapshot();
        assert_eq!(cached_view(&app), before);
    }
}
