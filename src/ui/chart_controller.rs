//! Lifecycle of the price + volume chart pair.
//!
//! Charts are never patched in place: any change of selection, series revision or theme
//! tears both down and builds fresh ones. The controller only decides *when*; drawing is
//! delegated to a [`ChartBackend`].

use eframe::egui::Color32;
use std::fmt;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::{DASHBOARD, PLOT_CONFIG};
use crate::domain::{CandleType, Selection, Series, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Price,
    Volume,
}

/// Identity of a drawing surface. One chart per container at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub &'static str);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartContainer {
    pub id: ContainerId,
    pub width: f32,
    pub height: f32,
}

impl ChartContainer {
    pub fn new(id: &'static str, width: f32, height: f32) -> Self {
        Self {
            id: ContainerId(id),
            width,
            height,
        }
    }
}

/// Colours and size a chart is constructed with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub background: Color32,
    pub text: Color32,
    pub grid: Color32,
    pub width: f32,
    pub height: f32,
}

impl ChartLayout {
    pub fn new(theme: Theme, container: &ChartContainer) -> Self {
        let palette = theme.palette();
        Self {
            background: palette.background,
            text: palette.text,
            grid: palette.grid,
            width: container.width,
            height: container.height,
        }
    }
}

/// Renderer-native candle. `time` is the x coordinate in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandlePoint {
    pub time: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramPoint {
    pub time: f64,
    pub value: f64,
    pub color: Color32,
}

/// Everything a chart displays. Owned by the chart once handed over.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Candlestick {
        points: Vec<CandlePoint>,
        bar_width: f64,
    },
    Histogram {
        points: Vec<HistogramPoint>,
        bar_width: f64,
    },
}

impl ChartData {
    pub fn len(&self) -> usize {
        match self {
            ChartData::Candlestick { points, .. } => points.len(),
            ChartData::Histogram { points, .. } => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn candle_color(kind: CandleType) -> Color32 {
    match kind {
        CandleType::Bullish => PLOT_CONFIG.bull_color,
        CandleType::Bearish => PLOT_CONFIG.bear_color,
    }
}

/// Width of one candle body / volume bar, in x units (seconds).
pub fn bar_width(bucket_secs: i64) -> f64 {
    bucket_secs as f64 * DASHBOARD.bar_width_fraction
}

pub fn candlestick_points(series: &Series) -> Vec<CandlePoint> {
    series
        .candles()
        .iter()
        .map(|c| CandlePoint {
            time: c.time as f64,
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
            color: candle_color(c.get_type()),
        })
        .collect()
}

/// Volume bars take the colour of their candle: green when close > open, red otherwise.
pub fn volume_points(series: &Series) -> Vec<HistogramPoint> {
    series
        .candles()
        .iter()
        .map(|c| HistogramPoint {
            time: c.time as f64,
            value: c.volume,
            color: candle_color(c.get_type()),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartHandle(pub u64);

/// A rendering engine that can own charts.
pub trait ChartBackend {
    fn create_chart(
        &mut self,
        kind: ChartKind,
        container: &ChartContainer,
        layout: ChartLayout,
    ) -> ChartHandle;

    fn set_data(&mut self, handle: ChartHandle, data: ChartData);

    /// Release a chart and everything it owns. Unknown handles are ignored.
    fn remove_chart(&mut self, handle: ChartHandle);
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    /// Both charts were pointed at the same drawing surface.
    SharedContainer(ContainerId),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::SharedContainer(id) => {
                write!(f, "price and volume charts cannot share container {}", id.0)
            }
        }
    }
}

impl std::error::Error for ChartError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPhase {
    Unmounted,
    Ready,
}

/// What `sync` is asked to display.
#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    pub selection: &'a Selection,
    pub series: &'a Series,
    /// Series revision from the store. A new revision means new data.
    pub revision: u64,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BuildKey {
    selection: Selection,
    revision: u64,
    theme: Theme,
}

/// Result of one `sync` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Charts were (re)constructed.
    Rebuilt,
    /// Charts already show this input.
    Unchanged,
    /// Nothing to display; no charts exist.
    Empty,
    /// No containers yet; construction postponed.
    Deferred,
}

#[derive(Debug, Clone, Copy)]
struct Containers {
    price: ChartContainer,
    volume: ChartContainer,
}

struct MountedCharts {
    price: ChartHandle,
    volume: ChartHandle,
    key: BuildKey,
}

pub struct ChartViewController<B: ChartBackend> {
    backend: B,
    containers: Option<Containers>,
    mounted: Option<MountedCharts>,
    builds: u64,
}

impl<B: ChartBackend> ChartViewController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            containers: None,
            mounted: None,
            builds: 0,
        }
    }

    /// Attach the two drawing surfaces. Re-attaching the same surfaces with a new size is
    /// fine; swapping in different surfaces tears down the current charts.
    pub fn mount_containers(
        &mut self,
        price: ChartContainer,
        volume: ChartContainer,
    ) -> Result<(), ChartError> {
        if price.id == volume.id {
            return Err(ChartError::SharedContainer(price.id));
        }
        if let Some(current) = &self.containers {
            if current.price.id != price.id || current.volume.id != volume.id {
                self.destroy();
            }
        }
        self.containers = Some(Containers { price, volume });
        Ok(())
    }

    /// Detach the surfaces; any live charts go with them.
    pub fn unmount_containers(&mut self) {
        self.destroy();
        self.containers = None;
    }

    /// Bring the charts in line with `input`. `None` means there is nothing to show.
    pub fn sync(&mut self, input: Option<ChartInput<'_>>) -> SyncOutcome {
        let Some(input) = input.filter(|i| !i.series.is_empty()) else {
            self.destroy();
            return SyncOutcome::Empty;
        };

        let Some(containers) = self.containers else {
            return SyncOutcome::Deferred;
        };

        let key = BuildKey {
            selection: input.selection.clone(),
            revision: input.revision,
            theme: input.theme,
        };
        if self.mounted.as_ref().map(|m| &m.key) == Some(&key) {
            return SyncOutcome::Unchanged;
        }

        self.destroy();
        self.build(&containers, &input, key);
        SyncOutcome::Rebuilt
    }

    fn build(&mut self, containers: &Containers, input: &ChartInput<'_>, key: BuildKey) {
        let width = bar_width(input.selection.timeframe.to_secs());

        let price = self.backend.create_chart(
            ChartKind::Price,
            &containers.price,
            ChartLayout::new(input.theme, &containers.price),
        );
        self.backend.set_data(
            price,
            ChartData::Candlestick {
                points: candlestick_points(input.series),
                bar_width: width,
            },
        );

        let volume = self.backend.create_chart(
            ChartKind::Volume,
            &containers.volume,
            ChartLayout::new(input.theme, &containers.volume),
        );
        self.backend.set_data(
            volume,
            ChartData::Histogram {
                points: volume_points(input.series),
                bar_width: width,
            },
        );

        self.builds += 1;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_chart_lifecycle {
            log::info!(
                "Charts built for {} (rev {}, {:?}, {} candles)",
                key.selection,
                key.revision,
                key.theme,
                input.series.len()
            );
        }

        self.mounted = Some(MountedCharts { price, volume, key });
    }

    /// Remove both charts. Safe to call any number of times.
    pub fn destroy(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            self.backend.remove_chart(mounted.price);
            self.backend.remove_chart(mounted.volume);

            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_chart_lifecycle {
                log::info!("Charts destroyed for {}", mounted.key.selection);
            }
        }
    }

    /// Final cleanup on exit.
    pub fn teardown(&mut self) {
        self.unmount_containers();
    }

    pub fn phase(&self) -> ChartPhase {
        match self.mounted {
            Some(_) => ChartPhase::Ready,
            None => ChartPhase::Unmounted,
        }
    }

    /// Number of times the chart pair has been constructed.
    pub fn builds(&self) -> u64 {
        self.builds
    }

    pub fn price_handle(&self) -> Option<ChartHandle> {
        self.mounted.as_ref().map(|m| m.price)
    }

    pub fn volume_handle(&self) -> Option<ChartHandle> {
        self.mounted.as_ref().map(|m| m.volume)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candle, Timeframe};
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(ChartKind, ContainerId, Color32),
        SetData(ChartHandle, usize),
        Remove(ChartHandle),
    }

    #[derive(Default)]
    struct RecordingBackend {
        next: u64,
        live: HashMap<ChartHandle, (ContainerId, ChartLayout)>,
        calls: Vec<Call>,
    }

    impl ChartBackend for RecordingBackend {
        fn create_chart(
            &mut self,
            kind: ChartKind,
            container: &ChartContainer,
            layout: ChartLayout,
        ) -> ChartHandle {
            assert!(
                !self.live.values().any(|(id, _)| *id == container.id),
                "container {:?} already owned",
                container.id
            );
            self.next += 1;
            let handle = ChartHandle(self.next);
            self.live.insert(handle, (container.id, layout));
            self.calls
                .push(Call::Create(kind, container.id, layout.background));
            handle
        }

        fn set_data(&mut self, handle: ChartHandle, data: ChartData) {
            self.calls.push(Call::SetData(handle, data.len()));
        }

        fn remove_chart(&mut self, handle: ChartHandle) {
            self.live.remove(&handle);
            self.calls.push(Call::Remove(handle));
        }
    }

    fn mounted() -> ChartViewController<RecordingBackend> {
        let mut controller = ChartViewController::new(RecordingBackend::default());
        controller
            .mount_containers(
                ChartContainer::new("price", 800.0, 400.0),
                ChartContainer::new("volume", 800.0, 100.0),
            )
            .unwrap();
        controller
    }

    fn series() -> Series {
        Series::from_candles(vec![
            Candle::new(60, 10.0, 12.0, 9.0, 11.0, 5.0),
            Candle::new(120, 11.0, 11.5, 8.0, 9.0, 7.0),
            Candle::new(180, 9.0, 9.0, 9.0, 9.0, 0.0),
        ])
    }

    fn input<'a>(selection: &'a Selection, series: &'a Series, revision: u64, theme: Theme) -> ChartInput<'a> {
        ChartInput {
            selection,
            series,
            revision,
            theme,
        }
    }

    #[test]
    fn empty_series_never_constructs() {
        let mut controller = mounted();
        let selection = Selection::default();
        let empty = Series::default();

        assert_eq!(
            controller.sync(Some(input(&selection, &empty, 1, Theme::Dark))),
            SyncOutcome::Empty
        );
        assert_eq!(controller.sync(None), SyncOutcome::Empty);
        assert!(controller.backend().calls.is_empty());
        assert_eq!(controller.phase(), ChartPhase::Unmounted);
    }

    #[test]
    fn builds_both_charts_once_per_input() {
        let mut controller = mounted();
        let selection = Selection::default();
        let data = series();

        assert_eq!(
            controller.sync(Some(input(&selection, &data, 1, Theme::Dark))),
            SyncOutcome::Rebuilt
        );
        assert_eq!(
            controller.sync(Some(input(&selection, &data, 1, Theme::Dark))),
            SyncOutcome::Unchanged
        );
        assert_eq!(controller.builds(), 1);
        assert_eq!(controller.phase(), ChartPhase::Ready);
        assert_eq!(controller.backend().live.len(), 2);
        assert!(controller
            .backend()
            .calls
            .contains(&Call::SetData(controller.price_handle().unwrap(), 3)));
    }

    #[test]
    fn theme_toggle_rebuilds_both_with_light_layout() {
        let mut controller = mounted();
        let selection = Selection::default();
        let data = series();

        controller.sync(Some(input(&selection, &data, 1, Theme::Dark)));
        let (old_price, old_volume) = (
            controller.price_handle().unwrap(),
            controller.volume_handle().unwrap(),
        );
        controller.backend_mut().calls.clear();

        assert_eq!(
            controller.sync(Some(input(&selection, &data, 1, Theme::Light))),
            SyncOutcome::Rebuilt
        );
        let calls = &controller.backend().calls;
        assert_eq!(calls[0], Call::Remove(old_price));
        assert_eq!(calls[1], Call::Remove(old_volume));
        let light = Theme::Light.palette().background;
        assert!(calls.contains(&Call::Create(ChartKind::Price, ContainerId("price"), light)));
        assert!(calls.contains(&Call::Create(ChartKind::Volume, ContainerId("volume"), light)));
        // Same data handed to the fresh charts.
        assert!(calls.contains(&Call::SetData(controller.price_handle().unwrap(), 3)));
        assert!(calls.contains(&Call::SetData(controller.volume_handle().unwrap(), 3)));
        assert_eq!(controller.backend().live.len(), 2);
    }

    #[test]
    fn new_revision_or_selection_rebuilds() {
        let mut controller = mounted();
        let selection = Selection::default();
        let data = series();

        controller.sync(Some(input(&selection, &data, 1, Theme::Dark)));
        controller.sync(Some(input(&selection, &data, 2, Theme::Dark)));
        let other = selection.with_timeframe(Timeframe::H1);
        controller.sync(Some(input(&other, &data, 2, Theme::Dark)));
        assert_eq!(controller.builds(), 3);
        assert_eq!(controller.backend().live.len(), 2);
    }

    #[test]
    fn construction_waits_for_containers() {
        let mut controller = ChartViewController::new(RecordingBackend::default());
        let selection = Selection::default();
        let data = series();

        assert_eq!(
            controller.sync(Some(input(&selection, &data, 1, Theme::Dark))),
            SyncOutcome::Deferred
        );
        assert!(controller.backend().calls.is_empty());

        controller
            .mount_containers(
                ChartContainer::new("price", 800.0, 400.0),
                ChartContainer::new("volume", 800.0, 100.0),
            )
            .unwrap();
        assert_eq!(
            controller.sync(Some(input(&selection, &data, 1, Theme::Dark))),
            SyncOutcome::Rebuilt
        );
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut controller = mounted();
        let selection = Selection::default();
        let data = series();
        controller.sync(Some(input(&selection, &data, 1, Theme::Dark)));

        controller.destroy();
        controller.destroy();
        controller.teardown();
        let removes = controller
            .backend()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Remove(_)))
            .count();
        assert_eq!(removes, 2);
        assert_eq!(controller.phase(), ChartPhase::Unmounted);
    }

    #[test]
    fn shared_container_is_rejected() {
        let mut controller = ChartViewController::new(RecordingBackend::default());
        let err = controller
            .mount_containers(
                ChartContainer::new("chart", 800.0, 400.0),
                ChartContainer::new("chart", 800.0, 100.0),
            )
            .unwrap_err();
        assert_eq!(err, ChartError::SharedContainer(ContainerId("chart")));
    }

    #[test]
    fn volume_colour_follows_candle_direction() {
        let points = volume_points(&series());
        assert_eq!(points[0].color, PLOT_CONFIG.bull_color);
        assert_eq!(points[1].color, PLOT_CONFIG.bear_color);
        // flat candle counts as bearish
        assert_eq!(points[2].color, PLOT_CONFIG.bear_color);
        assert_eq!(points[1].value, 7.0);
    }

    #[test]
    fn bar_width_scales_with_timeframe() {
        assert_eq!(bar_width(60), 60.0 * DASHBOARD.bar_width_fraction);
        assert!(bar_width(Timeframe::H4.to_secs()) > bar_width(Timeframe::M1.to_secs()));
    }
}
