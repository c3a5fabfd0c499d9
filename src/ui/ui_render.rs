use eframe::egui::{CentralPanel, Context, Margin, Frame, Spinner, TopBottomPanel, Ui};

use crate::config::DASHBOARD;
use crate::data::{MarketDataClient, SeriesState};
use crate::ui::chart_controller::{ChartContainer, ChartInput, SyncOutcome};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{Panel, SelectionPanel};
use crate::ui::utils::{colored_heading, format_price};
use crate::utils::app_time::now;
use crate::utils::time_utils::format_age;

use super::app::CandleScopeApp;

impl CandleScopeApp {
    pub(super) fn render_top_panel(&mut self, ctx: &Context) {
        let frame = Frame::side_top_panel(&ctx.style()).inner_margin(Margin::symmetric(8, 6));
        let events = TopBottomPanel::top("selection_panel")
            .frame(frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(colored_heading(UI_TEXT.app_title));
                    ui.separator();
                    let mut panel = SelectionPanel::new(
                        &self.view.selection,
                        &self.pairs,
                        self.view.theme,
                        self.snapshot.is_some(),
                    );
                    panel.render(ui)
                })
                .inner
            })
            .inner;

        self.handle_selection_events(events);
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let Some(store) = self.store.as_ref() else {
                self.charts.sync(None);
                ui.label_error(UI_TEXT.error_loading);
                return;
            };

            let width = ui.available_width().max(UI_CONFIG.min_chart_width);
            if let Err(e) = self.charts.mount_containers(
                ChartContainer::new("price_chart", width, DASHBOARD.price_chart_height),
                ChartContainer::new("volume_chart", width, DASHBOARD.volume_chart_height),
            ) {
                log::error!("{}", e);
                return;
            }

            let cached = match store.state() {
                SeriesState::Pending => {
                    self.charts.sync(None);
                    ui.horizontal(|ui| {
                        ui.add(Spinner::new());
                        ui.label(UI_TEXT.loading);
                    });
                    return;
                }
                SeriesState::Error(e) => {
                    ui.label_error(UI_TEXT.error_loading);
                    ui.label_subdued(e.to_string());
                    // Keep showing the last good series below the error, if there is one.
                    store.cached()
                }
                SeriesState::Ready(cached) => Some(cached),
            };

            let Some(cached) = cached else {
                self.charts.sync(None);
                return;
            };

            self.charts
                .backend_mut()
                .set_context(&cached.selection.pair, cached.selection.timeframe.to_ms());
            let outcome = self.charts.sync(Some(ChartInput {
                selection: &cached.selection,
                series: &cached.series,
                revision: cached.revision,
                theme: self.view.theme,
            }));

            if outcome == SyncOutcome::Empty {
                ui.label_subdued(UI_TEXT.empty_series);
                return;
            }
            self.show_charts(ui);
        });
    }

    fn show_charts(&self, ui: &mut Ui) {
        let backend = self.charts.backend();
        if let Some(handle) = self.charts.price_handle() {
            backend.show(ui, handle);
        }
        if let Some(handle) = self.charts.volume_handle() {
            backend.show(ui, handle);
        }
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::side_top_panel(&ctx.style()).inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let Some(store) = self.store.as_ref() else {
                        if let Some(e) = &self.last_error {
                            ui.label_error(e.to_string());
                        }
                        return;
                    };
                    let now = now();

                    if let Some(cached) = store.cached() {
                        ui.metric(
                            UI_TEXT.status_candles,
                            &cached.series.len().to_string(),
                            UI_CONFIG.colors.status_busy,
                        );
                        ui.separator();

                        if let Some(last) = cached.series.last() {
                            ui.metric(
                                UI_TEXT.status_last_price,
                                &format_price(last.close),
                                UI_CONFIG.colors.status_busy,
                            );
                            ui.separator();
                        }

                        let age = now.saturating_duration_since(cached.fetched_at);
                        ui.metric(
                            UI_TEXT.status_updated,
                            &format!("{} ago", format_age(age.as_secs_f64())),
                            UI_CONFIG.colors.status_ok,
                        );
                        ui.separator();

                        if cached.optimistic {
                            ui.metric(UI_TEXT.status_snapshot, "✔", UI_CONFIG.colors.snapshot);
                            ui.separator();
                        }
                    }

                    if let Some(wait) = store.time_until_refresh(now) {
                        ui.metric(
                            UI_TEXT.status_next_refresh,
                            &format_age(wait.as_secs_f64()),
                            UI_CONFIG.colors.label,
                        );
                        ui.separator();
                    }

                    if store.is_revalidating() {
                        ui.label_subdued(UI_TEXT.status_revalidating);
                        ui.separator();
                    }

                    if let Some(e) = &self.last_error {
                        ui.label_error(e.to_string());
                        ui.separator();
                    }

                    if let Some(client) = &self.client {
                        ui.metric(UI_TEXT.status_source, client.signature(), UI_CONFIG.colors.label);
                    }
                });
            });
    }
}
