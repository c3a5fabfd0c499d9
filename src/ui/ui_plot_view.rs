use std::collections::HashMap;

use eframe::egui::{self, Id};
use egui_plot::{AxisHints, HPlacement, Plot};

use crate::ui::chart_controller::{
    ChartBackend, ChartContainer, ChartData, ChartHandle, ChartKind, ChartLayout,
};
use crate::ui::plot_layers::{CandlestickLayer, LayerContext, PlotLayer, VolumeLayer};
use crate::ui::ui_text::UI_TEXT;
use crate::ui::utils::{format_price, format_volume};
use crate::utils::time_utils::epoch_sec_to_axis_label;

/// One live egui_plot chart.
struct PlotChart {
    kind: ChartKind,
    /// Fresh per construction, so egui keeps no zoom/bounds memory across rebuilds.
    plot_id: Id,
    layout: ChartLayout,
    data: Option<ChartData>,
}

/// Draws controller-managed charts with egui_plot.
#[derive(Default)]
pub struct EguiPlotBackend {
    charts: HashMap<ChartHandle, PlotChart>,
    next_handle: u64,
    /// Pair shown in legends and axis labels.
    pair: String,
    /// Bucket width of the current data, for axis label granularity.
    bucket_ms: i64,
}

impl EguiPlotBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels for whatever gets built next.
    pub fn set_context(&mut self, pair: &str, bucket_ms: i64) {
        self.pair.clear();
        self.pair.push_str(pair);
        self.bucket_ms = bucket_ms;
    }

    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    /// Render a chart into `ui`. Unknown handles draw nothing.
    pub fn show(&self, ui: &mut egui::Ui, handle: ChartHandle) {
        let Some(chart) = self.charts.get(&handle) else {
            return;
        };
        let Some(data) = chart.data.as_ref() else {
            return;
        };

        let layout = chart.layout;
        let bucket_ms = self.bucket_ms;
        let ctx = LayerContext {
            data,
            pair: &self.pair,
        };

        ui.scope(|ui| {
            let visuals = ui.visuals_mut();
            visuals.extreme_bg_color = layout.background;
            visuals.override_text_color = Some(layout.text);
            visuals.widgets.noninteractive.bg_stroke.color = layout.grid;

            let x_axis = AxisHints::new_x()
                .label(UI_TEXT.plot_x_axis)
                .formatter(move |mark, _range| epoch_sec_to_axis_label(mark.value.round() as i64, bucket_ms));

            let y_axis = match chart.kind {
                ChartKind::Price => AxisHints::new_y()
                    .label(format!("{} {}", self.pair, UI_TEXT.plot_price_axis))
                    .formatter(|mark, _range| format_price(mark.value))
                    .placement(HPlacement::Right),
                ChartKind::Volume => AxisHints::new_y()
                    .label(UI_TEXT.plot_volume_axis)
                    .formatter(|mark, _range| format_volume(mark.value))
                    .placement(HPlacement::Right),
            };

            let mut plot = Plot::new(chart.plot_id)
                .height(layout.height)
                .custom_x_axes(vec![x_axis])
                .custom_y_axes(vec![y_axis])
                .link_axis(Id::new("candle_scope_time_axis"), [true, false])
                .link_cursor(Id::new("candle_scope_time_cursor"), [true, false])
                .allow_scroll(false);

            if chart.kind == ChartKind::Volume {
                plot = plot.include_y(0.0);
            }

            plot.show(ui, |plot_ui| {
                let layers: Vec<Box<dyn PlotLayer>> = match chart.kind {
                    ChartKind::Price => vec![Box::new(CandlestickLayer)],
                    ChartKind::Volume => vec![Box::new(VolumeLayer)],
                };
                for layer in layers {
                    layer.render(plot_ui, &ctx);
                }
            });
        });
    }
}

impl ChartBackend for EguiPlotBackend {
    fn create_chart(
        &mut self,
        kind: ChartKind,
        container: &ChartContainer,
        layout: ChartLayout,
    ) -> ChartHandle {
        self.next_handle += 1;
        let handle = ChartHandle(self.next_handle);
        self.charts.insert(
            handle,
            PlotChart {
                kind,
                plot_id: Id::new(container.id.0).with(self.next_handle),
                layout,
                data: None,
            },
        );
        handle
    }

    fn set_data(&mut self, handle: ChartHandle, data: ChartData) {
        match self.charts.get_mut(&handle) {
            Some(chart) => chart.data = Some(data),
            None => log::warn!("set_data on unknown chart {:?}", handle),
        }
    }

    fn remove_chart(&mut self, handle: ChartHandle) {
        self.charts.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Theme;

    #[test]
    fn each_build_gets_a_fresh_plot_id() {
        let mut backend = EguiPlotBackend::new();
        let container = ChartContainer::new("price", 600.0, 400.0);
        let layout = ChartLayout::new(Theme::Dark, &container);

        let first = backend.create_chart(ChartKind::Price, &container, layout);
        let first_id = backend.charts[&first].plot_id;
        backend.remove_chart(first);
        let second = backend.create_chart(ChartKind::Price, &container, layout);

        assert_ne!(first, second);
        assert_ne!(first_id, backend.charts[&second].plot_id);
        assert_eq!(backend.chart_count(), 1);
    }

    #[test]
    fn removing_unknown_chart_is_harmless() {
        let mut backend = EguiPlotBackend::new();
        backend.remove_chart(ChartHandle(99));
        backend.set_data(
            ChartHandle(99),
            ChartData::Histogram {
                points: vec![],
                bar_width: 1.0,
            },
        );
        assert_eq!(backend.chart_count(), 0);
    }
}
