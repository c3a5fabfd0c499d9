use eframe::egui::Stroke;
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, PlotUi};

use crate::config::PLOT_CONFIG;
use crate::ui::chart_controller::{CandlePoint, ChartData, HistogramPoint};
use crate::ui::ui_text::UI_TEXT;

/// Context passed to every layer during rendering.
pub struct LayerContext<'a> {
    pub data: &'a ChartData,
    pub pair: &'a str,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. CANDLESTICK LAYER
// ============================================================================
pub struct CandlestickLayer;

/// A candle as a box plot element: whiskers are the wick, the box is the body.
fn candle_elem(point: &CandlePoint, bar_width: f64) -> BoxElem {
    let body_low = point.open.min(point.close);
    let body_high = point.open.max(point.close);
    let spread = BoxSpread::new(
        point.low,
        body_low,
        (body_low + body_high) / 2.0,
        body_high,
        point.high,
    );
    BoxElem::new(point.time, spread)
        .box_width(bar_width)
        .whisker_width(0.0)
        .fill(point.color)
        .stroke(Stroke::new(PLOT_CONFIG.candle_stroke_width, point.color))
}

impl PlotLayer for CandlestickLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let ChartData::Candlestick { points, bar_width } = ctx.data else {
            return;
        };
        let boxes: Vec<BoxElem> = points.iter().map(|p| candle_elem(p, *bar_width)).collect();
        let name = format!("{} {}", ctx.pair, UI_TEXT.price_series_label);
        plot_ui.box_plot(BoxPlot::new(name, boxes));
    }
}

// ============================================================================
// 2. VOLUME LAYER
// ============================================================================
pub struct VolumeLayer;

fn volume_bar(point: &HistogramPoint, bar_width: f64) -> Bar {
    Bar::new(point.time, point.value)
        .width(bar_width)
        .fill(point.color)
        .stroke(Stroke::NONE)
}

impl PlotLayer for VolumeLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let ChartData::Histogram { points, bar_width } = ctx.data else {
            return;
        };
        let bars: Vec<Bar> = points.iter().map(|p| volume_bar(p, *bar_width)).collect();
        let name = format!("{} {}", ctx.pair, UI_TEXT.volume_series_label);
        plot_ui.bar_chart(BarChart::new(name, bars));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Color32;

    #[test]
    fn bearish_candle_body_spans_close_to_open() {
        let point = CandlePoint {
            time: 120.0,
            open: 11.0,
            high: 11.5,
            low: 8.0,
            close: 9.0,
            color: Color32::RED,
        };
        let elem = candle_elem(&point, 42.0);
        assert_eq!(elem.argument, 120.0);
        assert_eq!(elem.spread.lower_whisker, 8.0);
        assert_eq!(elem.spread.quartile1, 9.0);
        assert_eq!(elem.spread.quartile3, 11.0);
        assert_eq!(elem.spread.upper_whisker, 11.5);
        assert_eq!(elem.box_width, 42.0);
        assert_eq!(elem.whisker_width, 0.0);
    }

    #[test]
    fn volume_bar_keeps_value_and_colour() {
        let bar = volume_bar(
            &HistogramPoint {
                time: 60.0,
                value: 7.5,
                color: Color32::GREEN,
            },
            30.0,
        );
        assert_eq!(bar.argument, 60.0);
        assert_eq!(bar.value, 7.5);
        assert_eq!(bar.bar_width, 30.0);
        assert_eq!(bar.fill, Color32::GREEN);
    }
}
