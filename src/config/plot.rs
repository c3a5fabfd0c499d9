//! Plot visualization configuration

use eframe::egui::Color32;

/// Layout colours applied to both charts for one display theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub background: Color32,
    pub text: Color32,
    pub grid: Color32,
}

pub struct PlotConfig {
    /// Candle body / volume bar colour when close > open
    pub bull_color: Color32,
    /// Candle body / volume bar colour otherwise
    pub bear_color: Color32,
    pub dark: ThemePalette,
    pub light: ThemePalette,
    /// Width of the candle wick and body outline
    pub candle_stroke_width: f32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    bull_color: Color32::from_rgb(0x26, 0xa6, 0x9a), // #26a69a
    bear_color: Color32::from_rgb(0xef, 0x53, 0x50), // #ef5350
    dark: ThemePalette {
        background: Color32::from_rgb(0x1e, 0x1e, 0x1e),
        text: Color32::WHITE,
        grid: Color32::from_rgb(0x44, 0x44, 0x44),
    },
    light: ThemePalette {
        background: Color32::WHITE,
        text: Color32::BLACK,
        grid: Color32::from_rgb(0xdd, 0xdd, 0xdd),
    },
    candle_stroke_width: 1.0,
};
