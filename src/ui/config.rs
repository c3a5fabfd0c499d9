use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub status_ok: Color32,
    pub status_busy: Color32,
    pub status_error: Color32,
    pub snapshot: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    /// Width of the pair selector combo box
    pub pair_combo_width: f32,
    /// Width of the timeframe selector combo box
    pub timeframe_combo_width: f32,
    /// Minimum width the charts are laid out with
    pub min_chart_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::from_rgb(0xf0, 0xb9, 0x0b), // Binance yellow
        subsection_heading: Color32::ORANGE,
        status_ok: Color32::from_rgb(100, 200, 100),
        status_busy: Color32::from_rgb(100, 200, 255),
        status_error: Color32::from_rgb(255, 100, 100),
        snapshot: Color32::from_rgb(255, 200, 100),
    },
    pair_combo_width: 160.0,
    timeframe_combo_width: 70.0,
    min_chart_width: 200.0,
};
