// User interface components
pub mod app;
pub mod app_async;
pub mod app_state;
pub mod chart_controller;
pub mod config;
pub mod plot_layers;
pub mod styles;
pub mod ui_panels;
pub mod ui_plot_view;
pub mod ui_render;
pub mod ui_text;
pub mod utils;

// Re-export main app
pub use app::CandleScopeApp;
pub use config::UI_CONFIG;
