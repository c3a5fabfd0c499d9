//! Configuration module for the candle dashboard.

pub mod binance;
pub mod dashboard;

mod debug; // Private: use crate::config::DEBUG_FLAGS not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;
pub mod plot;

// Re-export commonly used items
pub use binance::{BINANCE, BinanceApiConfig};
pub use dashboard::DASHBOARD;
pub use persistence::{APP_STATE_PATH, DEFAULT_PAIRS_FILE};
pub use plot::PLOT_CONFIG;
