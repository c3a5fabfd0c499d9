//! Dashboard behaviour: refresh cadence, chart geometry and the bundled pair catalog.

use crate::domain::Timeframe;

/// A bundled catalog entry: (identifier, display icon)
pub type CatalogEntry = (&'static str, &'static str);

pub struct DashboardConfig {
    /// Fixed wall-clock interval between automatic refreshes of the active selection
    pub refresh_interval_ms: u64,
    /// Height of the candlestick chart container (px)
    pub price_chart_height: f32,
    /// Height of the volume histogram container (px)
    pub volume_chart_height: f32,
    /// Fraction of one timeframe bucket occupied by a candle body / volume bar
    pub bar_width_fraction: f64,
    pub default_pair: &'static str,
    pub default_timeframe: Timeframe,
    /// Pairs offered when no pairs file is supplied
    pub catalog: &'static [CatalogEntry],
}

pub const DASHBOARD: DashboardConfig = DashboardConfig {
    refresh_interval_ms: 60_000,
    price_chart_height: 400.0,
    volume_chart_height: 100.0,
    bar_width_fraction: 0.7,
    default_pair: "BTCUSDT",
    default_timeframe: Timeframe::M1,
    catalog: &[
        ("BTCUSDT", "₿"),
        ("ETHUSDT", "Ξ"),
        ("BNBUSDT", "◆"),
        ("SOLUSDT", "◎"),
        ("XRPUSDT", "✕"),
        ("ADAUSDT", "₳"),
        ("DOGEUSDT", "Ð"),
        ("PAXGUSDT", "Au"),
    ],
};
