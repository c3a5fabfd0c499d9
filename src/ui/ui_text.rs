/// Every user-visible string in one place.
pub struct UiText {
    pub app_title: &'static str,

    // Selection panel
    pub pair_selector_heading: &'static str,
    pub timeframe_selector_heading: &'static str,
    pub theme_toggle_to_light: &'static str,
    pub theme_toggle_to_dark: &'static str,
    pub current_price_button: &'static str,
    pub current_price_tooltip: &'static str,
    pub last_minute_button: &'static str,
    pub last_minute_tooltip: &'static str,

    // Central panel states
    pub loading: &'static str,
    pub error_loading: &'static str,
    pub empty_series: &'static str,

    // Plot
    pub price_series_label: &'static str,
    pub volume_series_label: &'static str,
    pub plot_x_axis: &'static str,
    pub plot_price_axis: &'static str,
    pub plot_volume_axis: &'static str,

    // Status bar
    pub status_candles: &'static str,
    pub status_last_price: &'static str,
    pub status_updated: &'static str,
    pub status_next_refresh: &'static str,
    pub status_revalidating: &'static str,
    pub status_snapshot: &'static str,
    pub status_source: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "Candle Scope",

    pair_selector_heading: "Pair",
    timeframe_selector_heading: "Timeframe",
    theme_toggle_to_light: "☀ Light",
    theme_toggle_to_dark: "🌙 Dark",
    current_price_button: "💰 Current price",
    current_price_tooltip: "Replace the chart with one candle built from the 24h ticker",
    last_minute_button: "⏱ Last minute",
    last_minute_tooltip: "Replace the chart with the most recent 1m candle",

    loading: "Loading…",
    error_loading: "Error loading data",
    empty_series: "No candles for this selection",

    price_series_label: "price",
    volume_series_label: "volume",
    plot_x_axis: "Time (UTC)",
    plot_price_axis: "Price",
    plot_volume_axis: "Volume",

    status_candles: "Candles",
    status_last_price: "Last",
    status_updated: "Updated",
    status_next_refresh: "Next refresh",
    status_revalidating: "⟳ refreshing",
    status_snapshot: "Snapshot",
    status_source: "Source",
};
