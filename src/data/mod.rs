// Market data: exchange client, mapping, and the polling store
pub mod binance_rest;
pub mod error;
pub mod fetch_task;
pub mod mapper;
pub mod market_client;
pub mod polling_store;
pub mod pre_main;
pub mod wire;

// Re-export commonly used types
pub use binance_rest::BinanceRestClient;
pub use error::MarketDataError;
pub use fetch_task::{ClientSeriesSource, SnapshotAction, fetch_snapshot_series, spawn_promise};
pub use market_client::{MarketDataClient, SharedClient};
pub use polling_store::{CachedSeries, PollingStore, SeriesSource, SeriesState};
pub use pre_main::LaunchConfig;
