use async_trait::async_trait;
use std::sync::Arc;

use crate::data::error::MarketDataError;
use crate::data::wire::TickerSnapshot;
use crate::domain::{Series, SupportedPair, Timeframe};

/// The three requests the dashboard makes of a market-data provider.
/// Implementations hold no per-request state.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait MarketDataClient {
    /// Catalog of pairs offered in the selector.
    async fn list_supported_pairs(&self) -> Result<Vec<SupportedPair>, MarketDataError>;

    /// Mapped candles for (timeframe, pair), ascending by time.
    async fn get_candles(&self, timeframe: Timeframe, pair: &str)
    -> Result<Series, MarketDataError>;

    /// Current 24h snapshot for a pair.
    async fn get_ticker_info(&self, pair: &str) -> Result<TickerSnapshot, MarketDataError>;

    /// A unique identifier for this implementation (so the logs show which one we used).
    fn signature(&self) -> &'static str;
}

#[cfg(not(target_arch = "wasm32"))]
pub type SharedClient = Arc<dyn MarketDataClient + Send + Sync>;

#[cfg(target_arch = "wasm32")]
pub type SharedClient = Arc<dyn MarketDataClient>;
