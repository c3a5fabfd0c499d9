//! Running market-data futures off the UI thread and handing results back as promises.

use poll_promise::Promise;
use std::future::Future;
use std::sync::Arc;

use crate::data::error::MarketDataError;
use crate::data::market_client::{MarketDataClient, SharedClient};
use crate::data::polling_store::{SeriesResult, SeriesSource};
use crate::domain::{Selection, Series, Timeframe};

/// Spawn on the tokio runtime entered by `main`.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_promise<T: Send + 'static>(
    future: impl Future<Output = T> + Send + 'static,
) -> Promise<T> {
    Promise::spawn_async(future)
}

/// Spawn on the browser's microtask queue.
#[cfg(target_arch = "wasm32")]
pub fn spawn_promise<T: Send + 'static>(future: impl Future<Output = T> + 'static) -> Promise<T> {
    Promise::spawn_local(future)
}

/// Feeds the polling store from a live client.
pub struct ClientSeriesSource {
    client: SharedClient,
}

impl ClientSeriesSource {
    pub fn new(client: SharedClient) -> Self {
        Self { client }
    }
}

impl SeriesSource for ClientSeriesSource {
    fn fetch(&self, selection: &Selection) -> Promise<SeriesResult> {
        let client = Arc::clone(&self.client);
        let selection = selection.clone();
        spawn_promise(async move {
            client
                .get_candles(selection.timeframe, &selection.pair)
                .await
        })
    }
}

/// The two user actions that overwrite the chart with a single synthetic candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotAction {
    /// Latest 24h ticker folded into one candle. Never touches the candle endpoint.
    CurrentPrice,
    /// The most recent 1-minute candle.
    LastMinute,
}

/// Resolve a snapshot action into the one-candle series it should display.
pub async fn fetch_snapshot_series(
    client: SharedClient,
    action: SnapshotAction,
    pair: String,
) -> Result<Series, MarketDataError> {
    match action {
        SnapshotAction::CurrentPrice => {
            let snapshot = client.get_ticker_info(&pair).await?;
            let candle = crate::data::mapper::ticker_to_candle(&snapshot)?;
            Ok(Series::single(candle))
        }
        SnapshotAction::LastMinute => {
            let series = client.get_candles(Timeframe::M1, &pair).await?;
            match series.last() {
                Some(candle) => Ok(Series::single(*candle)),
                None => Err(MarketDataError::InvalidResponse(format!(
                    "no 1m candles returned for {}",
                    pair
                ))),
            }
        }
    }
}
