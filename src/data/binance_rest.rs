//! Binance spot REST client.
//!
//! One method per endpoint; returns mapped domain types. Works natively (tokio + rustls)
//! and in the browser (fetch) through reqwest.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::config::{BINANCE, BinanceApiConfig};
use crate::data::error::MarketDataError;
use crate::data::mapper::map_klines;
use crate::data::market_client::MarketDataClient;
use crate::data::wire::{ApiErrorBody, TickerSnapshot, decode_klines, decode_ticker};
use crate::domain::{Series, SupportedPair, Timeframe};

pub struct BinanceRestClient {
    base_url: String,
    klines_limit: u32,
    client: Client,
    catalog: Vec<SupportedPair>,
}

impl BinanceRestClient {
    pub fn new(
        config: &BinanceApiConfig,
        catalog: Vec<SupportedPair>,
    ) -> Result<Self, MarketDataError> {
        #[allow(unused_mut)]
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            klines_limit: config.klines_limit,
            client: builder.build()?,
            catalog,
        })
    }

    pub fn klines_url(&self, timeframe: Timeframe, pair: &str) -> String {
        format!(
            "{}{}?symbol={}&interval={}&limit={}",
            self.base_url,
            BINANCE.rest.klines_path,
            pair,
            timeframe.code(),
            self.klines_limit
        )
    }

    pub fn ticker_url(&self, pair: &str) -> String {
        format!(
            "{}{}?symbol={}",
            self.base_url, BINANCE.rest.ticker_24hr_path, pair
        )
    }

    async fn get_body(&self, url: &str) -> Result<String, MarketDataError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            log::error!("Request to {} failed: {}", url, e);
            MarketDataError::from(e)
        })?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        Ok(body)
    }
}

/// Non-2xx replies count as network failures; include Binance's own message when it sent one.
fn status_error(status: StatusCode, body: &str) -> MarketDataError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(api) => MarketDataError::Network(format!("HTTP {} ({}): {}", status, api.code, api.msg)),
        Err(_) => MarketDataError::Network(format!("HTTP {}", status)),
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl MarketDataClient for BinanceRestClient {
    fn signature(&self) -> &'static str {
        "Binance REST API"
    }

    async fn list_supported_pairs(&self) -> Result<Vec<SupportedPair>, MarketDataError> {
        // Bundled (or loaded from the pairs file at startup); no endpoint call.
        Ok(self.catalog.clone())
    }

    async fn get_candles(
        &self,
        timeframe: Timeframe,
        pair: &str,
    ) -> Result<Series, MarketDataError> {
        let url = self.klines_url(timeframe, pair);
        let body = self.get_body(&url).await?;
        let records = decode_klines(&body)?;
        let series = map_klines(&records)?;
        #[cfg(debug_assertions)]
        log::info!("{} {}: received {} klines", pair, timeframe, series.len());
        Ok(series)
    }

    async fn get_ticker_info(&self, pair: &str) -> Result<TickerSnapshot, MarketDataError> {
        let url = self.ticker_url(pair);
        let body = self.get_body(&url).await?;
        decode_ticker(&body)
    }
}
