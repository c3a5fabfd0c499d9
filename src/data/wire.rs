//! Exchange-native payload shapes.
//!
//! Binance returns klines as positional JSON arrays:
//! `[openTime, "open", "high", "low", "close", "volume", closeTime, "quoteVolume", trades, ...]`.
//! They are decoded here into [`KlineRecord`] so the mapper only ever sees numeric fields.
//! The 24h ticker arrives as an object whose numerics are decimal strings; it is kept as-is
//! ([`TickerSnapshot`]) and parsed by the mapper.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::TryFrom;
use std::fmt;

use crate::data::error::MarketDataError;

/// One candle record as the exchange describes it: ms timestamps, numeric OHLCV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KlineRecord {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// `GET /api/v3/ticker/24hr` for a single symbol (fields we use only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSnapshot {
    #[serde(default)]
    pub symbol: String,
    pub close_time: i64,
    pub open_price: String,
    pub high_price: String,
    pub low_price: String,
    pub last_price: String,
    pub volume: String,
}

/// Binance error body, e.g. `{"code":-1121,"msg":"Invalid symbol."}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

// Custom error type for a kline row for better error messages.
#[derive(Debug, PartialEq)]
pub enum KlineRowError {
    InvalidLength(usize),
    InvalidType(&'static str),
}

impl fmt::Display for KlineRowError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KlineRowError::InvalidLength(len) => write!(f, "kline row has {} fields, need 6", len),
            KlineRowError::InvalidType(field) => write!(f, "kline field `{}` is not numeric", field),
        }
    }
}

impl From<KlineRowError> for MarketDataError {
    fn from(e: KlineRowError) -> Self {
        MarketDataError::InvalidResponse(e.to_string())
    }
}

/// Numbers come back either as JSON numbers or as decimal strings depending on the field.
fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}

fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

impl TryFrom<Vec<Value>> for KlineRecord {
    type Error = KlineRowError;

    fn try_from(row: Vec<Value>) -> Result<Self, Self::Error> {
        if row.len() < 6 {
            return Err(KlineRowError::InvalidLength(row.len()));
        }
        let field = |idx: usize, name: &'static str| {
            value_to_f64(&row[idx]).ok_or(KlineRowError::InvalidType(name))
        };
        Ok(KlineRecord {
            open_time: value_to_i64(&row[0]).ok_or(KlineRowError::InvalidType("openTime"))?,
            open: field(1, "open")?,
            high: field(2, "high")?,
            low: field(3, "low")?,
            close: field(4, "close")?,
            volume: field(5, "volume")?,
        })
    }
}

/// Decode a klines response body into records, in exchange order.
pub fn decode_klines(body: &str) -> Result<Vec<KlineRecord>, MarketDataError> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(body)?;
    rows.into_iter()
        .map(|row| KlineRecord::try_from(row).map_err(MarketDataError::from))
        .collect()
}

pub fn decode_ticker(body: &str) -> Result<TickerSnapshot, MarketDataError> {
    Ok(serde_json::from_str(body)?)
}
