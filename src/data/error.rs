use std::error::Error;
use std::fmt;

/// Failures at the market-data fetch boundary.
///
/// The view collapses both kinds into one "error" state; the distinction only
/// shows up in logs and the status bar tooltip.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Transport failure, timeout or non-success HTTP status.
    Network(String),
    /// The payload could not be parsed into the expected shape.
    InvalidResponse(String),
}

impl fmt::Display for MarketDataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MarketDataError::Network(msg) => write!(f, "Network error: {}", msg),
            MarketDataError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl Error for MarketDataError {}

impl From<reqwest::Error> for MarketDataError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            MarketDataError::InvalidResponse(e.to_string())
        } else {
            MarketDataError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for MarketDataError {
    fn from(e: serde_json::Error) -> Self {
        MarketDataError::InvalidResponse(e.to_string())
    }
}
