//! Binance-specific configuration constants and types.

/// Configuration for the Binance REST API client
/// (This is the runtime struct used by the Http Client; the CLI may override the base url)
#[derive(Debug, Clone)]
pub struct BinanceApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub klines_limit: u32,
}

impl Default for BinanceApiConfig {
    fn default() -> Self {
        Self {
            base_url: BINANCE.rest.base_url.to_string(),
            timeout_ms: BINANCE.client.timeout_ms,
            klines_limit: BINANCE.limits.klines_limit,
        }
    }
}

impl BinanceApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// REST endpoints used by the dashboard
pub struct RestEndpoints {
    pub base_url: &'static str,
    /// Historical candles for a (symbol, interval)
    pub klines_path: &'static str,
    /// Rolling 24h ticker snapshot for a symbol
    pub ticker_24hr_path: &'static str,
}

/// Configuration for REST API Limits
pub struct RestLimits {
    /// Number of klines requested in a single call. Binance caps this at 1000, default is 500.
    pub klines_limit: u32,
}

/// Default values for the Rest Client
pub struct ClientDefaults {
    pub timeout_ms: u64,
}

/// The Master Configuration Struct
pub struct BinanceConfig {
    pub rest: RestEndpoints,
    pub limits: RestLimits,
    pub client: ClientDefaults,
}

pub const BINANCE: BinanceConfig = BinanceConfig {
    rest: RestEndpoints {
        base_url: "https://api.binance.com",
        klines_path: "/api/v3/klines",
        ticker_24hr_path: "/api/v3/ticker/24hr",
    },
    limits: RestLimits { klines_limit: 500 },
    client: ClientDefaults { timeout_ms: 10_000 },
};
