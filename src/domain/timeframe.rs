//! Supported candle bucket widths, named by their exchange interval codes.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::utils::TimeUtils;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Timeframe {
    #[default]
    #[strum(serialize = "1m")]
    #[serde(rename = "1m")]
    M1,
    #[strum(serialize = "5m")]
    #[serde(rename = "5m")]
    M5,
    #[strum(serialize = "15m")]
    #[serde(rename = "15m")]
    M15,
    #[strum(serialize = "30m")]
    #[serde(rename = "30m")]
    M30,
    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    H1,
    #[strum(serialize = "2h")]
    #[serde(rename = "2h")]
    H2,
    #[strum(serialize = "4h")]
    #[serde(rename = "4h")]
    H4,
    #[strum(serialize = "6h")]
    #[serde(rename = "6h")]
    H6,
    #[strum(serialize = "12h")]
    #[serde(rename = "12h")]
    H12,
    #[strum(serialize = "1d")]
    #[serde(rename = "1d")]
    D1,
    #[strum(serialize = "3d")]
    #[serde(rename = "3d")]
    D3,
    #[strum(serialize = "1w")]
    #[serde(rename = "1w")]
    W1,
}

impl Timeframe {
    /// The interval code sent to the exchange (`interval=` query parameter).
    pub fn code(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::M30 => "30m",
            Timeframe::H1 => "1h",
            Timeframe::H2 => "2h",
            Timeframe::H4 => "4h",
            Timeframe::H6 => "6h",
            Timeframe::H12 => "12h",
            Timeframe::D1 => "1d",
            Timeframe::D3 => "3d",
            Timeframe::W1 => "1w",
        }
    }

    pub fn to_ms(&self) -> i64 {
        match self {
            Timeframe::M1 => TimeUtils::MS_IN_MIN,
            Timeframe::M5 => TimeUtils::MS_IN_5_MIN,
            Timeframe::M15 => TimeUtils::MS_IN_15_MIN,
            Timeframe::M30 => TimeUtils::MS_IN_30_MIN,
            Timeframe::H1 => TimeUtils::MS_IN_H,
            Timeframe::H2 => TimeUtils::MS_IN_2_H,
            Timeframe::H4 => TimeUtils::MS_IN_4_H,
            Timeframe::H6 => TimeUtils::MS_IN_6_H,
            Timeframe::H12 => TimeUtils::MS_IN_12_H,
            Timeframe::D1 => TimeUtils::MS_IN_D,
            Timeframe::D3 => TimeUtils::MS_IN_3_D,
            Timeframe::W1 => TimeUtils::MS_IN_W,
        }
    }

    pub fn to_secs(&self) -> i64 {
        self.to_ms() / TimeUtils::MS_IN_S
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn codes_match_exchange_order() {
        let codes: Vec<&str> = Timeframe::iter().map(|tf| tf.code()).collect();
        assert_eq!(
            codes,
            ["1m", "5m", "15m", "30m", "1h", "2h", "4h", "6h", "12h", "1d", "3d", "1w"]
        );
    }

    #[test]
    fn display_and_parse_use_the_code() {
        for tf in Timeframe::iter() {
            assert_eq!(tf.to_string(), tf.code());
            assert_eq!(Timeframe::from_str(tf.code()).unwrap(), tf);
        }
        assert!(Timeframe::from_str("1M").is_err());
    }

    #[test]
    fn widths_are_increasing() {
        let widths: Vec<i64> = Timeframe::iter().map(|tf| tf.to_ms()).collect();
        assert!(widths.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Timeframe::H4.to_secs(), 4 * 3600);
    }

    #[test]
    fn serde_uses_the_code() {
        let json = serde_json::to_string(&Timeframe::H12).unwrap();
        assert_eq!(json, "\"12h\"");
        let back: Timeframe = serde_json::from_str("\"3d\"").unwrap();
        assert_eq!(back, Timeframe::D3);
    }
}
