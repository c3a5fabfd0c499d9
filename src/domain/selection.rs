use serde::{Deserialize, Serialize};

use crate::domain::Timeframe;

/// What the user is looking at: one pair at one timeframe.
/// Results from the exchange are keyed by the Selection they were requested for.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct Selection {
    pub timeframe: Timeframe,
    pub pair: String,
}

impl Selection {
    pub fn new(timeframe: Timeframe, pair: impl Into<String>) -> Self {
        Self {
            timeframe,
            pair: pair.into().trim().to_uppercase(),
        }
    }

    pub fn with_pair(&self, pair: impl Into<String>) -> Self {
        Self::new(self.timeframe, pair)
    }

    pub fn with_timeframe(&self, timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            pair: self.pair.clone(),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        use crate::config::DASHBOARD;
        Self::new(DASHBOARD.default_timeframe, DASHBOARD.default_pair)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.pair, self.timeframe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_normalised() {
        let s = Selection::new(Timeframe::H1, " btcusdt ");
        assert_eq!(s.pair, "BTCUSDT");
        assert_eq!(s.to_string(), "BTCUSDT 1h");
    }

    #[test]
    fn with_helpers_change_one_field() {
        let s = Selection::new(Timeframe::M1, "BTCUSDT");
        assert_eq!(s.with_pair("ethusdt"), Selection::new(Timeframe::M1, "ETHUSDT"));
        assert_eq!(s.with_timeframe(Timeframe::D1).pair, "BTCUSDT");
        assert_ne!(s.with_timeframe(Timeframe::D1), s);
    }
}
