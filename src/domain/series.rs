use serde::{Deserialize, Serialize};

use crate::domain::Candle;

/// Candles for one selection, ascending by time. Replaced wholesale, never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    candles: Vec<Candle>,
}

impl Series {
    /// Callers are expected to hand over candles already in time order
    /// (the mapper rejects anything else).
    pub fn from_candles(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    pub fn single(candle: Candle) -> Self {
        Self {
            candles: vec![candle],
        }
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn is_strictly_ascending(&self) -> bool {
        self.candles.windows(2).all(|w| w[0].time < w[1].time)
    }
}
