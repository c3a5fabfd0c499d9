//! Exchange records -> chart candles.

use std::collections::HashSet;

use crate::data::error::MarketDataError;
use crate::data::wire::{KlineRecord, TickerSnapshot};
use crate::domain::{Candle, Series};
use crate::utils::time_utils::epoch_ms_to_sec;

pub fn map_kline(record: &KlineRecord) -> Candle {
    Candle {
        time: epoch_ms_to_sec(record.open_time),
        open: record.open,
        high: record.high,
        low: record.low,
        close: record.close,
        volume: record.volume,
    }
}

/// Map a full klines response. The exchange already returns rows oldest first;
/// anything out of order or duplicated means the payload is not what we asked for.
pub fn map_klines(records: &[KlineRecord]) -> Result<Series, MarketDataError> {
    if has_duplicate_open_time(records) {
        return Err(MarketDataError::InvalidResponse(
            "duplicate kline open time".to_string(),
        ));
    }
    let series = Series::from_candles(records.iter().map(map_kline).collect());
    if !series.is_strictly_ascending() {
        return Err(MarketDataError::InvalidResponse(
            "klines are not in ascending time order".to_string(),
        ));
    }
    Ok(series)
}

fn has_duplicate_open_time(records: &[KlineRecord]) -> bool {
    let mut seen = HashSet::new();
    // `insert` returns false when the time was already present
    records.iter().any(|r| !seen.insert(r.open_time))
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<f64, MarketDataError> {
    raw.trim().parse::<f64>().map_err(|_| {
        MarketDataError::InvalidResponse(format!("ticker field `{}` is not a decimal: {:?}", field, raw))
    })
}

/// Synthesize the single "latest" candle from a 24h ticker snapshot.
/// The candle is stamped with the snapshot's close time and closes at the last traded price.
pub fn ticker_to_candle(snapshot: &TickerSnapshot) -> Result<Candle, MarketDataError> {
    Ok(Candle {
        time: epoch_ms_to_sec(snapshot.close_time),
        open: parse_decimal("openPrice", &snapshot.open_price)?,
        high: parse_decimal("highPrice", &snapshot.high_price)?,
        low: parse_decimal("lowPrice", &snapshot.low_price)?,
        close: parse_decimal("lastPrice", &snapshot.last_price)?,
        volume: parse_decimal("volume", &snapshot.volume)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(open_time: i64, open: f64, close: f64) -> KlineRecord {
        KlineRecord {
            open_time,
            open,
            high: open.max(close) + 1.0,
            low: open.min(close) - 1.0,
            close,
            volume: 5.0,
        }
    }

    #[test]
    fn time_is_floor_of_open_time_over_1000() {
        for open_time in [0, 999, 1_000, 1_499_040_000_123, 1_700_000_059_999] {
            let candle = map_kline(&record(open_time, 1.0, 2.0));
            assert_eq!(candle.time, open_time.div_euclid(1000));
        }
    }

    #[test]
    fn btcusdt_1m_series_is_ascending_and_well_formed() {
        let start = 1_700_000_040_000;
        let records: Vec<KlineRecord> = (0..30)
            .map(|i| {
                let open = 35_000.0 + i as f64;
                let close = if i % 2 == 0 { open + 3.5 } else { open - 2.0 };
                record(start + i * 60_000, open, close)
            })
            .collect();
        let series = map_klines(&records).unwrap();
        assert_eq!(series.len(), 30);
        assert!(series.is_strictly_ascending());
        assert!(series.candles().iter().all(|c| c.is_well_formed()));
        assert_eq!(series.candles()[1].time - series.candles()[0].time, 60);
    }

    #[test]
    fn duplicate_or_unordered_rows_are_rejected() {
        let dup = vec![record(60_000, 1.0, 2.0), record(60_000, 2.0, 3.0)];
        assert!(matches!(map_klines(&dup), Err(MarketDataError::InvalidResponse(_))));
        let backwards = vec![record(120_000, 1.0, 2.0), record(60_000, 2.0, 3.0)];
        assert!(matches!(map_klines(&backwards), Err(MarketDataError::InvalidResponse(_))));
        assert!(map_klines(&[]).unwrap().is_empty());
    }

    #[test]
    fn ticker_maps_to_single_candle() {
        let snapshot = TickerSnapshot {
            symbol: "BTCUSDT".into(),
            close_time: 1_700_086_399_999,
            open_price: "64000.10".into(),
            high_price: "65000.00".into(),
            low_price: "63000.50".into(),
            last_price: "64500.25".into(),
            volume: "12345.678".into(),
        };
        let candle = ticker_to_candle(&snapshot).unwrap();
        assert_eq!(candle.time, 1_700_086_399);
        assert_eq!(candle.open, 64000.10);
        assert_eq!(candle.high, 65000.00);
        assert_eq!(candle.low, 63000.50);
        assert_eq!(candle.close, 64500.25);
        assert_eq!(candle.volume, 12345.678);
    }

    #[test]
    fn ticker_with_garbage_price_is_invalid() {
        let snapshot = TickerSnapshot {
            symbol: String::new(),
            close_time: 0,
            open_price: "1".into(),
            high_price: "n/a".into(),
            low_price: "1".into(),
            last_price: "1".into(),
            volume: "1".into(),
        };
        assert!(matches!(
            ticker_to_candle(&snapshot),
            Err(MarketDataError::InvalidResponse(_))
        ));
    }
}
