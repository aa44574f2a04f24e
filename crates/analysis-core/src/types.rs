use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AnalysisError;

/// One trading session (OHLCV)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Candle {
    /// True when the session closed above its open.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// Ordered daily series for a single instrument.
///
/// Construction validates the series once; every analysis step afterwards
/// can index the latest sessions without re-checking ordering or emptiness.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    candles: Vec<Candle>,
}

impl PriceSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self, AnalysisError> {
        if candles.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }

        for candle in &candles {
            let prices = [candle.open, candle.high, candle.low, candle.close];
            if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
                return Err(AnalysisError::InvalidData(format!(
                    "non-positive or non-finite price on {}",
                    candle.date
                )));
            }
        }

        if let Some(pair) = candles.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(AnalysisError::InvalidData(format!(
                "dates must be strictly increasing ({} followed by {})",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self { candles })
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Always false for a constructed series.
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Most recent session.
    pub fn latest(&self) -> &Candle {
        // non-empty by construction
        &self.candles[self.candles.len() - 1]
    }

    /// Session before the latest, if the series has one.
    pub fn previous(&self) -> Option<&Candle> {
        self.candles.len().checked_sub(2).map(|i| &self.candles[i])
    }

    /// Trailing `n` sessions (fewer when the series is shorter), earliest first.
    pub fn tail(&self, n: usize) -> &[Candle] {
        &self.candles[self.candles.len().saturating_sub(n)..]
    }

    pub fn first_date(&self) -> NaiveDate {
        self.candles[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.latest().date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(day: u32, close: f64) -> Candle {
        Candle {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn test_empty_series_rejected() {
        let result = PriceSeries::new(vec![]);
        assert!(matches!(result, Err(AnalysisError::EmptySeries)));
    }

    #[test]
    fn test_unordered_dates_rejected() {
        let result = PriceSeries::new(vec![candle(2, 10.0), candle(1, 11.0)]);
        assert!(matches!(result, Err(AnalysisError::InvalidData(_))));
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let result = PriceSeries::new(vec![candle(1, 10.0), candle(1, 11.0)]);
        assert!(matches!(result, Err(AnalysisError::InvalidData(_))));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let mut bad = candle(1, 10.0);
        bad.low = 0.0;
        assert!(PriceSeries::new(vec![bad]).is_err());

        let mut nan = candle(1, 10.0);
        nan.close = f64::NAN;
        assert!(PriceSeries::new(vec![nan]).is_err());
    }

    #[test]
    fn test_tail_and_neighbours() {
        let series = PriceSeries::new((1..=6).map(|d| candle(d, d as f64 * 10.0)).collect()).unwrap();

        assert_eq!(series.len(), 6);
        assert_eq!(series.latest().close, 60.0);
        assert_eq!(series.previous().unwrap().close, 50.0);
        assert_eq!(series.tail(3).len(), 3);
        assert_eq!(series.tail(3)[0].close, 40.0);
        assert_eq!(series.tail(100).len(), 6);
    }

    #[test]
    fn test_single_session_has_no_previous() {
        let series = PriceSeries::new(vec![candle(1, 10.0)]).unwrap();
        assert!(series.previous().is_none());
        assert!(!series.is_empty());
    }

    #[test]
    fn test_candle_deserializes_from_json() {
        let json = r#"{"date":"2024-03-01","open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":42}"#;
        let c: Candle = serde_json::from_str(json).unwrap();
        assert_eq!(c.volume, 42);
        assert!(c.is_bullish());
    }
}
