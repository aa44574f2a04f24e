use analysis_core::Candle;

/// Body share of the range above which a candle body counts as large.
pub const LARGE_BODY_RATIO: f64 = 0.5;
/// Wick imbalance, as a share of the range, below which wicks are balanced.
pub const BALANCED_WICK_RATIO: f64 = 0.2;

/// Session geometry derived from a single candle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleShape {
    pub body: f64,
    pub range: f64,
    pub upper_wick: f64,
    pub lower_wick: f64,
    pub bullish: bool,
}

impl CandleShape {
    pub fn of(candle: &Candle) -> Self {
        Self {
            body: (candle.close - candle.open).abs(),
            range: candle.high - candle.low,
            upper_wick: candle.high - candle.open.max(candle.close),
            lower_wick: candle.open.min(candle.close) - candle.low,
            bullish: candle.is_bullish(),
        }
    }

    pub fn has_large_body(&self) -> bool {
        self.body > self.range * LARGE_BODY_RATIO
    }

    pub fn has_balanced_wicks(&self) -> bool {
        (self.upper_wick - self.lower_wick).abs() < self.range * BALANCED_WICK_RATIO
    }
}

/// High-low range as a percentage of the close
pub fn range_pct(candle: &Candle) -> f64 {
    (candle.high - candle.low) / candle.close * 100.0
}
