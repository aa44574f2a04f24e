use analysis_core::{AnalysisError, Candle, PriceSeries};
use serde::Serialize;

pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;
pub const VOLATILITY_PERIOD: usize = 20;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
/// Trading sessions per year used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Simple Moving Average of the trailing `period` values, latest only
pub fn sma(data: &[f64], period: usize) -> Option<f64> {
    if period == 0 || data.len() < period {
        return None;
    }

    let window = &data[data.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Smoothing factor for an EMA of the given span.
fn ema_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Exponential Moving Average, recursive form seeded with the first observation
pub fn ema(data: &[f64], span: usize) -> Option<f64> {
    if span == 0 {
        return None;
    }

    let alpha = ema_alpha(span);
    let (first, rest) = data.split_first()?;
    Some(rest.iter().fold(*first, |prev, &x| prev + alpha * (x - prev)))
}

/// Relative Strength Index over the trailing `period` close-to-close deltas.
///
/// Uses simple averages of gains and losses across the window. When the
/// window contains no losses the RSI is exactly 100.
pub fn rsi(data: &[f64], period: usize) -> Option<f64> {
    if period == 0 || data.len() < period + 1 {
        return None;
    }

    let window = &data[data.len() - period - 1..];
    let (gains, losses) = window.windows(2).fold((0.0, 0.0), |(g, l), w| {
        let change = w[1] - w[0];
        if change > 0.0 {
            (g + change, l)
        } else {
            (g, l - change)
        }
    });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

/// Latest MACD triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdSnapshot {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD (Moving Average Convergence Divergence).
///
/// Both price EMAs and the signal EMA are seeded with their first input and
/// advanced in a single pass, so no intermediate series is retained. The
/// value is reported once the series covers the slow span.
pub fn macd(data: &[f64], fast_period: usize, slow_period: usize, signal_period: usize) -> Option<MacdSnapshot> {
    if fast_period == 0 || signal_period == 0 || slow_period < fast_period || data.len() < slow_period {
        return None;
    }

    let fast_alpha = ema_alpha(fast_period);
    let slow_alpha = ema_alpha(slow_period);
    let signal_alpha = ema_alpha(signal_period);

    let (first, rest) = data.split_first()?;
    let mut fast = *first;
    let mut slow = *first;
    let mut signal = fast - slow;

    for &close in rest {
        fast += fast_alpha * (close - fast);
        slow += slow_alpha * (close - slow);
        signal += signal_alpha * ((fast - slow) - signal);
    }

    let macd = fast - slow;
    Some(MacdSnapshot {
        macd,
        signal,
        histogram: macd - signal,
    })
}

/// True range of `candle`; without a previous close it is the session range.
pub fn true_range(candle: &Candle, prev_close: Option<f64>) -> f64 {
    let high_low = candle.high - candle.low;
    match prev_close {
        Some(prev) => high_low
            .max((candle.high - prev).abs())
            .max((candle.low - prev).abs()),
        None => high_low,
    }
}

/// Average True Range: simple mean of the trailing `period` true ranges
pub fn atr(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period {
        return None;
    }

    let start = candles.len() - period;
    let total: f64 = (start..candles.len())
        .map(|i| {
            let prev_close = i.checked_sub(1).map(|p| candles[p].close);
            true_range(&candles[i], prev_close)
        })
        .sum();

    Some(total / period as f64)
}

/// Annualized volatility in percent: sample standard deviation of the
/// trailing `period` daily returns, scaled by sqrt(252) * 100.
pub fn annualized_volatility(data: &[f64], period: usize) -> Option<f64> {
    if period < 2 || data.len() < period + 1 {
        return None;
    }

    let window = &data[data.len() - period - 1..];
    let returns: Vec<f64> = window.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt() * 100.0)
}

/// Simple moving averages of close over 5, 10, 20 and 60 sessions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MovingAverages {
    pub ma5: f64,
    pub ma10: f64,
    pub ma20: f64,
    pub ma60: f64,
}

/// Latest indicator values. `None` marks an indicator whose window is not
/// yet full for the given series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub ma5: Option<f64>,
    pub ma10: Option<f64>,
    pub ma20: Option<f64>,
    pub ma60: Option<f64>,
    pub rsi14: Option<f64>,
    pub macd: Option<MacdSnapshot>,
    pub atr14: Option<f64>,
    pub volatility_20d: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn compute(series: &PriceSeries) -> Self {
        let closes = series.closes();

        Self {
            ma5: sma(&closes, 5),
            ma10: sma(&closes, 10),
            ma20: sma(&closes, 20),
            ma60: sma(&closes, 60),
            rsi14: rsi(&closes, RSI_PERIOD),
            macd: macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL),
            atr14: atr(series.candles(), ATR_PERIOD),
            volatility_20d: annualized_volatility(&closes, VOLATILITY_PERIOD),
        }
    }

    /// Names of the indicators that are unavailable.
    pub fn missing(&self) -> Vec<&'static str> {
        let checks = [
            ("MA5", self.ma5.is_some()),
            ("MA10", self.ma10.is_some()),
            ("MA20", self.ma20.is_some()),
            ("MA60", self.ma60.is_some()),
            ("RSI14", self.rsi14.is_some()),
            ("MACD", self.macd.is_some()),
            ("ATR14", self.atr14.is_some()),
            ("Volatility_20d", self.volatility_20d.is_some()),
        ];

        checks
            .iter()
            .filter(|(_, available)| !available)
            .map(|(name, _)| *name)
            .collect()
    }

    /// Converts to a fully populated set, failing if any window was short.
    pub fn complete(&self) -> Result<Indicators, AnalysisError> {
        match (
            self.ma5,
            self.ma10,
            self.ma20,
            self.ma60,
            self.rsi14,
            self.macd,
            self.atr14,
            self.volatility_20d,
        ) {
            (Some(ma5), Some(ma10), Some(ma20), Some(ma60), Some(rsi14), Some(macd), Some(atr14), Some(volatility_20d)) => {
                Ok(Indicators {
                    ma: MovingAverages { ma5, ma10, ma20, ma60 },
                    rsi14,
                    macd,
                    atr14,
                    volatility_20d,
                })
            }
            _ => Err(AnalysisError::InsufficientData(format!(
                "unavailable indicators: {}",
                self.missing().join(", ")
            ))),
        }
    }
}

/// Fully populated indicator set for the latest session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Indicators {
    pub ma: MovingAverages,
    pub rsi14: f64,
    pub macd: MacdSnapshot,
    pub atr14: f64,
    pub volatility_20d: f64,
}
