//! Heuristic confidence rubric.
//!
//! The score is a sum of fixed adjustments around a neutral base, clamped to
//! 0..=100. It describes how strongly the indicators agree with each other;
//! it is not a calibrated probability of any outcome.

use crate::indicators::{MacdSnapshot, MovingAverages};

pub const BASE_SCORE: i32 = 50;
const MA_STACK_WEIGHT: i32 = 15;
const MA60_WEIGHT: i32 = 15;
const RSI_WEIGHT: i32 = 10;
const MACD_WEIGHT: i32 = 10;
const FULL_AGREEMENT_BONUS: i32 = 10;
const PARTIAL_AGREEMENT_BONUS: i32 = 5;

fn ma_stack_points(ma: &MovingAverages) -> i32 {
    if ma.ma5 > ma.ma10 && ma.ma10 > ma.ma20 {
        MA_STACK_WEIGHT
    } else if ma.ma5 < ma.ma10 && ma.ma10 < ma.ma20 {
        -MA_STACK_WEIGHT
    } else {
        0
    }
}

fn ma60_points(close: f64, ma60: f64) -> i32 {
    if close > ma60 {
        MA60_WEIGHT
    } else if close < ma60 {
        -MA60_WEIGHT
    } else {
        0
    }
}

fn rsi_points(rsi: f64) -> i32 {
    if (40.0..=60.0).contains(&rsi) {
        RSI_WEIGHT
    } else if rsi > 70.0 || rsi < 30.0 {
        -RSI_WEIGHT
    } else {
        0
    }
}

fn macd_points(histogram: f64) -> i32 {
    if histogram > 0.0 {
        MACD_WEIGHT
    } else {
        -MACD_WEIGHT
    }
}

/// Bonus for the bullish votes of MA5>MA20, RSI>50 and a positive histogram
/// pointing the same way. Unanimity in either direction earns the full bonus.
fn agreement_points(ma: &MovingAverages, rsi: f64, histogram: f64) -> i32 {
    let votes = [ma.ma5 > ma.ma20, rsi > 50.0, histogram > 0.0];
    let bullish = votes.iter().filter(|v| **v).count();

    match bullish {
        0 | 3 => FULL_AGREEMENT_BONUS,
        _ => PARTIAL_AGREEMENT_BONUS,
    }
}

/// Confidence score in 0..=100 for the latest session.
pub fn confidence_score(close: f64, ma: &MovingAverages, rsi: f64, macd: &MacdSnapshot) -> u8 {
    let score = BASE_SCORE
        + ma_stack_points(ma)
        + ma60_points(close, ma.ma60)
        + rsi_points(rsi)
        + macd_points(macd.histogram)
        + agreement_points(ma, rsi, macd.histogram);

    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mas(ma5: f64, ma10: f64, ma20: f64, ma60: f64) -> MovingAverages {
        MovingAverages { ma5, ma10, ma20, ma60 }
    }

    fn hist(h: f64) -> MacdSnapshot {
        MacdSnapshot { macd: h, signal: 0.0, histogram: h }
    }

    #[test]
    fn test_full_bullish_clamps_at_100() {
        // 50 + 15 + 15 + 10 + 10 + 10
        let score = confidence_score(110.0, &mas(108.0, 106.0, 104.0, 100.0), 55.0, &hist(1.0));
        assert_eq!(score, 100);
    }

    #[test]
    fn test_overbought_uptrend() {
        // 50 + 15 + 15 - 10 + 10 + 10
        let score = confidence_score(110.0, &mas(108.0, 106.0, 104.0, 100.0), 80.0, &hist(1.0));
        assert_eq!(score, 90);
    }

    #[test]
    fn test_full_bearish_agreement_still_gets_bonus() {
        // 50 - 15 - 15 - 10 - 10 + 10
        let score = confidence_score(90.0, &mas(92.0, 94.0, 96.0, 100.0), 20.0, &hist(-1.0));
        assert_eq!(score, 10);
    }

    #[test]
    fn test_neutral_mixed_reading() {
        // ma stack mixed (0), close == MA60 (0), RSI 65 (0), histogram 0 (-10),
        // votes: ma5>ma20 yes, rsi>50 yes, hist no -> partial (+5)
        let score = confidence_score(100.0, &mas(103.0, 101.0, 102.0, 100.0), 65.0, &hist(0.0));
        assert_eq!(score, 45);
    }

    #[test]
    fn test_rsi_band_edges() {
        assert_eq!(rsi_points(40.0), RSI_WEIGHT);
        assert_eq!(rsi_points(60.0), RSI_WEIGHT);
        assert_eq!(rsi_points(70.0), 0);
        assert_eq!(rsi_points(30.0), 0);
        assert_eq!(rsi_points(70.1), -RSI_WEIGHT);
        assert_eq!(rsi_points(29.9), -RSI_WEIGHT);
    }

    #[test]
    fn test_score_is_deterministic() {
        let ma = mas(101.0, 100.5, 100.0, 99.0);
        let a = confidence_score(100.0, &ma, 47.3, &hist(-0.2));
        let b = confidence_score(100.0, &ma, 47.3, &hist(-0.2));
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_bounds_over_grid() {
        let layouts = [
            mas(1.0, 2.0, 3.0, 4.0),
            mas(4.0, 3.0, 2.0, 1.0),
            mas(2.0, 1.0, 3.0, 2.5),
        ];
        for ma in &layouts {
            for close in [0.5, 2.5, 5.0] {
                for rsi in [0.0, 25.0, 45.0, 65.0, 100.0] {
                    for h in [-1.0, 0.0, 1.0] {
                        let s = confidence_score(close, ma, rsi, &hist(h));
                        assert!(s <= 100);
                    }
                }
            }
        }
    }
}
