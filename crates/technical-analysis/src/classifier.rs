use serde::Serialize;

use crate::indicators::{MacdSnapshot, MovingAverages};
use crate::rules::{first_match, Rule};

/// Moving-average configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MaAlignment {
    #[serde(rename = "strong bullish alignment")]
    StrongBullish,
    #[serde(rename = "strong bearish alignment")]
    StrongBearish,
    #[serde(rename = "mid-term bullish")]
    MidTermBullish,
    #[serde(rename = "mid-term bearish")]
    MidTermBearish,
    #[serde(rename = "moving averages entangled")]
    Entangled,
}

impl MaAlignment {
    pub fn label(&self) -> &'static str {
        match self {
            MaAlignment::StrongBullish => "strong bullish alignment",
            MaAlignment::StrongBearish => "strong bearish alignment",
            MaAlignment::MidTermBullish => "mid-term bullish",
            MaAlignment::MidTermBearish => "mid-term bearish",
            MaAlignment::Entangled => "moving averages entangled",
        }
    }
}

/// Overall trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    #[serde(rename = "strong uptrend")]
    StrongUptrend,
    #[serde(rename = "weak downtrend")]
    WeakDowntrend,
    #[serde(rename = "range-bound, bullish bias")]
    RangeBullishBias,
    #[serde(rename = "range-bound, bearish bias")]
    RangeBearishBias,
    #[serde(rename = "range-bound")]
    RangeBound,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::StrongUptrend => "strong uptrend",
            Trend::WeakDowntrend => "weak downtrend",
            Trend::RangeBullishBias => "range-bound, bullish bias",
            Trend::RangeBearishBias => "range-bound, bearish bias",
            Trend::RangeBound => "range-bound",
        }
    }
}

/// RSI zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RsiZone {
    #[serde(rename = "overbought")]
    Overbought,
    #[serde(rename = "oversold")]
    Oversold,
    #[serde(rename = "strong zone")]
    Strong,
    #[serde(rename = "weak zone")]
    Weak,
}

impl RsiZone {
    pub fn label(&self) -> &'static str {
        match self {
            RsiZone::Overbought => "overbought",
            RsiZone::Oversold => "oversold",
            RsiZone::Strong => "strong zone",
            RsiZone::Weak => "weak zone",
        }
    }
}

/// MACD state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MacdSignal {
    #[serde(rename = "bullish cross")]
    BullishCross,
    #[serde(rename = "bearish cross")]
    BearishCross,
    #[serde(rename = "bullish trend")]
    BullishTrend,
    #[serde(rename = "bearish trend")]
    BearishTrend,
}

impl MacdSignal {
    pub fn label(&self) -> &'static str {
        match self {
            MacdSignal::BullishCross => "bullish cross",
            MacdSignal::BearishCross => "bearish cross",
            MacdSignal::BullishTrend => "bullish trend",
            MacdSignal::BearishTrend => "bearish trend",
        }
    }
}

/// Latest close together with the moving averages it is ranked against
pub struct MaContext {
    pub close: f64,
    pub ma: MovingAverages,
}

const MA_RULES: &[Rule<MaContext, (MaAlignment, Trend)>] = &[
    Rule {
        predicate: |c| c.ma.ma5 > c.ma.ma10 && c.ma.ma10 > c.ma.ma20 && c.ma.ma20 > c.ma.ma60,
        outcome: (MaAlignment::StrongBullish, Trend::StrongUptrend),
    },
    Rule {
        predicate: |c| c.ma.ma5 < c.ma.ma10 && c.ma.ma10 < c.ma.ma20 && c.ma.ma20 < c.ma.ma60,
        outcome: (MaAlignment::StrongBearish, Trend::WeakDowntrend),
    },
    Rule {
        predicate: |c| c.close > c.ma.ma60,
        outcome: (MaAlignment::MidTermBullish, Trend::RangeBullishBias),
    },
    Rule {
        predicate: |c| c.close < c.ma.ma60,
        outcome: (MaAlignment::MidTermBearish, Trend::RangeBearishBias),
    },
];

// Exactly 70 and exactly 30 are extreme readings; exactly 50 is weak.
const RSI_RULES: &[Rule<f64, RsiZone>] = &[
    Rule { predicate: |rsi| *rsi >= 70.0, outcome: RsiZone::Overbought },
    Rule { predicate: |rsi| *rsi <= 30.0, outcome: RsiZone::Oversold },
    Rule { predicate: |rsi| *rsi > 50.0, outcome: RsiZone::Strong },
];

const MACD_RULES: &[Rule<MacdSnapshot, MacdSignal>] = &[
    Rule {
        predicate: |m| m.macd > m.signal && m.histogram > 0.0,
        outcome: MacdSignal::BullishCross,
    },
    Rule {
        predicate: |m| m.macd < m.signal && m.histogram < 0.0,
        outcome: MacdSignal::BearishCross,
    },
    Rule { predicate: |m| m.histogram > 0.0, outcome: MacdSignal::BullishTrend },
];

pub fn classify_ma(close: f64, ma: &MovingAverages) -> (MaAlignment, Trend) {
    let ctx = MaContext { close, ma: *ma };
    first_match(MA_RULES, &ctx, (MaAlignment::Entangled, Trend::RangeBound))
}

pub fn classify_rsi(rsi: f64) -> RsiZone {
    first_match(RSI_RULES, &rsi, RsiZone::Weak)
}

pub fn classify_macd(macd: &MacdSnapshot) -> MacdSignal {
    first_match(MACD_RULES, macd, MacdSignal::BearishTrend)
}

/// The four categorical labels describing the latest session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendClassification {
    pub trend: Trend,
    pub ma_trend: MaAlignment,
    pub rsi_signal: RsiZone,
    pub macd_signal: MacdSignal,
}

pub fn classify(close: f64, ma: &MovingAverages, rsi: f64, macd: &MacdSnapshot) -> TrendClassification {
    let (ma_trend, trend) = classify_ma(close, ma);

    TrendClassification {
        trend,
        ma_trend,
        rsi_signal: classify_rsi(rsi),
        macd_signal: classify_macd(macd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mas(ma5: f64, ma10: f64, ma20: f64, ma60: f64) -> MovingAverages {
        MovingAverages { ma5, ma10, ma20, ma60 }
    }

    fn macd(macd: f64, signal: f64) -> MacdSnapshot {
        MacdSnapshot { macd, signal, histogram: macd - signal }
    }

    #[test]
    fn test_strong_bullish_alignment() {
        let (ma, trend) = classify_ma(90.0, &mas(104.0, 103.0, 102.0, 100.0));
        // full ordering outranks the close being under MA60
        assert_eq!(ma, MaAlignment::StrongBullish);
        assert_eq!(trend, Trend::StrongUptrend);
    }

    #[test]
    fn test_strong_bearish_alignment() {
        let (ma, trend) = classify_ma(120.0, &mas(96.0, 97.0, 98.0, 100.0));
        assert_eq!(ma, MaAlignment::StrongBearish);
        assert_eq!(trend, Trend::WeakDowntrend);
    }

    #[test]
    fn test_mid_term_labels_from_close_vs_ma60() {
        let mixed = mas(101.0, 99.0, 102.0, 100.0);

        assert_eq!(classify_ma(105.0, &mixed), (MaAlignment::MidTermBullish, Trend::RangeBullishBias));
        assert_eq!(classify_ma(95.0, &mixed), (MaAlignment::MidTermBearish, Trend::RangeBearishBias));
        assert_eq!(classify_ma(100.0, &mixed), (MaAlignment::Entangled, Trend::RangeBound));
    }

    #[test]
    fn test_equal_averages_are_not_aligned() {
        let flat = mas(100.0, 100.0, 100.0, 100.0);
        assert_eq!(classify_ma(100.0, &flat).0, MaAlignment::Entangled);
    }

    #[test]
    fn test_rsi_boundaries() {
        assert_eq!(classify_rsi(70.0), RsiZone::Overbought);
        assert_eq!(classify_rsi(85.0), RsiZone::Overbought);
        assert_eq!(classify_rsi(30.0), RsiZone::Oversold);
        assert_eq!(classify_rsi(12.0), RsiZone::Oversold);
        assert_eq!(classify_rsi(50.0), RsiZone::Weak);
        assert_eq!(classify_rsi(50.01), RsiZone::Strong);
        assert_eq!(classify_rsi(69.99), RsiZone::Strong);
        assert_eq!(classify_rsi(30.01), RsiZone::Weak);
    }

    #[test]
    fn test_macd_labels() {
        assert_eq!(classify_macd(&macd(2.0, 1.0)), MacdSignal::BullishCross);
        assert_eq!(classify_macd(&macd(-2.0, -1.0)), MacdSignal::BearishCross);

        // histogram disagreeing with the line ordering falls through to the trend rows
        let odd_bull = MacdSnapshot { macd: 1.0, signal: 1.0, histogram: 0.5 };
        assert_eq!(classify_macd(&odd_bull), MacdSignal::BullishTrend);
        let flat = MacdSnapshot { macd: 1.0, signal: 1.0, histogram: 0.0 };
        assert_eq!(classify_macd(&flat), MacdSignal::BearishTrend);
    }

    #[test]
    fn test_classify_combines_labels() {
        let c = classify(110.0, &mas(108.0, 106.0, 104.0, 100.0), 65.0, &macd(1.5, 1.0));
        assert_eq!(c.trend, Trend::StrongUptrend);
        assert_eq!(c.ma_trend, MaAlignment::StrongBullish);
        assert_eq!(c.rsi_signal, RsiZone::Strong);
        assert_eq!(c.macd_signal, MacdSignal::BullishCross);
    }

    #[test]
    fn test_labels_serialize_as_phrases() {
        let json = serde_json::to_string(&Trend::RangeBullishBias).unwrap();
        assert_eq!(json, "\"range-bound, bullish bias\"");
        assert_eq!(serde_json::to_string(&RsiZone::Weak).unwrap(), "\"weak zone\"");
    }
}
