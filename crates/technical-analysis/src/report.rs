use analysis_core::{Candle, PriceSeries};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::classifier::{MaAlignment, MacdSignal, RsiZone, Trend};
use crate::indicators::Indicators;
use crate::levels::SupportResistance;
use crate::narrative::change;

pub const HISTORY_WINDOW: usize = 5;
const UPDATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn serialize_update_time<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(UPDATE_TIME_FORMAT))
}

/// Complete daily review for one instrument
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Date of the latest session.
    pub date: NaiveDate,
    /// Snapshot time at which the report was generated.
    #[serde(serialize_with = "serialize_update_time")]
    pub update_time: NaiveDateTime,
    pub price: PriceBlock,
    pub indicators: IndicatorBlock,
    pub analysis: AnalysisBlock,
    pub historical_5d: Vec<HistoricalEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBlock {
    pub current: f64,
    pub change: f64,
    pub change_pct: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
}

impl PriceBlock {
    pub fn new(latest: &Candle, previous_close: f64) -> Self {
        let (change, change_pct) = change(previous_close, latest.close);
        Self {
            current: latest.close,
            change,
            change_pct,
            open: latest.open,
            high: latest.high,
            low: latest.low,
            volume: latest.volume,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorBlock {
    #[serde(rename = "MA5")]
    pub ma5: f64,
    #[serde(rename = "MA10")]
    pub ma10: f64,
    #[serde(rename = "MA20")]
    pub ma20: f64,
    #[serde(rename = "MA60")]
    pub ma60: f64,
    #[serde(rename = "RSI14")]
    pub rsi14: f64,
    #[serde(rename = "MACD")]
    pub macd: f64,
    #[serde(rename = "MACD_Signal")]
    pub macd_signal: f64,
    #[serde(rename = "MACD_Histogram")]
    pub macd_histogram: f64,
    #[serde(rename = "ATR14")]
    pub atr14: f64,
    #[serde(rename = "Volatility_20d")]
    pub volatility_20d: f64,
    pub support: f64,
    pub resistance: f64,
}

impl IndicatorBlock {
    pub fn new(ind: &Indicators, band: &SupportResistance) -> Self {
        Self {
            ma5: ind.ma.ma5,
            ma10: ind.ma.ma10,
            ma20: ind.ma.ma20,
            ma60: ind.ma.ma60,
            rsi14: ind.rsi14,
            macd: ind.macd.macd,
            macd_signal: ind.macd.signal,
            macd_histogram: ind.macd.histogram,
            atr14: ind.atr14,
            volatility_20d: ind.volatility_20d,
            support: band.support,
            resistance: band.resistance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisBlock {
    pub summary: String,
    pub trend: Trend,
    pub ma_trend: MaAlignment,
    pub rsi_signal: RsiZone,
    pub macd_signal: MacdSignal,
    pub evidence: String,
    pub commentary: String,
    pub comparison: String,
    pub invalidation: String,
    pub confidence_score: u8,
    pub narrative_5d: String,
}

/// One row of the closing-price history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalEntry {
    pub date: NaiveDate,
    pub close: f64,
    pub change_pct: f64,
}

/// Trailing closes, earliest first. Changes are measured within the slice,
/// so the first row has no predecessor and reports 0.
pub fn closing_history(series: &PriceSeries, sessions: usize) -> Vec<HistoricalEntry> {
    let window = series.tail(sessions);

    window
        .iter()
        .enumerate()
        .map(|(i, candle)| {
            let change_pct = match i.checked_sub(1) {
                Some(prev) => change(window[prev].close, candle.close).1,
                None => 0.0,
            };
            HistoricalEntry {
                date: candle.date,
                close: candle.close,
                change_pct,
            }
        })
        .collect()
}
