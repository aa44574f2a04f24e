use analysis_core::Candle;
use serde::Serialize;

use crate::indicators::MovingAverages;

/// Sessions covered by the recent high/low channel.
pub const CHANNEL_LOOKBACK: usize = 20;

/// Highest high and lowest low over a trailing window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Channel {
    pub high: f64,
    pub low: f64,
}

/// Extremes of the trailing `lookback` sessions (the whole slice when shorter).
pub fn channel(candles: &[Candle], lookback: usize) -> Option<Channel> {
    let recent = &candles[candles.len().saturating_sub(lookback)..];
    if recent.is_empty() {
        return None;
    }

    let high = recent.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let low = recent.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    Some(Channel { high, low })
}

/// Support and resistance band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SupportResistance {
    pub support: f64,
    pub resistance: f64,
}

/// Widens the recent channel with the moving averages: support is the lower
/// of MA20 and the channel low, resistance the higher of MA60 and the
/// channel high. Since the channel low never exceeds the channel high,
/// support <= resistance for any inputs.
pub fn support_resistance(ma: &MovingAverages, channel: &Channel) -> SupportResistance {
    SupportResistance {
        support: ma.ma20.min(channel.low),
        resistance: ma.ma60.max(channel.high),
    }
}
