//! Report narrative blocks.
//!
//! Each block is a fixed template filled from values that have already been
//! computed. The only arithmetic done here is day-over-day deltas, candle
//! geometry and five-session aggregates.

use analysis_core::{Candle, PriceSeries};
use serde::{Deserialize, Serialize};

use crate::candles::{range_pct, CandleShape};
use crate::classifier::TrendClassification;
use crate::indicators::{Indicators, MovingAverages};
use crate::levels::{Channel, SupportResistance};
use crate::rules::{first_match, pick, Rule};

/// Annualized volatility (%) thresholds for the high and moderate levels.
const HIGH_VOLATILITY_PCT: f64 = 15.0;
const MODERATE_VOLATILITY_PCT: f64 = 10.0;
/// Mean five-session range (%) above which the window is high-volatility.
const HIGH_DAILY_RANGE_PCT: f64 = 1.5;
/// Prior sessions averaged when judging whether today's volume is active.
const VOLUME_BASELINE_SESSIONS: usize = 4;
pub const NARRATIVE_WINDOW: usize = 5;

/// Display names and units used in the narrative text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentProfile {
    pub instrument: String,
    pub currency: String,
    pub price_unit: String,
    pub volume_unit: String,
}

impl Default for InstrumentProfile {
    fn default() -> Self {
        Self {
            instrument: "COMEX gold futures".to_string(),
            currency: "USD".to_string(),
            price_unit: "USD/oz".to_string(),
            volume_unit: "contracts".to_string(),
        }
    }
}

/// Absolute and percentage change from `from` to `to`
pub fn change(from: f64, to: f64) -> (f64, f64) {
    let delta = to - from;
    (delta, delta / from * 100.0)
}

fn direction_verb(delta: f64) -> &'static str {
    if delta > 0.0 {
        "rose"
    } else if delta < 0.0 {
        "fell"
    } else {
        "was unchanged at"
    }
}

/// Formats a volume with thousands separators.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Morning-briefing style headline block
pub fn summary(
    profile: &InstrumentProfile,
    latest: &Candle,
    previous_close: f64,
    labels: &TrendClassification,
    band: &SupportResistance,
) -> String {
    let (delta, delta_pct) = change(previous_close, latest.close);

    format!(
        "[Core view] As of the latest close, {instrument} settled at {close:.2} {unit}, \
         {verb} {abs:.2} {currency} on the day ({pct:+.2}%). The technical picture is {trend}, \
         with the moving averages in {ma}, momentum showing a MACD {macd} and RSI in the {rsi}. \
         On balance the short-term outlook is {trend}; watch the {support:.2}-{resistance:.2} {unit} band.",
        instrument = profile.instrument,
        close = latest.close,
        unit = profile.price_unit,
        verb = direction_verb(delta),
        abs = delta.abs(),
        currency = profile.currency,
        pct = delta_pct,
        trend = labels.trend.label(),
        ma = labels.ma_trend.label(),
        macd = labels.macd_signal.label(),
        rsi = labels.rsi_signal.label(),
        support = band.support,
        resistance = band.resistance,
    )
}

fn rsi_level(rsi: f64) -> &'static str {
    if rsi > 70.0 {
        "overbought"
    } else if rsi < 30.0 {
        "oversold"
    } else {
        "neutral"
    }
}

fn volatility_level(volatility: f64) -> &'static str {
    if volatility > HIGH_VOLATILITY_PCT {
        "high"
    } else if volatility > MODERATE_VOLATILITY_PCT {
        "moderate"
    } else {
        "low"
    }
}

/// Indicator readings written up as supporting evidence
pub fn indicator_evidence(profile: &InstrumentProfile, ind: &Indicators) -> String {
    let ma = &ind.ma;
    let hist_up = ind.macd.histogram > 0.0;

    format!(
        "[Moving averages] MA5 is {ma5:.2} {unit}, MA10 {ma10:.2} {unit}, MA20 {ma20:.2} {unit} \
         and MA60 {ma60:.2} {unit}. The short-term average is running {cross} the medium-term average, \
         showing {momentum} momentum.\n\n\
         [Momentum] RSI14 reads {rsi:.2}, at the {rsi_level} level; the MACD fast line is {macd:.2}, \
         the slow line {signal:.2} and the histogram {hist:.2}, {macd_cross}, with a {bias} bias.\n\n\
         [Volatility] ATR14 averages {atr:.2} {currency} and 20-session annualized volatility is \
         {vol:.2}%, a {vol_level} level of market volatility.",
        ma5 = ma.ma5,
        ma10 = ma.ma10,
        ma20 = ma.ma20,
        ma60 = ma.ma60,
        unit = profile.price_unit,
        cross = pick(ma.ma5 > ma.ma10, "above", "below"),
        momentum = pick(ma.ma5 > ma.ma20, "bullish", "bearish"),
        rsi = ind.rsi14,
        rsi_level = rsi_level(ind.rsi14),
        macd = ind.macd.macd,
        signal = ind.macd.signal,
        hist = ind.macd.histogram,
        macd_cross = pick(hist_up, "a golden cross pointing up", "a death cross pointing down"),
        bias = pick(hist_up, "bullish", "bearish"),
        atr = ind.atr14,
        currency = profile.currency,
        vol = ind.volatility_20d,
        vol_level = volatility_level(ind.volatility_20d),
    )
}

/// Mean volume of the sessions just before the latest one.
fn baseline_volume(series: &PriceSeries) -> Option<f64> {
    let recent = series.tail(VOLUME_BASELINE_SESSIONS + 1);
    let prior = &recent[..recent.len() - 1];
    if prior.is_empty() {
        return None;
    }
    Some(prior.iter().map(|c| c.volume as f64).sum::<f64>() / prior.len() as f64)
}

/// Session tape and candle shape of the latest day
pub fn daily_commentary(profile: &InstrumentProfile, series: &PriceSeries) -> String {
    let today = series.latest();
    let shape = CandleShape::of(today);
    let active = baseline_volume(series).is_some_and(|avg| today.volume as f64 > avg);

    format!(
        "[Session] {instrument} opened at {open:.2} {unit}, traded as high as {high:.2} {unit} \
         and as low as {low:.2} {unit}, an intraday range of {range:.2}%, and closed at {close:.2} {unit}. \
         Volume came in at {volume} {volume_unit}, {activity} trading.\n\n\
         [Candle] The daily candle closed {color} with a {body} body and {wicks} wicks; \
         the {side} hold the upper hand.",
        instrument = profile.instrument,
        open = today.open,
        high = today.high,
        low = today.low,
        close = today.close,
        unit = profile.price_unit,
        range = range_pct(today),
        volume = group_thousands(today.volume),
        volume_unit = profile.volume_unit,
        activity = pick(active, "active", "quiet"),
        color = pick(shape.bullish, "bullish", "bearish"),
        body = pick(shape.has_large_body(), "large", "small"),
        wicks = pick(shape.has_balanced_wicks(), "balanced", "asymmetric"),
        side = pick(shape.bullish, "bulls", "bears"),
    )
}

/// Volume change in percent; unavailable when the earlier session traded nothing.
fn volume_change_pct(yesterday: &Candle, today: &Candle) -> Option<f64> {
    if yesterday.volume == 0 {
        return None;
    }
    let (_, pct) = change(yesterday.volume as f64, today.volume as f64);
    Some(pct)
}

/// Today versus yesterday: price, volume and range
pub fn day_over_day(profile: &InstrumentProfile, today: &Candle, yesterday: &Candle) -> String {
    let (delta, delta_pct) = change(yesterday.close, today.close);
    let continuation = today.is_bullish() == yesterday.is_bullish();

    let volume_line = match volume_change_pct(yesterday, today) {
        Some(vol_pct) => {
            let confirmed = (delta > 0.0) == (vol_pct > 0.0);
            format!(
                "[Volume] Volume {dir} {abs:.1}% from the prior session; {verdict}.",
                dir = pick(vol_pct > 0.0, "expanded", "contracted"),
                abs = vol_pct.abs(),
                verdict = pick(
                    confirmed,
                    "volume and price confirm each other",
                    "volume and price diverge, which warrants caution"
                ),
            )
        }
        None => "[Volume] Volume change is unavailable because the prior session recorded no volume.".to_string(),
    };

    let today_range = today.high - today.low;
    let yesterday_range = yesterday.high - yesterday.low;

    format!(
        "[Price] Against the previous session the price {dir} {abs:.2} {currency} ({pct:+.2}%), \
         {flow} the prior day's {prior}.\n\n\
         {volume_line}\n\n\
         [Range] The intraday range was {today_range:.2}% against {yesterday_range:.2}% the day before; \
         volatility is {widening}.",
        dir = pick(delta > 0.0, "rose", "fell"),
        abs = delta.abs(),
        currency = profile.currency,
        pct = delta_pct,
        flow = pick(continuation, "continuing", "reversing"),
        prior = pick(yesterday.is_bullish(), "advance", "decline"),
        volume_line = volume_line,
        today_range = range_pct(today),
        yesterday_range = range_pct(yesterday),
        widening = pick(today_range > yesterday_range, "widening", "narrowing"),
    )
}

/// Conditions under which each of the three market readings would be invalidated
pub fn invalidation_conditions(profile: &InstrumentProfile, ma: &MovingAverages, channel: &Channel) -> String {
    format!(
        "[Bullish invalidation] A decisive break below the MA20 support at {ma20:.2} {unit}, together with \
         RSI dropping under the 50 midline, would invalidate the short-term bullish setup and call for \
         a fresh look at the trend.\n\n\
         [Bearish invalidation] A decisive break above the MA60 resistance at {ma60:.2} {unit}, together with \
         a MACD bullish cross, would invalidate the short-term bearish setup and could open a rebound.\n\n\
         [Range invalidation] A move above the 20-session high of {high:.2} {unit} or below the 20-session \
         low of {low:.2} {unit} on clearly expanding volume would end the range regime; positioning \
         should then follow the break.",
        ma20 = ma.ma20,
        ma60 = ma.ma60,
        high = channel.high,
        low = channel.low,
        unit = profile.price_unit,
    )
}

/// Direction of the five-session window, first close against last close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowTrend {
    Up,
    Down,
    Flat,
}

impl WindowTrend {
    fn description(&self) -> &'static str {
        match self {
            WindowTrend::Up => "drifted higher in choppy trade",
            WindowTrend::Down => "drifted lower in choppy trade",
            WindowTrend::Flat => "held a narrow range",
        }
    }

    fn outcome(&self) -> &'static str {
        match self {
            WindowTrend::Up => "gain",
            WindowTrend::Down => "loss",
            WindowTrend::Flat => "change",
        }
    }

    fn bias(&self) -> &'static str {
        match self {
            WindowTrend::Up => "upward",
            WindowTrend::Down => "downward",
            WindowTrend::Flat => "neutral",
        }
    }
}

const WINDOW_RULES: &[Rule<(f64, f64), WindowTrend>] = &[
    Rule { predicate: |w| w.1 > w.0, outcome: WindowTrend::Up },
    Rule { predicate: |w| w.1 < w.0, outcome: WindowTrend::Down },
];

pub fn window_trend(first_close: f64, last_close: f64) -> WindowTrend {
    first_match(WINDOW_RULES, &(first_close, last_close), WindowTrend::Flat)
}

/// Story of the trailing five sessions, independent of the main classifier
pub fn five_day_narrative(profile: &InstrumentProfile, series: &PriceSeries) -> String {
    let window = series.tail(NARRATIVE_WINDOW);
    // non-empty: a constructed series has at least one session
    let first = &window[0];
    let last = &window[window.len() - 1];
    let n = window.len() as f64;

    let trend = window_trend(first.close, last.close);
    let (delta, delta_pct) = change(first.close, last.close);

    let high = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let mean_close = window.iter().map(|c| c.close).sum::<f64>() / n;
    let mean_range = window.iter().map(range_pct).sum::<f64>() / n;

    format!(
        "[Five-day review] Over the past {count} sessions ({start}-{end}), {instrument} {story}. \
         It opened the window at {first:.2} {unit}, reached a high of {high:.2} {unit} and a low of \
         {low:.2} {unit}, and last closed at {last:.2} {unit}, a cumulative {outcome} of {abs:.2} {currency} \
         ({pct:+.2}%).\n\n\
         [Character] The five-session average close is {mean:.2} {unit} with an average daily range of \
         {range:.2}%, a {vol}-volatility profile. The price center of gravity is shifting {center} and the \
         short-term direction is {bias}.",
        count = window.len(),
        start = first.date.format("%m-%d"),
        end = last.date.format("%m-%d"),
        instrument = profile.instrument,
        story = trend.description(),
        first = first.close,
        high = high,
        low = low,
        last = last.close,
        unit = profile.price_unit,
        outcome = trend.outcome(),
        abs = delta.abs(),
        currency = profile.currency,
        pct = delta_pct,
        mean = mean_close,
        range = mean_range,
        vol = pick(mean_range > HIGH_DAILY_RANGE_PCT, "high", "low"),
        center = pick(last.close > mean_close, "higher", "lower"),
        bias = trend.bias(),
    )
}
