use analysis_core::{AnalysisError, PriceSeries};
use chrono::NaiveDateTime;

use crate::classifier::classify;
use crate::confidence::confidence_score;
use crate::indicators::IndicatorSnapshot;
use crate::levels::{channel, support_resistance, CHANNEL_LOOKBACK};
use crate::narrative::{self, InstrumentProfile};
use crate::report::{closing_history, AnalysisBlock, IndicatorBlock, PriceBlock, Report, HISTORY_WINDOW};

/// Sessions in roughly one trading year; shorter inputs are accepted with a warning.
pub const RECOMMENDED_SESSIONS: usize = 250;

/// Runs the full review pipeline over one price series.
///
/// Every component reads the same series snapshot; nothing is cached
/// between calls, so repeated runs over the same input yield the same report
/// apart from `update_time`.
pub struct DailyReviewEngine {
    profile: InstrumentProfile,
}

impl DailyReviewEngine {
    pub fn new(profile: InstrumentProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &InstrumentProfile {
        &self.profile
    }

    /// Latest indicator values, with unavailable windows left as `None`
    pub fn indicators(&self, series: &PriceSeries) -> IndicatorSnapshot {
        let snapshot = IndicatorSnapshot::compute(series);
        tracing::debug!(
            sessions = series.len(),
            missing = ?snapshot.missing(),
            "computed indicator snapshot"
        );
        snapshot
    }

    pub fn review(&self, series: &PriceSeries, generated_at: NaiveDateTime) -> Result<Report, AnalysisError> {
        if series.len() < RECOMMENDED_SESSIONS {
            tracing::warn!(
                sessions = series.len(),
                recommended = RECOMMENDED_SESSIONS,
                "price series covers less than one trading year"
            );
        }

        let ind = self.indicators(series).complete()?;

        let latest = series.latest();
        let previous = series.previous().ok_or_else(|| {
            AnalysisError::InsufficientData("need at least two sessions for a day-over-day view".to_string())
        })?;

        // CHANNEL_LOOKBACK <= MA60 window, so the channel is always present here
        let recent = channel(series.candles(), CHANNEL_LOOKBACK)
            .ok_or_else(|| AnalysisError::InsufficientData("no sessions for the recent channel".to_string()))?;
        let band = support_resistance(&ind.ma, &recent);
        let labels = classify(latest.close, &ind.ma, ind.rsi14, &ind.macd);
        let score = confidence_score(latest.close, &ind.ma, ind.rsi14, &ind.macd);

        let analysis = AnalysisBlock {
            summary: narrative::summary(&self.profile, latest, previous.close, &labels, &band),
            trend: labels.trend,
            ma_trend: labels.ma_trend,
            rsi_signal: labels.rsi_signal,
            macd_signal: labels.macd_signal,
            evidence: narrative::indicator_evidence(&self.profile, &ind),
            commentary: narrative::daily_commentary(&self.profile, series),
            comparison: narrative::day_over_day(&self.profile, latest, previous),
            invalidation: narrative::invalidation_conditions(&self.profile, &ind.ma, &recent),
            confidence_score: score,
            narrative_5d: narrative::five_day_narrative(&self.profile, series),
        };

        Ok(Report {
            date: latest.date,
            update_time: generated_at,
            price: PriceBlock::new(latest, previous.close),
            indicators: IndicatorBlock::new(&ind, &band),
            analysis,
            historical_5d: closing_history(series, HISTORY_WINDOW),
        })
    }
}

impl Default for DailyReviewEngine {
    fn default() -> Self {
        Self::new(InstrumentProfile::default())
    }
}
