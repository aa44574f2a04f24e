//! daily-review: build the end-of-day technical review for one instrument.
//!
//! Reads a daily OHLCV series from a JSON file, computes indicators, trend
//! labels, confidence and narrative, and writes the report as JSON.
//!
//! Usage:
//!   REVIEW_INPUT_PATH=gold.json cargo run -p daily-review
//!   cargo run -p daily-review -- --input gold.json --output site/data.json

mod config;
mod store;

use analysis_core::{PriceSource, ReportSink};
use anyhow::{Context, Result};
use config::ReviewConfig;
use store::{JsonFileSink, JsonFileSource};
use technical_analysis::DailyReviewEngine;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "daily_review=info,technical_analysis=info".into());

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let mut config = ReviewConfig::from_env()?;
    let args: Vec<String> = std::env::args().collect();
    config.apply_args(&args);
    config.validate()?;

    tracing::info!("Starting daily review for {}", config.profile.instrument);

    let source = JsonFileSource::new(&config.input_path);
    let series = source
        .fetch()
        .await
        .with_context(|| format!("loading price series from {}", config.input_path.display()))?;
    tracing::info!(
        "Loaded {} sessions ({} to {})",
        series.len(),
        series.first_date(),
        series.last_date()
    );

    let engine = DailyReviewEngine::new(config.profile.clone());
    let generated_at = chrono::Local::now().naive_local();
    let report = engine
        .review(&series, generated_at)
        .context("building daily review")?;

    JsonFileSink::new(&config.output_path)
        .store(&report)
        .await
        .with_context(|| format!("writing report to {}", config.output_path.display()))?;

    tracing::info!("Review written to {}", config.output_path.display());
    tracing::info!("  Latest price: {:.2}", report.price.current);
    tracing::info!("  Change: {:+.2}%", report.price.change_pct);
    tracing::info!("  Trend: {}", report.analysis.trend.label());
    tracing::info!("  Confidence: {}/100", report.analysis.confidence_score);

    Ok(())
}
