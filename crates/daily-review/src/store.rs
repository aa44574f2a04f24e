use analysis_core::{AnalysisError, Candle, PriceSeries, PriceSource, ReportSink};
use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;

/// Reads a JSON array of daily candles from disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PriceSource for JsonFileSource {
    async fn fetch(&self) -> Result<PriceSeries, AnalysisError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|e| AnalysisError::Source(format!("{}: {e}", self.path.display())))?;

        let candles: Vec<Candle> = serde_json::from_slice(&raw)
            .map_err(|e| AnalysisError::Source(format!("{}: {e}", self.path.display())))?;

        tracing::debug!(path = %self.path.display(), sessions = candles.len(), "read candles");
        PriceSeries::new(candles)
    }
}

/// Writes a report as pretty-printed UTF-8 JSON.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl<R: Serialize + Sync> ReportSink<R> for JsonFileSink {
    async fn store(&self, report: &R) -> Result<(), AnalysisError> {
        let body = serde_json::to_vec_pretty(report).map_err(|e| AnalysisError::Sink(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AnalysisError::Sink(format!("{}: {e}", parent.display())))?;
        }

        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| AnalysisError::Sink(format!("{}: {e}", self.path.display())))?;

        tracing::debug!(path = %self.path.display(), "report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_source_reads_candles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.json");
        let bars = json!([
            {"date": "2024-06-03", "open": 2330.0, "high": 2352.1, "low": 2325.4, "close": 2350.2, "volume": 150321},
            {"date": "2024-06-04", "open": 2350.0, "high": 2356.0, "low": 2319.8, "close": 2327.6, "volume": 171004}
        ]);
        std::fs::write(&path, bars.to_string()).unwrap();

        let series = JsonFileSource::new(&path).fetch().await.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest().close, 2327.6);
        assert_eq!(series.latest().volume, 171004);
    }

    #[tokio::test]
    async fn test_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonFileSource::new(dir.path().join("absent.json")).fetch().await;
        assert!(matches!(result, Err(AnalysisError::Source(_))));
    }

    #[tokio::test]
    async fn test_source_empty_array_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, "[]").unwrap();

        let result = JsonFileSource::new(&path).fetch().await;
        assert!(matches!(result, Err(AnalysisError::EmptySeries)));
    }

    #[tokio::test]
    async fn test_sink_creates_parent_and_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");
        let payload = json!({"analysis": {"summary": "金价 range-bound"}});

        JsonFileSink::new(&path).store(&payload).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("金价"));
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, payload);
    }
}
