use async_trait::async_trait;
use serde::Serialize;

use crate::{AnalysisError, PriceSeries};

/// Market-data collaborator that yields one instrument's daily series
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self) -> Result<PriceSeries, AnalysisError>;
}

/// Persistence collaborator that accepts a completed report
#[async_trait]
pub trait ReportSink<R: Serialize + Sync>: Send + Sync {
    async fn store(&self, report: &R) -> Result<(), AnalysisError>;
}
