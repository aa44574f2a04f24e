use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Price series is empty")]
    EmptySeries,

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Price source error: {0}")]
    Source(String),

    #[error("Report sink error: {0}")]
    Sink(String),
}
