use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    #[error("Record for tag {tag_id} truncated: header line has no location line")]
    TruncatedRecord { tag_id: String },

    #[error("{line_kind} line too short: no token at position {index}")]
    MissingField { line_kind: &'static str, index: usize },

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ProcessingError {
    /// True for per-record failures the pipeline recovers from by dropping
    /// the offending record and continuing with the next line.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            ProcessingError::InvalidCoordinate(_)
                | ProcessingError::TruncatedRecord { .. }
                | ProcessingError::MissingField { .. }
                | ProcessingError::Validation(_)
                | ProcessingError::InvalidFormat(_)
        )
    }
}
