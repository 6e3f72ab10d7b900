use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Failed to load dataset from {origin}: {reason}")]
    Load { origin: String, reason: String },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Value out of range: {0}")]
    Domain(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Unknown pollutant column: '{0}'")]
    UnknownColumn(String),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Statistics error: {0}")]
    Statistics(String),
}

impl AnalyticsError {
    pub fn load(origin: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        AnalyticsError::Load {
            origin: origin.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether the caller can recover by choosing a different filter selection.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AnalyticsError::InsufficientData(_))
    }
}
