//! Error type shared by both pipeline stages.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EtlError>;

#[derive(Error, Debug)]
pub enum EtlError {
    /// No raw snapshot matched, or the staged artifact is absent.
    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("invalid raw snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("staged artifact error: {0}")]
    Csv(#[from] csv::Error),

    /// An `extracted_at` cell that none of the accepted layouts can parse.
    #[error("cannot parse extracted_at value {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("request to SQL endpoint failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The SQL endpoint answered with a non-success status.
    #[error("SQL endpoint returned {status}: {body}")]
    Remote {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid raw file pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl EtlError {
    pub fn is_missing_input(&self) -> bool {
        matches!(self, EtlError::MissingInput(_))
    }
}
