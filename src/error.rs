use thiserror::Error;

/// Every failure aborts the run; there is no per-vehicle recovery.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to retrieve {url}: HTTP {status}")]
    FetchFailed {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("field '{label}' not found in document")]
    FieldNotFound { label: String },
    #[error("field '{label}' has malformed value {raw:?}")]
    MalformedValue { label: String, raw: String },
    #[error("invalid vehicle url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("invalid label pattern '{label}'")]
    InvalidLabel {
        label: String,
        #[source]
        source: regex::Error,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
