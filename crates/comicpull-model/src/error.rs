use std::path::PathBuf;
use thiserror::Error;

/// Every failure a pull can end with. None of them are retried.
#[derive(Debug, Error)]
pub enum PullError {
    #[error("invalid issue range: {0}")]
    InvalidRange(String),

    #[error("unsupported source '{requested}', expected one of: {}", known.join(", "))]
    UnsupportedSource {
        requested: String,
        known: Vec<String>,
    },

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("unexpected markup at {url}: {reason}")]
    Parse { url: String, reason: String },

    /// Metadata was requested out of order. Indicates a logic fault.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PullError {
    pub fn parse(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = PullError> = std::result::Result<T, E>;
