use std::path::PathBuf;

use thiserror::Error;

/// Failure performing a single GET against the Slack API.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {message}")]
    Request { message: String },

    #[error("server responded with HTTP {status}")]
    Status { status: u16 },

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // Strip the url so the token in the query string never reaches the terminal
        TransportError::Request {
            message: err.without_url().to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("could not decode channel list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("slack api error: {0}")]
    Api(String),

    #[error("response has no channels array")]
    MissingChannels,

    #[error("channel entry {index} is not an object")]
    NotAnObject { index: usize },

    #[error("channel entry {index} has no string field `{field}`")]
    MissingField { index: usize, field: &'static str },
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("could not decode history page: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("slack api error: {0}")]
    Api(String),

    #[error("channel has no message history")]
    NoHistory,

    #[error("newest message on page {page} has no timestamp")]
    MissingTimestamp { page: usize },
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not serialize messages: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not move archive into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Everything that can stop a run. Every variant is fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to list channels: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("failed to get history for #{channel}: {source}")]
    History {
        channel: String,
        source: HistoryError,
    },

    #[error("failed to write archive for #{channel}: {source}")]
    Archive {
        channel: String,
        source: ArchiveError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
