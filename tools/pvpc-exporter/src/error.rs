//! Error types for the exporter pipeline.
//!
//! Every variant of [`ExporterError`] is fatal to a run. Retries happen inside
//! the transport and never surface here.

use thiserror::Error;

/// Errors raised while loading or validating the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error reading config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Errors raised by a [`crate::transport::Transport`].
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failures, timeouts and failures while reading a body.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request body is a stream and cannot be replayed on retry")]
    UnbufferableBody,
}

/// Top-level error of a pipeline run.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Error fetching PVPC data: {status} {body}")]
    Fetch { status: String, body: String },

    #[error("Error unmarshalling data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Error parsing timestamp '{datetime}': {source}")]
    Timestamp {
        datetime: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("No data to send")]
    EmptyPayload,

    #[error("Error compressing data: {0}")]
    Compress(#[from] std::io::Error),

    #[error("InfluxDB API token contains characters not allowed in a header")]
    InvalidToken,

    #[error("Error sending data: {status} {body}")]
    Upload { status: String, body: String },
}

impl From<reqwest::Error> for ExporterError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(TransportError::Request(e))
    }
}
