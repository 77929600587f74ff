//! Shared error types for the services crate.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use fortune_core::model::CatalogError;

/// A single failed attempt against the analysis service.
///
/// Every variant is treated the same way by the retry loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error("analysis request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("analysis request timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by the quiz state machine when an action does not fit its phase.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has not been started")]
    NotStarted,
    #[error("quiz is already running")]
    AlreadyStarted,
    #[error("quiz is not accepting answers right now")]
    NotAcceptingAnswers,
    #[error("no recorded answer is waiting to advance")]
    NothingToAdvance,
    #[error("quiz is not waiting for a classification")]
    NotClassifying,
    #[error("classification belongs to an abandoned session")]
    StaleResult,
}

/// Errors emitted by `CardExportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("could not create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors emitted while resolving configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid analysis service url {raw:?}: {source}")]
    InvalidBaseUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported url scheme {0:?}; expected http or https")]
    UnsupportedScheme(String),
    #[error("{name} must be a positive integer, got {raw:?}")]
    InvalidNumber { name: &'static str, raw: String },
}

/// Errors emitted while loading the question catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error("could not read catalog file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Invalid(#[from] CatalogError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
