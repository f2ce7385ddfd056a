//! Error types for payload generation.
//!
//! None of these are recovered inside the middleware. They bubble up to the
//! middleware, which logs them and answers with a generic 500.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::i18n::catalog::CatalogError;

/// Errors that abort a trimmer request.
#[derive(Debug, Error)]
pub enum TrimmerError {
    /// Locale segment is not a well-formed language tag.
    #[error("Invalid locale: {0:?}")]
    InvalidLocale(String),

    /// Rendering a template file failed (syntax error, missing translation, ...).
    #[error("Failed to render template {}: {source}", path.display())]
    TemplateRender {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    /// Translation catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Template tree could not be traversed or read.
    #[error("Failed to read template tree at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload could not be encoded as JSON.
    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// The blocking worker running the generation panicked or was cancelled.
    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Result type for trimmer operations.
pub type TrimmerResult<T> = Result<T, TrimmerError>;

impl IntoResponse for TrimmerError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
