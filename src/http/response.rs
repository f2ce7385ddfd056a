//! Response construction for trimmer payloads.
//!
//! # Responsibilities
//! - Wrap generated JavaScript in a `200 OK` response
//! - Set `Content-Type: text/javascript`
//!
//! Failures never reach this module; they are turned into a generic 500 by
//! [`TrimmerError`](crate::error::TrimmerError).

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Content type of every trimmer payload.
pub const JAVASCRIPT_CONTENT_TYPE: &str = "text/javascript";

/// `200 OK` with a JavaScript body.
pub fn javascript(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, JAVASCRIPT_CONTENT_TYPE)],
        body,
    )
        .into_response()
}
