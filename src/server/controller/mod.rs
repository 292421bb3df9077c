//! HTTP controller endpoints.
//!
//! Handlers decode and validate input, call into the repositories and services, and either
//! render a page view-model or redirect. Session-derived request state (authentication and
//! the CSRF token) arrives through extractors filled in by the dynamic middleware chain.

pub mod snippet;
pub mod user;

use axum::http::StatusCode;

use crate::server::error::ClientError;

/// Liveness probe.
pub async fn ping() -> &'static str {
    "OK"
}

pub async fn not_found() -> ClientError {
    ClientError(StatusCode::NOT_FOUND)
}
