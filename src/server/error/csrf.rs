use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::ClientError;

/// Reasons a state-changing request failed the anti-forgery check.
///
/// The variants exist for logging only; every one of them produces the same 403 response.
#[derive(Error, Debug)]
pub enum CsrfError {
    #[error("No CSRF token is bound to the session")]
    MissingSessionToken,
    #[error("CSRF cookie is missing or does not match the session token")]
    CookieMismatch,
    #[error("Submitted CSRF token is missing or does not match the session token")]
    SubmittedTokenMismatch,
}

impl IntoResponse for CsrfError {
    fn into_response(self) -> Response {
        tracing::debug!("CSRF check failed: {}", self);

        ClientError(StatusCode::FORBIDDEN).into_response()
    }
}
