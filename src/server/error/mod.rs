//! Error types for the snippetbox server.
//!
//! This module aggregates the domain-specific error types (configuration, authentication,
//! CSRF) and the external library errors into a single [`Error`] type. Every error implements
//! `IntoResponse`, so handlers and middleware can return `Result<_, Error>` and rely on `?`.
//!
//! Client errors map onto their specific status codes with a generic status text body. System
//! errors become a generic 500 response; the underlying cause is attached to the response as a
//! [`ServerFault`] extension so the request logger can report it alongside the method and URI
//! without the cause ever reaching the client.

pub mod auth;
pub mod config;
pub mod csrf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, csrf::CsrfError},
};

/// Main error type for the snippetbox server.
///
/// # Error Categories
/// - Client input errors (malformed submissions, unknown resources)
/// - Integrity errors (CSRF token missing or mismatched)
/// - Configuration errors (missing/invalid environment variables)
/// - System errors (database, session store, password hashing, I/O)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (duplicate account, missing resolver state).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Anti-forgery check failed for a state-changing request.
    #[error(transparent)]
    CsrfError(#[from] CsrfError),
    /// The submitted body could not be decoded.
    #[error("Malformed request: {0}")]
    BadRequest(String),
    /// The requested resource does not exist.
    #[error("Resource not found")]
    NotFound,
    /// Internal error indicating a bug in the server's own wiring.
    #[error("Internal error: {0}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session load, store, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Password hashing or verification failed.
    #[error(transparent)]
    PasswordHashError(#[from] bcrypt::BcryptError),
    /// A blocking task (password hashing) panicked or was cancelled.
    #[error(transparent)]
    TaskJoinError(#[from] tokio::task::JoinError),
    /// Pattern compilation failed at startup.
    #[error(transparent)]
    RegexError(#[from] regex::Error),
    /// View-model serialization failed.
    #[error(transparent)]
    SerializationError(#[from] serde_json::Error),
    /// Listener bind or serve failure.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Malformed form submissions
/// - 403 Forbidden - CSRF failures, uniformly and without detail
/// - 404 Not Found - Unknown resources
/// - 500 Internal Server Error - Everything else (cause logged by the request logger)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::CsrfError(err) => err.into_response(),
            Self::BadRequest(reason) => {
                tracing::debug!("Rejected malformed submission: {}", reason);

                ClientError(StatusCode::BAD_REQUEST).into_response()
            }
            Self::NotFound => ClientError(StatusCode::NOT_FOUND).into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Cause of a 500 response, carried as a response extension.
///
/// Written by [`InternalServerError`] and consumed by the request logging middleware, which
/// is the only place that knows the request method and URI.
#[derive(Clone, Debug)]
pub struct ServerFault(pub String);

/// Responds with a client error status and its canonical reason as the body.
pub struct ClientError(pub StatusCode);

impl IntoResponse for ClientError {
    fn into_response(self) -> Response {
        let reason = self.0.canonical_reason().unwrap_or("Error");

        (
            self.0,
            Json(ErrorDto {
                error: reason.to_string(),
            }),
        )
            .into_response()
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The client only ever receives a generic message. The error's text is attached to the
/// response as a [`ServerFault`] so it can be logged with request context.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        let mut response = ClientError(StatusCode::INTERNAL_SERVER_ERROR).into_response();
        response
            .extensions_mut()
            .insert(ServerFault(self.0.to_string()));

        response
    }
}
