use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{ClientError, InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("A user with this email address already exists")]
    DuplicateEmail,
    #[error("Request state {0:?} was not provided by the middleware chain")]
    MissingRequestState(&'static str),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::DuplicateEmail => {
                tracing::debug!("{}", self);

                ClientError(StatusCode::UNPROCESSABLE_ENTITY).into_response()
            }
            Self::MissingRequestState(_) => InternalServerError(self).into_response(),
        }
    }
}
