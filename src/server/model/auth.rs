//! Request-scoped authentication state.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::server::error::{auth::AuthError, Error};

/// Outcome of resolving the session's user id against storage for one request.
///
/// Produced by the authentication resolver middleware and placed in the request extensions.
/// Handlers receive it by value through its extractor; it is never written back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Authentication {
    user_id: Option<i32>,
}

impl Authentication {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn user(user_id: i32) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn user_id(&self) -> Option<i32> {
        self.user_id
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Authentication {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Authentication>()
            .copied()
            .ok_or_else(|| AuthError::MissingRequestState("authentication").into())
    }
}
