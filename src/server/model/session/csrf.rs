//! Session-bound anti-forgery tokens.
//!
//! Each session holds one CSRF token. The same value is mirrored into the `csrf_token`
//! cookie and embedded in rendered forms; state-changing requests must echo it back.
//! The token is replaced whenever the session token rotates.

use axum::{extract::FromRequestParts, http::request::Parts};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::{auth::AuthError, Error};

pub const SESSION_CSRF_KEY: &str = "snippetbox:csrf";

/// Bytes of entropy in a generated token.
const TOKEN_BYTES: usize = 32;

/// Generates a URL-safe token from the thread-local CSPRNG.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);

    URL_SAFE_NO_PAD.encode(bytes)
}

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionCsrfToken(pub String);

impl SessionCsrfToken {
    pub async fn get(session: &Session) -> Result<Option<String>, Error> {
        Ok(session
            .get::<SessionCsrfToken>(SESSION_CSRF_KEY)
            .await?
            .map(|SessionCsrfToken(token)| token))
    }

    /// Returns the session's token, issuing one first if the session has none.
    pub async fn get_or_insert(session: &Session) -> Result<String, Error> {
        match Self::get(session).await? {
            Some(token) => Ok(token),
            None => Self::regenerate(session).await,
        }
    }

    /// Replaces the session's token with a freshly generated one.
    pub async fn regenerate(session: &Session) -> Result<String, Error> {
        let token = generate_token();
        session
            .insert(SESSION_CSRF_KEY, SessionCsrfToken(token.clone()))
            .await?;

        Ok(token)
    }
}

/// The CSRF token that was valid when the request entered the handler.
///
/// Inserted into the request extensions by the CSRF guard so handlers can embed it in forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrfToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for CsrfToken {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CsrfToken>()
            .cloned()
            .ok_or_else(|| AuthError::MissingRequestState("csrf token").into())
    }
}
