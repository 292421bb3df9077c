//! Anti-forgery guard for state-changing requests.
//!
//! Safe methods make sure the session carries a token. Every other method must present the
//! session's token twice: in the `csrf_token` cookie and in either the `csrf_token` form
//! field or the `X-CSRF-Token` header. Requests failing either comparison are rejected with
//! 403 before the handler runs. After the handler returns, the cookie is reissued whenever
//! the session's token differs from the one the client sent, which covers both first visits
//! and token rotation on login and logout.

use axum::{
    body::{Body, Bytes},
    extract::{Form, FromRequest, Request},
    http::{
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, Method,
    },
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tower_sessions::{
    cookie::{Cookie, SameSite},
    Session,
};

use crate::server::{
    error::{csrf::CsrfError, Error},
    model::session::csrf::{CsrfToken, SessionCsrfToken},
};

pub const CSRF_COOKIE_NAME: &str = "csrf_token";
pub const CSRF_FIELD_NAME: &str = "csrf_token";
pub const CSRF_HEADER_NAME: &str = "x-csrf-token";

/// Largest request body buffered while looking for a submitted token.
const MAX_FORM_BYTES: usize = 10 * 1024 * 1024;

#[derive(Deserialize)]
struct CsrfSubmission {
    #[serde(default)]
    csrf_token: String,
}

pub async fn csrf_guard(session: Session, request: Request, next: Next) -> Result<Response, Error> {
    let cookie_token = cookie_token(request.headers());

    let (mut request, token) = if is_safe(request.method()) {
        let token = SessionCsrfToken::get_or_insert(&session).await?;

        (request, token)
    } else {
        let token = SessionCsrfToken::get(&session)
            .await?
            .ok_or(CsrfError::MissingSessionToken)?;

        if !tokens_match(cookie_token.as_deref(), &token) {
            return Err(CsrfError::CookieMismatch.into());
        }

        let (request, submitted) = submitted_token(request).await?;
        if !tokens_match(submitted.as_deref(), &token) {
            return Err(CsrfError::SubmittedTokenMismatch.into());
        }

        (request, token)
    };

    request.extensions_mut().insert(CsrfToken(token));

    let mut response = next.run(request).await;

    if let Some(current) = SessionCsrfToken::get(&session).await? {
        if cookie_token.as_deref() != Some(current.as_str()) {
            let cookie = csrf_cookie(current);
            let value = HeaderValue::from_str(&cookie.to_string())
                .map_err(|e| Error::InternalError(format!("Invalid CSRF cookie: {}", e)))?;
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    Ok(response)
}

fn is_safe(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

fn tokens_match(candidate: Option<&str>, expected: &str) -> bool {
    match candidate {
        Some(candidate) => candidate.as_bytes().ct_eq(expected.as_bytes()).into(),
        None => false,
    }
}

fn csrf_cookie(token: String) -> Cookie<'static> {
    Cookie::build((CSRF_COOKIE_NAME, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == CSRF_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

/// Reads the submitted token from the header or the urlencoded body.
///
/// The body is buffered and handed back in a rebuilt request so the handler can still
/// decode it.
async fn submitted_token(request: Request) -> Result<(Request, Option<String>), Error> {
    if let Some(token) = request
        .headers()
        .get(CSRF_HEADER_NAME)
        .and_then(|value| value.to_str().ok())
    {
        let token = token.to_string();
        return Ok((request, Some(token)));
    }

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|e| Error::BadRequest(format!("Unreadable request body: {}", e)))?;

    let submitted = form_token(parts.headers.get(CONTENT_TYPE), bytes.clone()).await;

    Ok((Request::from_parts(parts, Body::from(bytes)), submitted))
}

async fn form_token(content_type: Option<&HeaderValue>, bytes: Bytes) -> Option<String> {
    let mut probe = Request::builder().method(Method::POST);
    if let Some(content_type) = content_type {
        probe = probe.header(CONTENT_TYPE, content_type);
    }
    let probe = probe.body(Body::from(bytes)).ok()?;

    Form::<CsrfSubmission>::from_request(probe, &())
        .await
        .ok()
        .map(|Form(submission)| submission.csrf_token)
        .filter(|token| !token.is_empty())
}
