//! Session cookie configuration and absolute session expiry.
//!
//! tower-sessions loads the session named by the incoming cookie (or starts an empty one),
//! and after the handler returns saves any changes in a single store write and emits the
//! cookie when the id changed. The expiry it computes on save is relative to the save, so
//! [`pin_session_expiry`] replaces it with the deadline fixed when the session was created.

use axum::{extract::Request, middleware::Next, response::Response};
use time::OffsetDateTime;
use tower_sessions::{cookie::SameSite, Expiry, Session, SessionManagerLayer, SessionStore};

use crate::server::{
    error::Error,
    model::session::expiry::{SessionDeadline, SESSION_LIFETIME},
};

pub const SESSION_COOKIE_NAME: &str = "session";

/// Builds the session layer shared by every dynamic route.
pub fn session_layer<Store>(store: Store, secure: bool) -> SessionManagerLayer<Store>
where
    Store: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_expiry(Expiry::OnInactivity(SESSION_LIFETIME))
}

/// Applies the session's creation-time deadline as its absolute expiry.
///
/// New sessions receive a deadline [`SESSION_LIFETIME`] from now. A session found past its
/// deadline is flushed and given a fresh id, so the request continues with an empty session
/// and the expired token is never accepted again.
pub async fn pin_session_expiry(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, Error> {
    let now = OffsetDateTime::now_utc();

    let deadline = match SessionDeadline::get(&session).await? {
        Some(deadline) if deadline > now => deadline,
        stale => {
            if stale.is_some() {
                tracing::debug!("Session passed its deadline, starting a new one");
                session.flush().await?;
                session.cycle_id().await?;
            }

            let deadline = now + SESSION_LIFETIME;
            SessionDeadline::insert(&session, deadline).await?;

            deadline
        }
    };

    session.set_expiry(Some(Expiry::AtDateTime(deadline)));

    Ok(next.run(request).await)
}
