//! Authentication resolver and route guard.

use axum::{
    extract::{Request, State},
    http::{header::CACHE_CONTROL, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::Error,
    model::{app::AppState, auth::Authentication, session::user::SessionUserId},
};

pub const LOGIN_PATH: &str = "/user/login";

/// Resolves the session's user id into the request's [`Authentication`].
///
/// The id is checked against storage on every request so a deleted account stops
/// authenticating immediately. A stale id is removed from the session. Storage failures
/// fail the request.
pub async fn resolve_authentication(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, Error> {
    let auth = match SessionUserId::get(&session).await? {
        None => Authentication::anonymous(),
        Some(user_id) => {
            let user_repository = UserRepository::new(&state.db);

            if user_repository.exists(user_id).await? {
                Authentication::user(user_id)
            } else {
                tracing::debug!(user_id, "Session references a missing user, clearing it");
                SessionUserId::remove(&session).await?;

                Authentication::anonymous()
            }
        }
    };

    request.extensions_mut().insert(auth);

    Ok(next.run(request).await)
}

/// Redirects unauthenticated requests to the login page.
///
/// Responses for authenticated users are marked uncacheable.
pub async fn require_authentication(auth: Authentication, request: Request, next: Next) -> Response {
    if !auth.is_authenticated() {
        return Redirect::to(LOGIN_PATH).into_response();
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

    response
}
