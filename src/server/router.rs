//! HTTP routing.
//!
//! Every route passes through the standard chain. Pages that read or write session state add
//! the dynamic chain, and pages that require a signed-in user add the protected chain on top.
//!
//! # Registered Endpoints
//! - `GET /` - Latest snippets
//! - `GET /snippet/view/{id}` - One snippet
//! - `GET|POST /snippet/create` - Snippet form and submission (protected)
//! - `GET|POST /user/signup` - Signup form and submission
//! - `GET|POST /user/login` - Login form and submission
//! - `POST /user/logout` - Logout (protected)
//! - `GET /ping` - Liveness probe, standard chain only

use axum::{
    routing::{get, post},
    Router,
};
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::server::{
    controller::{self, snippet, user},
    middleware::chain,
    model::app::AppState,
};

/// Builds the application's router with all middleware applied.
pub fn routes<Store>(state: AppState, sessions: SessionManagerLayer<Store>) -> Router
where
    Store: SessionStore + Clone,
{
    let dynamic = chain::dynamic(state.clone(), sessions);
    let protected = chain::protected(&dynamic);

    let public_routes = Router::new()
        .route("/", get(snippet::home))
        .route("/snippet/view/{id}", get(snippet::snippet_view))
        .route("/user/signup", get(user::user_signup).post(user::user_signup_post))
        .route("/user/login", get(user::user_login).post(user::user_login_post));

    let protected_routes = Router::new()
        .route(
            "/snippet/create",
            get(snippet::snippet_create).post(snippet::snippet_create_post),
        )
        .route("/user/logout", post(user::user_logout_post));

    let routes = dynamic
        .then(public_routes)
        .merge(protected.then(protected_routes))
        .route("/ping", get(controller::ping))
        .fallback(controller::not_found);

    chain::standard().then(routes).with_state(state)
}
