//! Ordered composition of router-wrapping functions.
//!
//! A [`Chain`] is a list of wraps applied to a [`Router`]. The first wrap appended is the
//! outermost: it sees the request first and the response last. Chains are values, so a base
//! chain can be cloned and extended without re-declaring its members.

use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::Request,
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::Route,
    Router,
};
use tower::{Layer, Service};
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::server::{
    middleware::{auth, csrf, headers, logging, recover, session},
    model::app::AppState,
};

type Wrap<S> = Arc<dyn Fn(Router<S>) -> Router<S> + Send + Sync>;

pub struct Chain<S> {
    wraps: Vec<Wrap<S>>,
}

impl<S> Clone for Chain<S> {
    fn clone(&self) -> Self {
        Self {
            wraps: self.wraps.clone(),
        }
    }
}

impl<S> Default for Chain<S> {
    fn default() -> Self {
        Self { wraps: Vec::new() }
    }
}

impl<S> Chain<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a wrap inside every wrap already in the chain.
    pub fn append<F>(mut self, wrap: F) -> Self
    where
        F: Fn(Router<S>) -> Router<S> + Send + Sync + 'static,
    {
        self.wraps.push(Arc::new(wrap));
        self
    }

    /// Appends a tower layer covering the routes and the fallback.
    pub fn layer<L>(self, layer: L) -> Self
    where
        L: Layer<Route> + Clone + Send + Sync + 'static,
        L::Service: Service<Request> + Clone + Send + Sync + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        self.append(move |router| router.layer(layer.clone()))
    }

    /// Appends a tower layer that only runs when a route matched.
    pub fn route_layer<L>(self, layer: L) -> Self
    where
        L: Layer<Route> + Clone + Send + Sync + 'static,
        L::Service: Service<Request> + Clone + Send + Sync + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        self.append(move |router| router.route_layer(layer.clone()))
    }

    /// Appends every wrap of `other`, preserving its order, inside this chain.
    pub fn extend(mut self, other: &Chain<S>) -> Self {
        self.wraps.extend(other.wraps.iter().cloned());
        self
    }

    pub fn len(&self) -> usize {
        self.wraps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wraps.is_empty()
    }

    /// Wraps `router` so the first wrap in the chain ends up outermost.
    pub fn then(&self, router: Router<S>) -> Router<S> {
        self.wraps
            .iter()
            .rev()
            .fold(router, |router, wrap| wrap(router))
    }
}

/// Panic recovery, request logging and security headers, outermost first.
pub fn standard<S>() -> Chain<S>
where
    S: Clone + Send + Sync + 'static,
{
    Chain::new()
        .layer(from_fn(recover::recover_panic))
        .layer(from_fn(logging::log_request))
        .layer(from_fn(headers::secure_headers))
}

/// Session load and save, the session deadline, the CSRF guard and the authentication
/// resolver, outermost first.
pub fn dynamic<Store>(state: AppState, sessions: SessionManagerLayer<Store>) -> Chain<AppState>
where
    Store: SessionStore + Clone,
{
    Chain::new()
        .layer(sessions)
        .layer(from_fn(session::pin_session_expiry))
        .layer(from_fn(csrf::csrf_guard))
        .layer(from_fn_with_state(state, auth::resolve_authentication))
}

/// `dynamic` followed by the route guard.
pub fn protected(dynamic: &Chain<AppState>) -> Chain<AppState> {
    Chain::new()
        .extend(dynamic)
        .route_layer(from_fn(auth::require_authentication))
}
