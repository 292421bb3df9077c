//! Request pipeline middleware.
//!
//! Each submodule provides one wrapping function in axum's `from_fn` style. [`chain`] composes
//! them into the three chains the router applies: `standard` for every route, `dynamic` for
//! routes that need session state and `protected` for routes that also require a signed-in
//! user.

pub mod auth;
pub mod chain;
pub mod csrf;
pub mod headers;
pub mod logging;
pub mod recover;
pub mod session;
