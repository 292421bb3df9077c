//! Server application models and type definitions.
//!
//! Application state and settings, request-scoped authentication state, database model
//! aliases, submitted form types, and typed wrappers over session entries.

pub mod app;
pub mod auth;
pub mod db;
pub mod form;
pub mod session;
