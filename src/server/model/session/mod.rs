//! Session data models and utilities.
//!
//! Type-safe wrappers for the entries this application keeps in a tower-sessions
//! [`Session`](tower_sessions::Session): the authenticated user id, the CSRF token, the
//! pending flash message and the session's absolute deadline.

pub mod csrf;
pub mod expiry;
pub mod flash;
pub mod user;
