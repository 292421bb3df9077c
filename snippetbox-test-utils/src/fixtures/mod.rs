//! Fixture helpers for inserting rows while a test runs.
//!
//! - `user` - accounts with real bcrypt hashes
//! - `snippet` - snippets with a chosen expiry

pub mod snippet;
pub mod user;
