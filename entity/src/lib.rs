//! sea-orm entity models for the snippetbox database.

pub mod prelude;

pub mod snippet;
pub mod user;
