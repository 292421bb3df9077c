//! Data transfer objects shared between the server and its responses.

pub mod api;
pub mod page;
pub mod snippet;
