//! Data access layer repositories.
//!
//! Repositories borrow the database connection and wrap each query the server needs. They
//! return `DbErr` directly and leave its interpretation to the service layer.

pub mod snippet;
pub mod user;
