//! Service layer for business logic.
//!
//! Services sit between the controllers and the repositories, translating storage results
//! into domain outcomes such as a duplicate account or rejected credentials.

pub mod auth;
