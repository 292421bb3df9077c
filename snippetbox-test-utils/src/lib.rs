//! Shared test setup for the snippetbox workspace.
//!
//! Tests describe the environment they need with a [`TestBuilder`] (tables and fixture rows)
//! and receive a [`TestContext`] holding an in-memory SQLite database, a session backed by a
//! memory store, and fixture helpers for inserting further rows while the test runs.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{TEST_PASSWORD, TEST_PASSWORD_COST},
        test_setup_with_tables, TestBuilder, TestContext, TestError,
    };
}
