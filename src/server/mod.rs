//! Server application core modules.
//!
//! HTTP routing and the middleware pipeline, session-backed authentication and CSRF
//! protection, form validation, and the repositories for snippets and user accounts.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod form;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod validator;
pub mod view;
