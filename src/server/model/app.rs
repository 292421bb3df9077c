use std::sync::Arc;

use regex::Regex;
use sea_orm::DatabaseConnection;

use crate::server::{error::Error, model::session::csrf::generate_token, validator::EMAIL_PATTERN};

/// bcrypt work factor for stored passwords.
pub const PASSWORD_HASH_COST: u32 = 12;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, settings: Settings) -> Self {
        Self {
            db,
            settings: Arc::new(settings),
        }
    }
}

impl TryFrom<(DatabaseConnection, u32)> for AppState {
    type Error = Error;

    /// Builds state from a connection and a bcrypt cost.
    fn try_from((db, password_cost): (DatabaseConnection, u32)) -> Result<Self, Self::Error> {
        Ok(Self::new(db, Settings::new(password_cost)?))
    }
}

/// Immutable runtime settings built once at startup.
///
/// Shared by reference through [`AppState`] instead of living in process-wide statics.
pub struct Settings {
    /// Compiled [`EMAIL_PATTERN`] used by the signup and login forms.
    pub email_rx: Regex,
    /// bcrypt cost applied when hashing new passwords.
    pub password_cost: u32,
    /// Hash verified against when a login email is unknown, so both failure paths do the
    /// same amount of work.
    pub dummy_password_hash: String,
}

impl Settings {
    pub fn new(password_cost: u32) -> Result<Self, Error> {
        Ok(Self {
            email_rx: Regex::new(EMAIL_PATTERN)?,
            password_cost,
            dummy_password_hash: bcrypt::hash(generate_token(), password_cost)?,
        })
    }
}
