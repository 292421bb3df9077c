//! Absolute session lifetime.
//!
//! tower-sessions recomputes expiry on every save, which makes lifetimes slide. The deadline
//! stored here is fixed when the session is first created and re-applied on each request as
//! an absolute expiry, so a session lives at most [`SESSION_LIFETIME`] regardless of activity.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_DEADLINE_KEY: &str = "snippetbox:session:deadline";

pub const SESSION_LIFETIME: Duration = Duration::hours(12);

/// Unix timestamp (seconds) after which the session is no longer valid.
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionDeadline(pub i64);

impl SessionDeadline {
    /// Returns the stored deadline. Unparseable timestamps read as absent.
    pub async fn get(session: &Session) -> Result<Option<OffsetDateTime>, Error> {
        Ok(session
            .get::<SessionDeadline>(SESSION_DEADLINE_KEY)
            .await?
            .and_then(|SessionDeadline(ts)| OffsetDateTime::from_unix_timestamp(ts).ok()))
    }

    pub async fn insert(session: &Session, deadline: OffsetDateTime) -> Result<(), Error> {
        session
            .insert(SESSION_DEADLINE_KEY, SessionDeadline(deadline.unix_timestamp()))
            .await?;

        Ok(())
    }
}
