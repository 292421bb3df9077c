//! One-shot flash messages carried in the session.
//!
//! At most one message is pending at a time; a new `put` overwrites an unread one. `pop`
//! reads and deletes in a single session operation, so a message reaches at most one render.
//! A message nobody reads before the session expires is dropped.

use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_FLASH_KEY: &str = "snippetbox:flash";

pub struct SessionFlash;

impl SessionFlash {
    pub async fn put(session: &Session, message: &str) -> Result<(), Error> {
        session.insert(SESSION_FLASH_KEY, message).await?;

        Ok(())
    }

    pub async fn pop(session: &Session) -> Result<Option<String>, Error> {
        Ok(session.remove::<String>(SESSION_FLASH_KEY).await?)
    }
}
