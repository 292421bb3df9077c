//! Account creation and credential checks.
//!
//! Passwords are hashed with bcrypt on the blocking thread pool so slow hashing never stalls
//! the async runtime. Login failures are indistinguishable to the caller: an unknown email
//! verifies the submitted password against a dummy hash so both paths do the same work.


use sea_orm::{DatabaseConnection, SqlErr};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::app::Settings,
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    settings: &'a Settings,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection, settings: &'a Settings) -> Self {
        Self { db, settings }
    }

    /// Registers a new account.
    ///
    /// # Arguments
    /// - `name` - Display name
    /// - `email` - Email address, unique across accounts
    /// - `password` - Plaintext password, stored only as a bcrypt hash
    ///
    /// # Returns
    /// - `Ok(i32)` - ID of the created user
    /// - `Err(Error::AuthError(AuthError::DuplicateEmail))` - Email address already registered
    /// - `Err(Error::DbErr)` - Any other database failure
    /// - `Err(Error::PasswordHashError)` - Hashing failed
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<i32, Error> {
        let hashed_password = self.hash_password(password).await?;

        let user_repository = UserRepository::new(self.db);
        match user_repository.create(name, email, &hashed_password).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, "Created user account");

                Ok(user.id)
            }
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AuthError::DuplicateEmail.into()),
                _ => Err(err.into()),
            },
        }
    }

    /// Checks an email and password pair.
    ///
    /// # Returns
    /// - `Ok(Some(i32))` - Credentials are valid, with the user's ID
    /// - `Ok(None)` - Unknown email or wrong password, deliberately not told apart
    /// - `Err(Error)` - Database or hashing failure
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<i32>, Error> {
        let user_repository = UserRepository::new(self.db);
        let user = user_repository.get_by_email(email).await?;

        let (user_id, hashed_password) = match user {
            Some(user) => (Some(user.id), user.hashed_password),
            None => (None, self.settings.dummy_password_hash.clone()),
        };

        let password_matches = verify_password(password, hashed_password).await?;

        Ok(user_id.filter(|_| password_matches))
    }

    async fn hash_password(&self, password: &str) -> Result<String, Error> {
        let password = password.to_string();
        let cost = self.settings.password_cost;

        Ok(tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??)
    }
}

async fn verify_password(password: &str, hashed_password: String) -> Result<bool, Error> {
    let password = password.to_string();

    Ok(tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed_password)).await??)
}
