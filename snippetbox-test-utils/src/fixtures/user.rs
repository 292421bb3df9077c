use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_PASSWORD_COST, error::TestError, TestContext};

impl TestContext {
    pub fn user(&self) -> UserFixtures<'_> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Inserts a user whose stored hash verifies against `password`.
    pub async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<entity::user::Model, TestError> {
        let hashed_password = bcrypt::hash(password, TEST_PASSWORD_COST)?;

        Ok(entity::prelude::User::insert(entity::user::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            hashed_password: ActiveValue::Set(hashed_password),
            created: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Deletes a user, leaving any session that references them stale.
    pub async fn delete_user(&self, user_id: i32) -> Result<(), TestError> {
        entity::prelude::User::delete_by_id(user_id)
            .exec(&self.setup.db)
            .await?;

        Ok(())
    }
}
