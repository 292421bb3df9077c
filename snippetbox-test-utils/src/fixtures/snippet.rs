use chrono::{Duration, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn snippet(&self) -> SnippetFixtures<'_> {
        SnippetFixtures { setup: self }
    }
}

pub struct SnippetFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> SnippetFixtures<'a> {
    pub async fn insert_snippet(
        &self,
        title: &str,
        content: &str,
        expires_in_days: i64,
    ) -> Result<entity::snippet::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Snippet::insert(entity::snippet::ActiveModel {
                title: ActiveValue::Set(title.to_string()),
                content: ActiveValue::Set(content.to_string()),
                created: ActiveValue::Set(now),
                expires: ActiveValue::Set(now + Duration::days(expires_in_days)),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
