use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::db::SnippetModel;

/// Number of snippets listed on the home page.
pub const LATEST_SNIPPETS_LIMIT: u64 = 10;

pub struct SnippetRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SnippetRepository<'a> {
    /// Creates a new instance of [`SnippetRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a snippet that expires `expires_in_days` days from now
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        expires_in_days: i32,
    ) -> Result<SnippetModel, DbErr> {
        let now = Utc::now().naive_utc();

        let snippet = entity::snippet::ActiveModel {
            title: ActiveValue::Set(title.to_string()),
            content: ActiveValue::Set(content.to_string()),
            created: ActiveValue::Set(now),
            expires: ActiveValue::Set(now + Duration::days(i64::from(expires_in_days))),
            ..Default::default()
        };

        snippet.insert(self.db).await
    }

    /// Gets a snippet by id, ignoring snippets that have expired
    pub async fn get(&self, snippet_id: i32) -> Result<Option<SnippetModel>, DbErr> {
        entity::prelude::Snippet::find_by_id(snippet_id)
            .filter(entity::snippet::Column::Expires.gt(Utc::now().naive_utc()))
            .one(self.db)
            .await
    }

    /// Gets the most recently created snippets that have not expired, newest first
    pub async fn latest(&self) -> Result<Vec<SnippetModel>, DbErr> {
        entity::prelude::Snippet::find()
            .filter(entity::snippet::Column::Expires.gt(Utc::now().naive_utc()))
            .order_by_desc(entity::snippet::Column::Created)
            .order_by_desc(entity::snippet::Column::Id)
            .limit(LATEST_SNIPPETS_LIMIT)
            .all(self.db)
            .await
    }
}
