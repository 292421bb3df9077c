//! Declarative test setup.
//!
//! Configuration methods queue work; nothing touches the database until [`TestBuilder::build`]
//! runs, which creates tables first and then inserts fixture rows in the order they were
//! requested.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for a [`TestContext`].
#[derive(Default)]
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_user_tables: bool,
    include_snippet_tables: bool,

    // (name, email, password)
    users: Vec<(String, String, String)>,
    // (title, content, expires in days)
    snippets: Vec<(String, String, i64)>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the `users` table.
    pub fn with_user_tables(mut self) -> Self {
        self.include_user_tables = true;
        self
    }

    /// Adds the `snippets` table.
    pub fn with_snippet_tables(mut self) -> Self {
        self.include_snippet_tables = true;
        self
    }

    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Inserts a user with a bcrypt hash of `password`. Implies [`Self::with_user_tables`].
    pub fn with_user(
        mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.include_user_tables = true;
        self.users.push((name.into(), email.into(), password.into()));
        self
    }

    /// Inserts a snippet expiring `expires_in_days` from now. Negative values create a snippet
    /// that has already expired. Implies [`Self::with_snippet_tables`].
    pub fn with_snippet(
        mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        expires_in_days: i64,
    ) -> Self {
        self.include_snippet_tables = true;
        self.snippets
            .push((title.into(), content.into(), expires_in_days));
        self
    }

    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        // 1. Create tables
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        let mut all_tables = Vec::new();

        if self.include_user_tables {
            all_tables.push(schema.create_table_from_entity(entity::prelude::User));
        }
        if self.include_snippet_tables {
            all_tables.push(schema.create_table_from_entity(entity::prelude::Snippet));
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert fixtures
        for (name, email, password) in self.users {
            setup.user().insert_user(&name, &email, &password).await?;
        }

        for (title, content, expires_in_days) in self.snippets {
            setup
                .snippet()
                .insert_snippet(&title, &content, expires_in_days)
                .await?;
        }

        Ok(setup)
    }
}
