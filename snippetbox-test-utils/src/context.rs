//! Test context returned by [`TestBuilder::build`](crate::TestBuilder::build).

use std::sync::Arc;

use sea_orm::{
    sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    PaginatorTrait,
};
use tower_sessions::{MemoryStore, Session};

use crate::{constant::TEST_PASSWORD_COST, error::TestError};

pub struct TestContext {
    pub db: DatabaseConnection,
    /// Standalone session for exercising session helpers without a request.
    pub session: Session,
    /// Store shared with any session layer a test builds, so sessions survive across requests.
    pub store: MemoryStore,
}

impl TestContext {
    /// Builds the application state from the test database.
    ///
    /// The state type receives the database connection and [`TEST_PASSWORD_COST`].
    pub fn to_app_state<T>(&self) -> Result<T, TestError>
    where
        T: TryFrom<(DatabaseConnection, u32)>,
        T::Error: std::fmt::Display,
    {
        T::try_from((self.db.clone(), TEST_PASSWORD_COST))
            .map_err(|e| TestError::AppState(e.to_string()))
    }

    /// Number of rows currently in the table of `entity`.
    pub async fn count<E: EntityTrait>(&self, _entity: E) -> Result<u64, TestError>
    where
        E::Model: Sync,
    {
        Ok(E::find().count(&self.db).await?)
    }
}

impl TestContext {
    pub(crate) async fn new() -> Result<Self, TestError> {
        let store = MemoryStore::default();
        let session = Session::new(None, Arc::new(store.clone()), None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext { db, session, store })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }
}

/// Creates a [`TestContext`] with tables for the given entities.
///
/// ```ignore
/// let test = test_setup_with_tables!(entity::prelude::User)?;
/// ```
#[macro_export]
macro_rules! test_setup_with_tables {
    () => {{
        $crate::TestBuilder::new().build().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        $crate::TestBuilder::new()
            $(.with_table($entity))+
            .build()
            .await
    }};
}
