//! SQLite test infrastructure
//!
//! Every `TestDatabase` is a private in-memory database, so tests can run in
//! parallel without sharing rows and nothing needs cleaning up.

use database::sqlite::{SqliteConfig, connect_from_config};
use sea_orm::{ConnectionTrait, DatabaseConnection};

/// In-memory SQLite database for a single test
pub struct TestDatabase {
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    /// Open a fresh, empty in-memory database
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// // Use db.connection() to create your repository
    /// # }
    /// ```
    pub async fn new() -> Self {
        let connection = connect_from_config(SqliteConfig::in_memory())
            .await
            .expect("Failed to open in-memory SQLite database");

        tracing::debug!("Test database ready (in-memory SQLite)");

        Self { connection }
    }

    /// Open a fresh database and run `schema` against it
    ///
    /// `schema` may hold several statements separated by `;`.
    pub async fn with_schema(schema: &str) -> Self {
        let db = Self::new().await;
        db.execute(schema).await;
        db
    }

    /// Run raw SQL, panicking on failure
    pub async fn execute(&self, sql: &str) {
        self.connection
            .execute_unprepared(sql)
            .await
            .unwrap_or_else(|e| panic!("Failed to execute test SQL: {e}\n{sql}"));
    }

    /// Get a handle to the database (pools are cheap to clone)
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }
}
