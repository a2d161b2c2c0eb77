use async_trait::async_trait;
use mockall::mock;
use sqlx::sqlite::SqlitePoolOptions;

use crate::store::KeyValueStore;

// Mock store for testing
mock! {
    pub KvStore {}

    #[async_trait]
    impl KeyValueStore for KvStore {
        async fn get_item(&self, key: &str) -> eyre::Result<Option<String>>;

        async fn set_item(&self, key: &str, value: &str) -> eyre::Result<()>;

        async fn remove_item(&self, key: &str) -> eyre::Result<()>;
    }
}

/// In-memory SQLite pool with the schema applied.
///
/// Limited to one connection: every new `:memory:` connection would open a
/// separate, empty database.
pub async fn create_test_pool() -> eyre::Result<crate::DbPool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    crate::schema::initialize_database(&pool).await?;

    Ok(pool)
}
