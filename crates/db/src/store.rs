//! # Key-Value Store
//!
//! The device keeps its state as a handful of whole JSON documents, each under
//! a fixed key. Writes replace the document in one statement, so a reader sees
//! either the previous document or the new one, never a mix.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use tokio::sync::RwLock;

use crate::{models::DbKeyValue, DbPool};

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    async fn remove_item(&self, key: &str) -> Result<()>;
}

/// SQLite-backed store, one row per key.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        tracing::debug!("Reading key: {}", key);

        let row = sqlx::query_as::<_, DbKeyValue>(
            r#"
            SELECT key, value, updated_at
            FROM kv_store
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.value))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        tracing::debug!("Writing key: {} ({} bytes)", key, value.len());

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        tracing::debug!("Removing key: {}", key);

        sqlx::query(
            r#"
            DELETE FROM kv_store
            WHERE key = $1
            "#,
        )
        .bind(key)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Process-local store with the same semantics, for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().await.remove(key);
        Ok(())
    }
}
