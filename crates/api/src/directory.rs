//! # Barbershop Directory
//!
//! Barbershop records live in a remote document store that this service only
//! reads. The directory trait hides whether they come from that store or from
//! a local JSON document.

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use corteya_core::models::barbershop::{normalize_directory, Barbershop};
use eyre::{eyre, Result, WrapErr};
use serde_json::Value;

use crate::config::DirectorySource;

#[async_trait]
pub trait BarbershopDirectory: Send + Sync {
    /// All barbershops sorted by name.
    async fn list_barbershops(&self) -> Result<Vec<Barbershop>>;

    async fn get_barbershop(&self, id: &str) -> Result<Option<Barbershop>>;
}

/// Client for a document store that serves `<path>.json` resources.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDirectory {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
        }
    }

    async fn fetch(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(eyre!("Directory request {} failed ({}): {}", url, status, error_text));
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl BarbershopDirectory for HttpDirectory {
    async fn list_barbershops(&self) -> Result<Vec<Barbershop>> {
        let raw = self.fetch("barbershops.json").await?;
        Ok(normalize_directory(raw))
    }

    async fn get_barbershop(&self, id: &str) -> Result<Option<Barbershop>> {
        let mut raw = self.fetch(&format!("barbershops/{}.json", id)).await?;
        if raw.is_null() {
            return Ok(None);
        }
        if let Value::Object(map) = &mut raw {
            map.entry("id").or_insert_with(|| Value::from(id));
        }

        let shop = serde_json::from_value(raw)
            .wrap_err_with(|| format!("Malformed barbershop record {}", id))?;
        Ok(Some(shop))
    }
}

/// Fixed set of barbershops held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    shops: Vec<Barbershop>,
}

impl StaticDirectory {
    pub fn new(mut shops: Vec<Barbershop>) -> Self {
        shops.sort_by(|a, b| a.name.cmp(&b.name));
        Self { shops }
    }

    pub fn from_json(raw: Value) -> Self {
        Self {
            shops: normalize_directory(raw),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read barbershops file {}", path.display()))?;
        let raw: Value = serde_json::from_str(&text)
            .wrap_err_with(|| format!("Invalid JSON in {}", path.display()))?;
        Ok(Self::from_json(raw))
    }
}

#[async_trait]
impl BarbershopDirectory for StaticDirectory {
    async fn list_barbershops(&self) -> Result<Vec<Barbershop>> {
        Ok(self.shops.clone())
    }

    async fn get_barbershop(&self, id: &str) -> Result<Option<Barbershop>> {
        Ok(self.shops.iter().find(|s| s.id == id).cloned())
    }
}

pub fn build_directory(source: &DirectorySource) -> Result<Arc<dyn BarbershopDirectory>> {
    Ok(match source {
        DirectorySource::Remote(base_url) => Arc::new(HttpDirectory::new(base_url)),
        DirectorySource::File(path) => Arc::new(StaticDirectory::from_file(path)?),
    })
}
