//! Reconciler configuration structures.

use std::env;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::AppResult;

/// Interview store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackendConfig {
    /// In-memory store for development/testing.
    InMemory,
    /// Postgres store.
    Postgres,
}

/// View cache backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackendConfig {
    /// No view cache; invalidation is a no-op.
    None,
    /// In-memory view cache.
    InMemory,
}

/// Root reconciler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Interview store backend.
    pub store: StoreBackendConfig,
    /// View cache backend.
    #[serde(default = "default_cache")]
    pub cache: CacheBackendConfig,
    /// Connection string, required for the postgres store.
    #[serde(default)]
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: usize,
    /// Capacity of the in-memory audit buffer; 0 disables it.
    #[serde(default)]
    pub audit_capacity: usize,
}

const fn default_cache() -> CacheBackendConfig {
    CacheBackendConfig::InMemory
}

const fn default_pool_max_size() -> usize {
    8
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            store: StoreBackendConfig::InMemory,
            cache: default_cache(),
            database_url: None,
            pool_max_size: default_pool_max_size(),
            audit_capacity: 0,
        }
    }
}

impl ReconcilerConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Describes the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.pool_max_size == 0 {
            return Err("pool_max_size must be greater than 0".into());
        }
        if self.store == StoreBackendConfig::Postgres
            && self.database_url.as_deref().is_none_or(str::is_empty)
        {
            return Err("database_url is required for the postgres store".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Parse or validation failures.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the process environment, after reading `.env`
    /// if one exists.
    ///
    /// Recognised variables: `INTERVIEW_STORE` (`in_memory` | `postgres`),
    /// `INTERVIEW_CACHE` (`none` | `in_memory`), `DATABASE_URL`,
    /// `INTERVIEW_DB_POOL_SIZE` and `INTERVIEW_AUDIT_CAPACITY`.
    ///
    /// # Errors
    ///
    /// Unparseable values or a configuration that fails validation.
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        let mut cfg = Self::default();

        if let Ok(store) = env::var("INTERVIEW_STORE") {
            cfg.store = parse_variant(&store).context("invalid INTERVIEW_STORE")?;
        }
        if let Ok(cache) = env::var("INTERVIEW_CACHE") {
            cfg.cache = parse_variant(&cache).context("invalid INTERVIEW_CACHE")?;
        }
        cfg.database_url = env::var("DATABASE_URL").ok();
        if let Ok(size) = env::var("INTERVIEW_DB_POOL_SIZE") {
            cfg.pool_max_size = size.parse().context("invalid INTERVIEW_DB_POOL_SIZE")?;
        }
        if let Ok(capacity) = env::var("INTERVIEW_AUDIT_CAPACITY") {
            cfg.audit_capacity = capacity
                .parse()
                .context("invalid INTERVIEW_AUDIT_CAPACITY")?;
        }

        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}

fn parse_variant<T: for<'de> Deserialize<'de>>(raw: &str) -> AppResult<T> {
    Ok(serde_json::from_value(serde_json::Value::String(
        raw.trim().to_ascii_lowercase(),
    ))?)
}
