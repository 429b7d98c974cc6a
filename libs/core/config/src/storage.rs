use crate::{ConfigError, FromEnv, env_or_default};
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = ".stocksense";
pub const DEFAULT_PRODUCTS_KEY: &str = "products";

/// Local key-value storage configuration for the product catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding one file per key
    pub data_dir: PathBuf,
    /// Key under which the catalog snapshot is stored
    pub products_key: String,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>, products_key: String) -> Self {
        Self {
            data_dir: data_dir.into(),
            products_key,
        }
    }
}

impl FromEnv for StorageConfig {
    /// Reads from environment variables with defaults:
    /// - CATALOG_DATA_DIR: defaults to `.stocksense`
    /// - CATALOG_PRODUCTS_KEY: defaults to `products`
    fn from_env() -> Result<Self, ConfigError> {
        let data_dir = env_or_default("CATALOG_DATA_DIR", DEFAULT_DATA_DIR);
        let products_key = env_or_default("CATALOG_PRODUCTS_KEY", DEFAULT_PRODUCTS_KEY);

        if products_key.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: "CATALOG_PRODUCTS_KEY".to_string(),
                details: "must not be empty".to_string(),
            });
        }

        Ok(Self::new(data_dir, products_key))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR, DEFAULT_PRODUCTS_KEY.to_string())
    }
}
