use thiserror::Error;

use crate::models::FieldErrors;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid product: {0}")]
    Validation(FieldErrors),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Persisted catalog is corrupt: {0}")]
    PersistenceCorrupt(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unknown product field: {0}")]
    UnknownField(String),

    #[error("Restocking product {0} would overflow its stock count")]
    StockOverflow(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Field-level messages when this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            CatalogError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        CatalogError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::PersistenceCorrupt(err.to_string())
    }
}
