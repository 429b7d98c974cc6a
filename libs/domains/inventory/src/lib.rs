//! Inventory Domain
//!
//! Product catalog core for a single-user stock tracker: an entity model with
//! a derived restock status, draft validation, a pure query engine, and a
//! store that writes the whole catalog through to a local key-value backend.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐      snapshot (&[Product])      ┌──────────────┐
//! │ CatalogStore │ ──────────────────────────────► │    Query     │ ← filter, sort, counts
//! └──────┬───────┘                                 └──────────────┘
//!        │ validate → mutate → persist
//! ┌──────▼───────┐
//! │ KeyValueStore│  ← In-memory or file backend
//! └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use domain_inventory::{
//!     CatalogQuery, CatalogStore, InMemoryStore, ProductDraft, ProductField, SortConfig,
//!     filter_and_sort,
//! };
//!
//! let mut store = CatalogStore::load(InMemoryStore::new());
//!
//! let draft = ProductDraft {
//!     name: "Desk Lamp".to_string(),
//!     sku: "DL-100".to_string(),
//!     category: "Lighting".to_string(),
//!     current_stock: 2,
//!     minimum_stock_level: 5,
//!     unit_price: 39.5,
//!     ..Default::default()
//! };
//! let lamp = store.add(draft).unwrap();
//!
//! let sort = SortConfig::default().request(ProductField::CurrentStock);
//! let view = filter_and_sort(store.list(), &CatalogQuery::new().with_search("lamp"), &sort);
//! assert_eq!(view[0].id, lamp.id);
//! ```

pub mod error;
pub mod models;
pub mod query;
pub mod seed;
mod serde_helpers;
pub mod storage;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use models::{
    FieldErrors, MAX_STOCK_LEVEL, Product, ProductDraft, ProductField, RESTOCK_BUFFER, RestockStatus,
    StatusCounts, derive_status,
};
pub use query::{
    CatalogQuery, CategoryFilter, SortConfig, SortDirection, StatusFilter, aggregate_counts,
    alerts_view, categories, filter_and_sort, low_stock,
};
pub use storage::{FileStore, InMemoryStore, KeyValueStore, StorageError, StorageResult};
pub use store::{CatalogStore, LoadSource, PRODUCTS_KEY};
pub use validation::validate;
