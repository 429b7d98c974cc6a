//! Catalog store - the single owner of the persisted product collection

use core_config::storage::StorageConfig;
use tracing::{debug, info, instrument, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{FieldErrors, Product, ProductDraft};
use crate::query;
use crate::seed::seed_products;
use crate::storage::{FileStore, KeyValueStore};
use crate::validation::validate;

/// Backend key holding the serialized catalog
pub const PRODUCTS_KEY: &str = "products";

/// Where the in-memory catalog came from when the store was loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// A readable snapshot was found
    Persisted,
    /// Nothing was persisted yet; the demo catalog was installed
    Seeded,
    /// The snapshot could not be read or parsed; the demo catalog replaced it
    Recovered { reason: String },
}

/// Catalog store providing validated mutations over a key-value backend.
///
/// Every mutation is write-through: the whole collection is serialized and
/// written before the call returns. A failed write leaves the in-memory
/// collection untouched, so memory and backend never diverge.
pub struct CatalogStore<S: KeyValueStore> {
    backend: S,
    key: String,
    products: Vec<Product>,
    source: LoadSource,
}

/// Parse a persisted snapshot. Stored statuses are not trusted and are
/// recomputed from the stock counts.
pub fn decode_snapshot(raw: &str) -> CatalogResult<Vec<Product>> {
    let mut products: Vec<Product> = serde_json::from_str(raw)?;
    for product in &mut products {
        product.refresh_status();
    }
    Ok(products)
}

pub fn encode_snapshot(products: &[Product]) -> CatalogResult<String> {
    Ok(serde_json::to_string(products)?)
}

impl CatalogStore<FileStore> {
    /// Open the file-backed catalog described by the configuration
    pub fn from_config(config: &StorageConfig) -> CatalogResult<Self> {
        let backend = FileStore::from_config(config)?;
        Ok(Self::load_with_key(backend, &config.products_key))
    }
}

impl<S: KeyValueStore> CatalogStore<S> {
    /// Load the catalog from the backend under the default key
    pub fn load(backend: S) -> Self {
        Self::load_with_key(backend, PRODUCTS_KEY)
    }

    /// Load the catalog stored under `key`.
    ///
    /// Never fails: a missing snapshot installs the demo catalog, and an
    /// unreadable one is replaced by it (see [`CatalogStore::load_source`]).
    #[instrument(skip(backend))]
    pub fn load_with_key(backend: S, key: &str) -> Self {
        let loaded = match backend.get(key) {
            Ok(Some(raw)) => decode_snapshot(&raw),
            Ok(None) => {
                info!("No persisted catalog, installing demo data");
                return Self::install(backend, key, seed_products(), LoadSource::Seeded);
            }
            Err(e) => Err(CatalogError::from(e)),
        };

        match loaded {
            Ok(products) => {
                info!(count = products.len(), "Loaded persisted catalog");
                Self::install(backend, key, products, LoadSource::Persisted)
            }
            Err(e) => {
                warn!(error = %e, "Persisted catalog unreadable, restoring demo data");
                let source = LoadSource::Recovered {
                    reason: e.to_string(),
                };
                Self::install(backend, key, seed_products(), source)
            }
        }
    }

    fn install(backend: S, key: &str, products: Vec<Product>, source: LoadSource) -> Self {
        let mut store = Self {
            backend,
            key: key.to_string(),
            products: Vec::new(),
            source,
        };
        if let Err(e) = store.commit(products.clone()) {
            warn!(error = %e, "Could not write catalog snapshot after load");
            store.products = products;
        }
        store
    }

    pub fn load_source(&self) -> &LoadSource {
        &self.source
    }

    /// Read-only snapshot of every product, in insertion order
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// `All` followed by the distinct categories of the current catalog
    pub fn categories(&self) -> Vec<String> {
        query::categories(&self.products)
    }

    /// Check a draft against the current catalog without mutating anything
    pub fn validate(&self, draft: &ProductDraft, exclude_id: Option<&str>) -> FieldErrors {
        validate(draft, &self.products, exclude_id)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Create a new product
    #[instrument(skip(self, draft), fields(sku = %draft.sku))]
    pub fn add(&mut self, draft: ProductDraft) -> CatalogResult<Product> {
        self.check(&draft, None)?;

        let product = Product::new(draft);
        let mut next = self.products.clone();
        next.push(product.clone());
        self.commit(next)?;

        info!(product_id = %product.id, "Added product");
        Ok(product)
    }

    /// Replace an existing product's editable fields
    #[instrument(skip(self, draft))]
    pub fn update(&mut self, id: &str, draft: ProductDraft) -> CatalogResult<Product> {
        let index = self.position(id)?;
        self.check(&draft, Some(id))?;

        let mut next = self.products.clone();
        next[index].apply_draft(draft);
        let updated = next[index].clone();
        self.commit(next)?;

        info!(product_id = %id, status = %updated.restock_status, "Updated product");
        Ok(updated)
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &str) -> CatalogResult<Product> {
        let index = self.position(id)?;

        let mut next = self.products.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!(product_id = %id, "Removed product");
        Ok(removed)
    }

    /// Replace the whole catalog with the demo data
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> CatalogResult<()> {
        self.commit(seed_products())?;
        info!("Catalog reset to demo data");
        Ok(())
    }

    /// Bring a product's stock to its minimum level plus the restock buffer
    #[instrument(skip(self))]
    pub fn quick_restock(&mut self, id: &str) -> CatalogResult<Product> {
        let index = self.position(id)?;

        let mut next = self.products.clone();
        next[index].restock()?;
        let restocked = next[index].clone();
        self.commit(next)?;

        info!(
            product_id = %id,
            current_stock = restocked.current_stock,
            status = %restocked.restock_status,
            "Restocked product"
        );
        Ok(restocked)
    }

    fn position(&self, id: &str) -> CatalogResult<usize> {
        self.products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    fn check(&self, draft: &ProductDraft, exclude_id: Option<&str>) -> CatalogResult<()> {
        let errors = validate(draft, &self.products, exclude_id);
        if errors.is_empty() {
            Ok(())
        } else {
            debug!(%errors, "Rejected draft");
            Err(CatalogError::Validation(errors))
        }
    }

    /// Write the candidate collection, then adopt it
    fn commit(&mut self, next: Vec<Product>) -> CatalogResult<()> {
        let raw = encode_snapshot(&next)?;
        self.backend.set(&self.key, &raw)?;
        debug!(key = %self.key, count = next.len(), "Persisted catalog");
        self.products = next;
        Ok(())
    }
}
