use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{CatalogError, CatalogResult};
use crate::serde_helpers::{lenient_f64, lenient_i64};

/// Units added on top of the minimum stock level by a quick restock
pub const RESTOCK_BUFFER: i64 = 5;

/// Largest accepted stock count or minimum stock level
pub const MAX_STOCK_LEVEL: i64 = 1_000_000_000;

/// Restock status, derived from the current stock and the minimum stock level
///
/// Variants are ordered by severity, so sorting by status puts healthy
/// products first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum RestockStatus {
    /// Stock is at or above the minimum level
    #[serde(rename = "In Stock")]
    #[strum(serialize = "In Stock")]
    InStock,
    /// Stock is positive but below the minimum level
    #[serde(rename = "Low Stock")]
    #[strum(serialize = "Low Stock")]
    LowStock,
    /// Nothing left on hand
    #[serde(rename = "Out of Stock")]
    #[strum(serialize = "Out of Stock")]
    OutOfStock,
}

impl RestockStatus {
    /// Classify a stock level. An empty shelf is always out of stock, even
    /// when the minimum level is zero.
    pub fn derive(current_stock: i64, minimum_stock_level: i64) -> Self {
        if current_stock <= 0 {
            RestockStatus::OutOfStock
        } else if current_stock < minimum_stock_level {
            RestockStatus::LowStock
        } else {
            RestockStatus::InStock
        }
    }

    /// Whether a product with this status belongs in the alerts view
    pub fn needs_attention(self) -> bool {
        !matches!(self, RestockStatus::InStock)
    }
}

/// Derive the restock status for a stock pair
pub fn derive_status(current_stock: i64, minimum_stock_level: i64) -> RestockStatus {
    RestockStatus::derive(current_stock, minimum_stock_level)
}

/// Closed set of product field identifiers.
///
/// Used as the sort key of the query engine and as the key of validation
/// error maps. The canonical string form is the camelCase name used in the
/// persisted snapshot; the snake_case spelling is accepted when parsing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProductField {
    Id,
    Name,
    Description,
    Sku,
    Category,
    #[strum(to_string = "currentStock", serialize = "current_stock")]
    CurrentStock,
    #[strum(to_string = "minimumStockLevel", serialize = "minimum_stock_level")]
    MinimumStockLevel,
    #[strum(to_string = "restockThreshold", serialize = "restock_threshold")]
    RestockThreshold,
    #[strum(to_string = "unitPrice", serialize = "unit_price")]
    UnitPrice,
    #[strum(to_string = "supplierInfo", serialize = "supplier_info")]
    SupplierInfo,
    Location,
    Image,
    #[strum(to_string = "lastUpdated", serialize = "last_updated")]
    LastUpdated,
    #[strum(to_string = "restockStatus", serialize = "restock_status")]
    RestockStatus,
}

/// Product entity - a single stock-keeping record in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier, assigned once on creation
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Stock Keeping Unit, unique across the catalog (case-insensitive)
    pub sku: String,
    pub category: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub current_stock: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub minimum_stock_level: i64,
    /// Informational only, never consulted by status derivation
    #[serde(default, deserialize_with = "lenient_i64")]
    pub restock_threshold: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub unit_price: f64,
    #[serde(default)]
    pub supplier_info: String,
    #[serde(default)]
    pub location: String,
    /// Image URL
    #[serde(default)]
    pub image: String,
    pub last_updated: DateTime<Utc>,
    pub restock_status: RestockStatus,
}

/// Caller-supplied payload for creating or editing a product.
///
/// Missing fields deserialize to the empty form template: blank text and
/// zero numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    #[validate(custom(function = "not_blank", message = "Product name is required"))]
    pub name: String,
    pub description: String,
    #[validate(custom(function = "not_blank", message = "SKU is required"))]
    pub sku: String,
    #[validate(custom(function = "not_blank", message = "Category is required"))]
    pub category: String,
    #[validate(
        range(min = 0, message = "Stock cannot be negative"),
        custom(function = "within_stock_ceiling", message = "Stock is too large")
    )]
    #[serde(deserialize_with = "lenient_i64")]
    pub current_stock: i64,
    #[validate(
        range(min = 0, message = "Minimum stock level cannot be negative"),
        custom(function = "within_stock_ceiling", message = "Minimum stock level is too large")
    )]
    #[serde(deserialize_with = "lenient_i64")]
    pub minimum_stock_level: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub restock_threshold: i64,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[serde(deserialize_with = "lenient_f64")]
    pub unit_price: f64,
    pub supplier_info: String,
    pub location: String,
    pub image: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn within_stock_ceiling(value: i64) -> Result<(), ValidationError> {
    if value > MAX_STOCK_LEVEL {
        return Err(ValidationError::new("too_large"));
    }
    Ok(())
}

/// Field-level validation messages, keyed by field. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ProductField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Record a message for a field. The first message per field wins.
    pub fn insert(&mut self, field: ProductField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: ProductField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: ProductField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProductField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Number of products per restock status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: RestockStatus) {
        match status {
            RestockStatus::InStock => self.in_stock += 1,
            RestockStatus::LowStock => self.low_stock += 1,
            RestockStatus::OutOfStock => self.out_of_stock += 1,
        }
    }

    pub fn get(&self, status: RestockStatus) -> usize {
        match status {
            RestockStatus::InStock => self.in_stock,
            RestockStatus::LowStock => self.low_stock,
            RestockStatus::OutOfStock => self.out_of_stock,
        }
    }

    /// Products shown in the alerts view
    pub fn needing_attention(&self) -> usize {
        self.low_stock + self.out_of_stock
    }

    pub fn total(&self) -> usize {
        self.in_stock + self.low_stock + self.out_of_stock
    }
}

impl Product {
    /// Create a new product from a validated draft
    pub fn new(input: ProductDraft) -> Self {
        Self::with_id(Uuid::now_v7().to_string(), input, Utc::now())
    }

    pub(crate) fn with_id(id: String, input: ProductDraft, now: DateTime<Utc>) -> Self {
        let restock_status = RestockStatus::derive(input.current_stock, input.minimum_stock_level);
        Self {
            id,
            name: input.name,
            description: input.description,
            sku: input.sku,
            category: input.category,
            current_stock: input.current_stock,
            minimum_stock_level: input.minimum_stock_level,
            restock_threshold: input.restock_threshold,
            unit_price: input.unit_price,
            supplier_info: input.supplier_info,
            location: input.location,
            image: input.image,
            last_updated: now,
            restock_status,
        }
    }

    /// Replace every editable field with the draft's values. The id is kept,
    /// status and timestamp are recomputed.
    pub fn apply_draft(&mut self, input: ProductDraft) {
        self.name = input.name;
        self.description = input.description;
        self.sku = input.sku;
        self.category = input.category;
        self.current_stock = input.current_stock;
        self.minimum_stock_level = input.minimum_stock_level;
        self.restock_threshold = input.restock_threshold;
        self.unit_price = input.unit_price;
        self.supplier_info = input.supplier_info;
        self.location = input.location;
        self.image = input.image;
        self.touch();
    }

    /// Bring stock up to the minimum level plus [`RESTOCK_BUFFER`].
    ///
    /// Fails without changing anything when the target does not fit, which
    /// can only happen for records loaded from an unvalidated snapshot.
    pub fn restock(&mut self) -> CatalogResult<()> {
        self.current_stock = self
            .minimum_stock_level
            .checked_add(RESTOCK_BUFFER)
            .ok_or_else(|| CatalogError::StockOverflow(self.id.clone()))?;
        self.touch();
        Ok(())
    }

    /// Recompute the derived status from the stock counts
    pub fn refresh_status(&mut self) {
        self.restock_status = RestockStatus::derive(self.current_stock, self.minimum_stock_level);
    }

    pub fn needs_attention(&self) -> bool {
        self.restock_status.needs_attention()
    }

    fn touch(&mut self) {
        self.refresh_status();
        self.last_updated = Utc::now();
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            sku: product.sku.clone(),
            category: product.category.clone(),
            current_stock: product.current_stock,
            minimum_stock_level: product.minimum_stock_level,
            restock_threshold: product.restock_threshold,
            unit_price: product.unit_price,
            supplier_info: product.supplier_info.clone(),
            location: product.location.clone(),
            image: product.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn draft(current_stock: i64, minimum_stock_level: i64) -> ProductDraft {
        ProductDraft {
            name: "Desk Lamp".to_string(),
            sku: "DL-100".to_string(),
            category: "Lighting".to_string(),
            current_stock,
            minimum_stock_level,
            unit_price: 39.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_status_boundaries() {
        assert_eq!(derive_status(0, 5), RestockStatus::OutOfStock);
        assert_eq!(derive_status(3, 10), RestockStatus::LowStock);
        assert_eq!(derive_status(10, 5), RestockStatus::InStock);
        assert_eq!(derive_status(0, 0), RestockStatus::OutOfStock);
        assert_eq!(derive_status(-4, 0), RestockStatus::OutOfStock);
        assert_eq!(derive_status(10, 10), RestockStatus::InStock);
        assert_eq!(derive_status(9, 10), RestockStatus::LowStock);
    }

    #[test]
    fn test_derive_status_exhaustive_small_range() {
        for stock in -3..20 {
            for minimum in 0..20 {
                let expected = if stock <= 0 {
                    RestockStatus::OutOfStock
                } else if stock < minimum {
                    RestockStatus::LowStock
                } else {
                    RestockStatus::InStock
                };
                assert_eq!(derive_status(stock, minimum), expected, "({stock}, {minimum})");
            }
        }
    }

    #[test]
    fn test_restock_status_string_forms() {
        assert_eq!(RestockStatus::InStock.to_string(), "In Stock");
        assert_eq!(RestockStatus::LowStock.to_string(), "Low Stock");
        assert_eq!(RestockStatus::OutOfStock.to_string(), "Out of Stock");
        assert_eq!(
            serde_json::to_string(&RestockStatus::OutOfStock).unwrap(),
            "\"Out of Stock\""
        );
        assert_eq!(
            RestockStatus::from_str("Low Stock").unwrap(),
            RestockStatus::LowStock
        );
    }

    #[test]
    fn test_product_field_parsing() {
        assert_eq!(
            ProductField::from_str("currentStock").unwrap(),
            ProductField::CurrentStock
        );
        assert_eq!(
            ProductField::from_str("current_stock").unwrap(),
            ProductField::CurrentStock
        );
        assert_eq!(ProductField::from_str("sku").unwrap(), ProductField::Sku);
        assert_eq!(ProductField::UnitPrice.to_string(), "unitPrice");
        assert!(ProductField::from_str("colour").is_err());
    }

    #[test]
    fn test_new_product_derives_status_and_id() {
        let product = Product::new(draft(3, 10));
        assert_eq!(product.restock_status, RestockStatus::LowStock);
        assert!(!product.id.is_empty());
        assert!(product.needs_attention());

        let other = Product::new(draft(3, 10));
        assert_ne!(product.id, other.id);
    }

    #[test]
    fn test_apply_draft_keeps_id_and_rederives() {
        let mut product = Product::new(draft(0, 5));
        let id = product.id.clone();
        let before = product.last_updated;

        product.apply_draft(draft(12, 5));

        assert_eq!(product.id, id);
        assert_eq!(product.current_stock, 12);
        assert_eq!(product.restock_status, RestockStatus::InStock);
        assert!(product.last_updated >= before);
    }

    #[test]
    fn test_restock_sets_minimum_plus_buffer() {
        let mut product = Product::new(draft(2, 10));
        product.restock().unwrap();
        assert_eq!(product.current_stock, 15);
        assert_eq!(product.restock_status, RestockStatus::InStock);
    }

    #[test]
    fn test_restock_with_zero_minimum() {
        let mut product = Product::new(draft(0, 0));
        product.restock().unwrap();
        assert_eq!(product.current_stock, RESTOCK_BUFFER);
        assert_eq!(product.restock_status, RestockStatus::InStock);
    }

    #[test]
    fn test_restock_overflow_leaves_product_unchanged() {
        let mut product = Product::new(draft(3, 10));
        product.minimum_stock_level = i64::MAX;
        let before = product.clone();

        let err = product.restock().unwrap_err();

        assert!(matches!(err, CatalogError::StockOverflow(ref id) if *id == product.id));
        assert_eq!(product, before);
    }

    #[test]
    fn test_restock_threshold_is_inert() {
        let mut input = draft(8, 5);
        input.restock_threshold = 100;
        let product = Product::new(input);
        assert_eq!(product.restock_status, RestockStatus::InStock);
        assert_eq!(product.restock_threshold, 100);
    }

    #[test]
    fn test_draft_from_product_round_trips_editable_fields() {
        let product = Product::new(draft(7, 3));
        let prefill = ProductDraft::from(&product);
        assert_eq!(prefill, draft(7, 3));
    }

    #[test]
    fn test_product_serializes_with_camel_case_keys() {
        let product = Product::new(draft(7, 3));
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["currentStock"], 7);
        assert_eq!(value["minimumStockLevel"], 3);
        assert_eq!(value["restockStatus"], "In Stock");
        assert!(value["lastUpdated"].is_string());
    }

    #[test]
    fn test_draft_deserializes_missing_fields_as_empty_template() {
        let draft: ProductDraft = serde_json::from_str(r#"{"name":"Mouse"}"#).unwrap();
        assert_eq!(draft.name, "Mouse");
        assert_eq!(draft.sku, "");
        assert_eq!(draft.current_stock, 0);
        assert_eq!(draft.unit_price, 0.0);
    }

    #[test]
    fn test_product_accepts_blank_numbers_from_browser_form() {
        let raw = r#"{
            "id": "1712345678901",
            "name": "Tape",
            "sku": "TP-1",
            "category": "Office",
            "currentStock": "",
            "minimumStockLevel": "4",
            "restockThreshold": "",
            "unitPrice": "",
            "lastUpdated": "2024-04-05T10:21:18.901Z",
            "restockStatus": "Low Stock"
        }"#;

        let product: Product = serde_json::from_str(raw).unwrap();

        assert_eq!(product.current_stock, 0);
        assert_eq!(product.minimum_stock_level, 4);
        assert_eq!(product.restock_threshold, 0);
        assert_eq!(product.unit_price, 0.0);
    }

    #[test]
    fn test_product_rejects_non_numeric_stock() {
        let raw = r#"{
            "id": "1", "name": "Tape", "sku": "TP-1", "category": "Office",
            "currentStock": "plenty", "minimumStockLevel": 1, "unitPrice": 1.0,
            "lastUpdated": "2024-04-05T10:21:18.901Z", "restockStatus": "In Stock"
        }"#;
        assert!(serde_json::from_str::<Product>(raw).is_err());
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.insert(ProductField::Sku, "SKU is required");
        errors.insert(ProductField::Sku, "SKU must be unique");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(ProductField::Sku), Some("SKU is required"));
        assert_eq!(errors.to_string(), "sku: SKU is required");
    }

    #[test]
    fn test_status_counts() {
        let mut counts = StatusCounts::default();
        counts.record(RestockStatus::InStock);
        counts.record(RestockStatus::LowStock);
        counts.record(RestockStatus::LowStock);
        counts.record(RestockStatus::OutOfStock);
        assert_eq!(counts.get(RestockStatus::LowStock), 2);
        assert_eq!(counts.needing_attention(), 3);
        assert_eq!(counts.total(), 4);
    }
}
