//! Query engine - pure filtering, sorting and aggregation over a catalog snapshot
//!
//! Nothing here mutates its input. Every function is total over any slice,
//! including an empty one, and filtering always happens before sorting.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Product, ProductField, RestockStatus, StatusCounts};

/// Category selection; `All` is the sentinel that matches every product
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub const ALL: &'static str = "All";

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

/// Search term plus category selection for the products view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    pub category: CategoryFilter,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.parse().unwrap_or_default();
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        matches_search(product, &self.search.to_lowercase()) && self.category.matches(&product.category)
    }
}

/// Status selection in the alerts view
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    #[strum(to_string = "low_only", serialize = "low")]
    LowOnly,
    #[strum(to_string = "out_only", serialize = "out")]
    OutOnly,
}

impl StatusFilter {
    pub fn matches(self, product: &Product) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::LowOnly => product.restock_status == RestockStatus::LowStock,
            StatusFilter::OutOnly => product.restock_status == RestockStatus::OutOfStock,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: ProductField,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::ascending(ProductField::Name)
    }
}

impl SortConfig {
    pub fn ascending(key: ProductField) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: ProductField) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Initial sort of the alerts view: emptiest shelves first
    pub fn alerts_default() -> Self {
        Self::ascending(ProductField::CurrentStock)
    }

    /// Column-header click: the same key flips direction, a new key starts
    /// ascending.
    pub fn request(self, key: ProductField) -> Self {
        if key == self.key {
            Self {
                key,
                direction: self.direction.toggled(),
            }
        } else {
            Self::ascending(key)
        }
    }

    /// Like [`SortConfig::request`], for keys arriving as text
    pub fn request_named(self, key: &str) -> CatalogResult<Self> {
        let field = key
            .parse::<ProductField>()
            .map_err(|_| CatalogError::UnknownField(key.to_string()))?;
        Ok(self.request(field))
    }

    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = compare_field(a, b, self.key);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Natural ordering of a single field
pub fn compare_field(a: &Product, b: &Product, field: ProductField) -> Ordering {
    match field {
        ProductField::Id => a.id.cmp(&b.id),
        ProductField::Name => a.name.cmp(&b.name),
        ProductField::Description => a.description.cmp(&b.description),
        ProductField::Sku => a.sku.cmp(&b.sku),
        ProductField::Category => a.category.cmp(&b.category),
        ProductField::CurrentStock => a.current_stock.cmp(&b.current_stock),
        ProductField::MinimumStockLevel => a.minimum_stock_level.cmp(&b.minimum_stock_level),
        ProductField::RestockThreshold => a.restock_threshold.cmp(&b.restock_threshold),
        ProductField::UnitPrice => a.unit_price.total_cmp(&b.unit_price),
        ProductField::SupplierInfo => a.supplier_info.cmp(&b.supplier_info),
        ProductField::Location => a.location.cmp(&b.location),
        ProductField::Image => a.image.cmp(&b.image),
        ProductField::LastUpdated => a.last_updated.cmp(&b.last_updated),
        ProductField::RestockStatus => a.restock_status.cmp(&b.restock_status),
    }
}

/// Case-insensitive substring match on name, SKU and description.
/// `needle` must already be lowercase.
fn matches_search(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.name.to_lowercase().contains(needle)
        || product.sku.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

/// Stable sort in place
pub fn sort(products: &mut [&Product], config: &SortConfig) {
    products.sort_by(|a, b| config.compare(a, b));
}

/// Products view: search and category filter, then sort
pub fn filter_and_sort<'a>(
    snapshot: &'a [Product],
    query: &CatalogQuery,
    config: &SortConfig,
) -> Vec<&'a Product> {
    let mut result: Vec<&Product> = snapshot.iter().filter(|p| query.matches(p)).collect();
    sort(&mut result, config);
    result
}

/// Products that are low on stock or out of stock, in catalog order
pub fn low_stock(snapshot: &[Product]) -> Vec<&Product> {
    snapshot.iter().filter(|p| p.needs_attention()).collect()
}

/// Alerts view: the low-stock subset, narrowed by status, then sorted
pub fn alerts_view<'a>(
    snapshot: &'a [Product],
    status: StatusFilter,
    config: &SortConfig,
) -> Vec<&'a Product> {
    let mut result: Vec<&Product> = snapshot
        .iter()
        .filter(|p| p.needs_attention() && status.matches(p))
        .collect();
    sort(&mut result, config);
    result
}

/// Count products per restock status
pub fn aggregate_counts<'a>(products: impl IntoIterator<Item = &'a Product>) -> StatusCounts {
    products
        .into_iter()
        .fold(StatusCounts::default(), |mut counts, product| {
            counts.record(product.restock_status);
            counts
        })
}

/// Selectable categories: the `All` sentinel followed by every distinct
/// category in order of first appearance
pub fn categories(snapshot: &[Product]) -> Vec<String> {
    let mut result = vec![CategoryFilter::ALL.to_string()];
    for product in snapshot {
        if !result[1..].contains(&product.category) {
            result.push(product.category.clone());
        }
    }
    result
}
