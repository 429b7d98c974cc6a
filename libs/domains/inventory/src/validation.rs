//! Draft validation against the current catalog

use validator::Validate;

use crate::models::{FieldErrors, Product, ProductDraft, ProductField};

pub const SKU_NOT_UNIQUE: &str = "SKU must be unique";
pub const PRICE_NEGATIVE: &str = "Price cannot be negative";
pub const PRICE_NOT_FINITE: &str = "Price must be a finite number";

/// Validate a draft, returning field-level messages (empty when valid).
///
/// `exclude_id` names the record being edited so that it does not collide
/// with its own SKU.
pub fn validate(draft: &ProductDraft, catalog: &[Product], exclude_id: Option<&str>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Err(report) = draft.validate() {
        for (key, field_errors) in report.field_errors() {
            let Ok(field) = key.parse::<ProductField>() else {
                continue;
            };
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                errors.insert(field, message);
            }
        }
    }

    // NaN and infinity slip through the range check, and neither survives
    // the JSON snapshot
    if !draft.unit_price.is_finite() {
        errors.insert(ProductField::UnitPrice, PRICE_NOT_FINITE);
    }

    if !errors.contains(ProductField::Sku) && sku_taken(catalog, &draft.sku, exclude_id) {
        errors.insert(ProductField::Sku, SKU_NOT_UNIQUE);
    }

    errors
}

/// Whether another product already uses this SKU (case-insensitive)
pub fn sku_taken(catalog: &[Product], sku: &str, exclude_id: Option<&str>) -> bool {
    let sku = sku.to_lowercase();
    catalog
        .iter()
        .filter(|p| exclude_id != Some(p.id.as_str()))
        .any(|p| p.sku.to_lowercase() == sku)
}
