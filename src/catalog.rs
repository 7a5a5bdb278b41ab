// src/catalog.rs
//! Catalog model: phones, their per-store price listings, and the structural
//! checks the rest of the engine relies on. No aggregation logic lives here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Structural failures around catalog data. Ranking code returns
/// `EmptyListings`; the boot-time validator returns the field errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("phone `{id}` has no price listings")]
    EmptyListings { id: String },
    #[error("phone at index {index} has a blank `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("duplicate phone id `{id}`")]
    DuplicateId { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Display label used in chat replies (same wording as the dashboard pills).
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "موجود",
            StockStatus::LowStock => "موجودی محدود",
            StockStatus::OutOfStock => "ناموجود",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shipping {
    Free,
    Paid,
}

impl Shipping {
    pub fn label(&self) -> &'static str {
        match self {
            Shipping::Free => "ارسال رایگان",
            Shipping::Paid => "هزینه ارسال",
        }
    }
}

/// One store's offer for a phone. `price` is an integer IRR amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub store: String,
    pub price: u64,
    pub stock: StockStatus,
    pub shipping: Shipping,
    pub url: String,
    pub updated_at: DateTime<Utc>,
}

/// The fixed spec sheet. Opaque to the engine except as search text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specs {
    pub display: String,
    pub storage: String,
    pub camera: String,
    pub battery: String,
    pub chipset: String,
}

/// A catalog entry. `id` is the identity; `prices` keeps catalog order,
/// which the tie-breaking rules downstream depend on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    pub id: String,
    pub brand: String,
    pub name: String,
    pub highlight: String,
    pub release: String,
    pub image: String,
    pub specs: Specs,
    pub prices: Vec<PricePoint>,
}

impl Phone {
    /// Lowercased blob the free-text search matches against: name, brand,
    /// highlight and the five spec lines, joined with single spaces.
    pub fn search_haystack(&self) -> String {
        [
            self.name.as_str(),
            self.brand.as_str(),
            self.highlight.as_str(),
            self.specs.display.as_str(),
            self.specs.storage.as_str(),
            self.specs.camera.as_str(),
            self.specs.battery.as_str(),
            self.specs.chipset.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}

/// Boot-time validation of the seed data: identity fields present, ids
/// unique. Listing-level gaps are reported per phone by the metrics layer.
pub fn validate_catalog(phones: &[Phone]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for (index, phone) in phones.iter().enumerate() {
        if phone.id.trim().is_empty() {
            return Err(CatalogError::MissingField { index, field: "id" });
        }
        if phone.name.trim().is_empty() {
            return Err(CatalogError::MissingField { index, field: "name" });
        }
        if phone.brand.trim().is_empty() {
            return Err(CatalogError::MissingField { index, field: "brand" });
        }
        if !seen.insert(phone.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                id: phone.id.clone(),
            });
        }
    }
    Ok(())
}

/// Brands in first-appearance order, deduplicated (the dashboard's brand picker).
pub fn distinct_brands(phones: &[Phone]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for phone in phones {
        if seen.insert(phone.brand.as_str()) {
            out.push(phone.brand.as_str());
        }
    }
    out
}
