// src/data.rs
//! Embedded seed catalog. The JSON ships inside the binary so the service
//! boots with data on a fresh deploy; `main` validates it before serving.

use once_cell::sync::Lazy;

use crate::catalog::Phone;

static CATALOG: Lazy<Vec<Phone>> = Lazy::new(|| {
    let raw = include_str!("../phone_catalog.json");
    serde_json::from_str::<Vec<Phone>>(raw).expect("valid embedded phone catalog")
});

/// The seed catalog in file order. File order is load-bearing: brand pickers
/// and tie-breaking both key off it.
pub fn phones() -> &'static [Phone] {
    &CATALOG
}
