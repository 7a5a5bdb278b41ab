//! # Market Snapshot
//! Reduces the whole catalog to the aggregate block the dashboard header and
//! the `/market` command render: average price, median spread, best value,
//! and the per-brand stability ranking.
//!
//! Everything here is a pure function of the catalog passed in; phones with
//! no listings are skipped defensively instead of failing the whole snapshot.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Phone;
use crate::pricing::{price_metrics, PriceMetrics};

/// Top-N cut of the brand ranking shown on the dashboard.
pub const DEFAULT_BRAND_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub average_price: f64,
    pub median_spread: f64,
    pub best_value: Option<BestValue>,
    pub rising_brands: Vec<BrandSpread>,
    pub total_listings: usize,
}

/// The globally cheapest listing and the phone carrying it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestValue {
    pub name: String,
    pub brand: String,
    pub price: u64,
    pub store: String,
}

/// Brand aggregate over its phones' spreads. Despite the `risingBrands` wire
/// name, the ranking is by price stability: low average spread first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSpread {
    pub brand: String,
    pub avg_spread: f64,
    pub max_spread: u64,
}

pub fn build_snapshot(phones: &[Phone]) -> MarketSnapshot {
    build_snapshot_with_limit(phones, DEFAULT_BRAND_LIMIT)
}

pub fn build_snapshot_with_limit(phones: &[Phone], brand_limit: usize) -> MarketSnapshot {
    // 1) Per-phone metrics; phones with no listings drop out of all aggregates.
    let mut ranked: Vec<(&Phone, PriceMetrics<'_>)> = Vec::with_capacity(phones.len());
    for phone in phones {
        if let Ok(metrics) = price_metrics(phone) {
            ranked.push((phone, metrics));
        }
    }

    // 2) Mean of per-phone lowest prices (one representative price per phone).
    let average_price = if ranked.is_empty() {
        0.0
    } else {
        let sum: f64 = ranked.iter().map(|(_, m)| m.lowest.price as f64).sum();
        sum / ranked.len() as f64
    };

    // 3) Median of the spreads.
    let mut spreads: Vec<u64> = ranked.iter().map(|(_, m)| m.spread).collect();
    spreads.sort_unstable();
    let median_spread = median(&spreads);

    // 4) Globally cheapest listing; min_by_key keeps the first phone on ties.
    let best_value = ranked
        .iter()
        .min_by_key(|(_, m)| m.lowest.price)
        .map(|(phone, m)| BestValue {
            name: phone.name.clone(),
            brand: phone.brand.clone(),
            price: m.lowest.price,
            store: m.lowest.store.clone(),
        });

    // 5) Brand aggregates: (spread sum, phone count, max spread) per brand.
    //    BTreeMap so equal averages later order by brand name.
    let mut by_brand: BTreeMap<&str, (u64, usize, u64)> = BTreeMap::new();
    for (phone, m) in &ranked {
        let entry = by_brand.entry(phone.brand.as_str()).or_insert((0, 0, 0));
        entry.0 += m.spread;
        entry.1 += 1;
        entry.2 = entry.2.max(m.spread);
    }

    // 6) Most price-stable brands first, cut to the display limit.
    let mut rising_brands: Vec<BrandSpread> = by_brand
        .into_iter()
        .map(|(brand, (sum, count, max_spread))| BrandSpread {
            brand: brand.to_string(),
            avg_spread: sum as f64 / count as f64,
            max_spread,
        })
        .collect();
    rising_brands.sort_by(|a, b| a.avg_spread.total_cmp(&b.avg_spread));
    rising_brands.truncate(brand_limit);

    // 7) Listings are counted across the whole catalog, not per ranked phone.
    let total_listings = phones.iter().map(|p| p.prices.len()).sum();

    MarketSnapshot {
        average_price,
        median_spread,
        best_value,
        rising_brands,
        total_listings,
    }
}

/// Median of an already-sorted slice; even counts average the two central
/// values, empty input is 0 by contract.
fn median(sorted: &[u64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}
