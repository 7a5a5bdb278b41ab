// src/query.rs
//! Catalog queries: price-range filter, free-text search, and sorting.
//! All three borrow the catalog and compose, so the API layer can chain
//! range → brand → search → sort without cloning phones.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::catalog::Phone;
use crate::pricing::price_metrics;

/// Keep a phone iff ANY of its listings' price lies in `[min, max]`; an
/// absent bound is open. The match is listing-level existence, not the
/// phone's lowest price, so a phone whose cheapest offer is below `min`
/// still passes when a pricier store falls inside the range.
pub fn filter_by_price_range<'a, I>(phones: I, min: Option<u64>, max: Option<u64>) -> Vec<&'a Phone>
where
    I: IntoIterator<Item = &'a Phone>,
{
    phones
        .into_iter()
        .filter(|phone| {
            phone.prices.iter().any(|listing| {
                min.is_none_or(|lo| listing.price >= lo)
                    && max.is_none_or(|hi| listing.price <= hi)
            })
        })
        .collect()
}

/// Case-insensitive substring containment over the joined haystack
/// (name, brand, highlight, spec lines). Blank queries match everything;
/// there is no tokenization or ranking.
pub fn search_phones<'a, I>(phones: I, query: &str) -> Vec<&'a Phone>
where
    I: IntoIterator<Item = &'a Phone>,
{
    let needle = query.trim().to_lowercase();
    let phones = phones.into_iter();
    if needle.is_empty() {
        return phones.collect();
    }
    phones
        .filter(|phone| phone.search_haystack().contains(&needle))
        .collect()
}

/// Sort strategies offered by the dashboard; the serde names double as the
/// `sort` query-parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    BestPrice,
    PriceSpread,
    Newest,
    Brand,
}

/// Stable sort of the catalog view. Phones that cannot be ranked (no
/// listings) sink to the end of the metric-based orders, keeping their
/// relative order.
pub fn sort_phones<'a, I>(phones: I, sort: SortOption) -> Vec<&'a Phone>
where
    I: IntoIterator<Item = &'a Phone>,
{
    let mut out: Vec<&Phone> = phones.into_iter().collect();
    match sort {
        SortOption::BestPrice => {
            // (0, price) ranks before every (1, _) sentinel.
            out.sort_by_cached_key(|p| match price_metrics(p) {
                Ok(m) => (0u8, m.lowest.price),
                Err(_) => (1u8, 0),
            });
        }
        SortOption::PriceSpread => {
            out.sort_by_cached_key(|p| {
                Reverse(match price_metrics(p) {
                    Ok(m) => (1u8, m.spread),
                    Err(_) => (0u8, 0),
                })
            });
        }
        SortOption::Newest => {
            out.sort_by_cached_key(|p| Reverse(p.release.clone()));
        }
        SortOption::Brand => {
            out.sort_by_cached_key(|p| (p.brand.clone(), p.name.clone()));
        }
    }
    out
}
