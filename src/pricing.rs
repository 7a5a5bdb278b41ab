//! # Price Metrics
//! Pure reduction of one phone's listings to `lowest` / `highest` / `spread`.
//! No I/O, no allocation beyond the error path; suitable for calling per
//! request without caching.

use serde::Serialize;

use crate::catalog::{CatalogError, Phone, PricePoint};

/// Derived view over one phone's listings; borrows from the phone and is
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceMetrics<'a> {
    pub lowest: &'a PricePoint,
    pub highest: &'a PricePoint,
    pub spread: u64,
}

/// Reduce a phone's listings in catalog order. Ties on price keep the
/// earlier listing for both ends, so repeated calls are stable.
///
/// A phone with no listings cannot be ranked and yields `EmptyListings`.
pub fn price_metrics(phone: &Phone) -> Result<PriceMetrics<'_>, CatalogError> {
    let mut listings = phone.prices.iter();
    let Some(first) = listings.next() else {
        return Err(CatalogError::EmptyListings {
            id: phone.id.clone(),
        });
    };

    // Strict comparisons keep the first occurrence on equal prices.
    let mut lowest = first;
    let mut highest = first;
    for listing in listings {
        if listing.price < lowest.price {
            lowest = listing;
        }
        if listing.price > highest.price {
            highest = listing;
        }
    }

    Ok(PriceMetrics {
        lowest,
        highest,
        spread: highest.price - lowest.price,
    })
}

/// Catalog-wide price envelope backing the dashboard's min/max inputs:
/// minimum of per-phone lowest prices, maximum of per-phone highest prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBounds {
    pub min: u64,
    pub max: u64,
}

/// `None` when no phone has a listing; phones without listings are skipped.
pub fn price_bounds(phones: &[Phone]) -> Option<PriceBounds> {
    let mut bounds: Option<PriceBounds> = None;
    for phone in phones {
        let Ok(metrics) = price_metrics(phone) else {
            continue;
        };
        bounds = Some(match bounds {
            None => PriceBounds {
                min: metrics.lowest.price,
                max: metrics.highest.price,
            },
            Some(b) => PriceBounds {
                min: b.min.min(metrics.lowest.price),
                max: b.max.max(metrics.highest.price),
            },
        });
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Shipping, Specs, StockStatus};

    fn mk_listing(store: &str, price: u64) -> PricePoint {
        PricePoint {
            store: store.to_string(),
            price,
            stock: StockStatus::InStock,
            shipping: Shipping::Paid,
            url: format!("https://example.ir/{store}"),
            updated_at: "2026-08-20T09:00:00Z".parse().expect("test timestamp"),
        }
    }

    fn mk_phone(id: &str, prices: Vec<PricePoint>) -> Phone {
        Phone {
            id: id.to_string(),
            brand: "سامسونگ".to_string(),
            name: id.to_string(),
            highlight: String::new(),
            release: "2024-01-17".to_string(),
            image: String::new(),
            specs: Specs {
                display: String::new(),
                storage: String::new(),
                camera: String::new(),
                battery: String::new(),
                chipset: String::new(),
            },
            prices,
        }
    }

    #[test]
    fn spread_is_highest_minus_lowest() {
        let phone = mk_phone(
            "galaxy-s24-ultra",
            vec![
                mk_listing("دیجی‌کالا", 52_400_000),
                mk_listing("تکنولایف", 49_900_000),
                mk_listing("همراه‌تل", 54_700_000),
            ],
        );
        let m = price_metrics(&phone).expect("metrics");
        assert_eq!(m.lowest.store, "تکنولایف");
        assert_eq!(m.highest.store, "همراه‌تل");
        assert_eq!(m.spread, 4_800_000);
    }

    #[test]
    fn ties_keep_the_first_listing_for_both_ends() {
        let phone = mk_phone(
            "tie",
            vec![
                mk_listing("اول", 10_000_000),
                mk_listing("دوم", 10_000_000),
                mk_listing("سوم", 10_000_000),
            ],
        );
        let m = price_metrics(&phone).expect("metrics");
        assert_eq!(m.lowest.store, "اول");
        assert_eq!(m.highest.store, "اول");
        assert_eq!(m.spread, 0);
    }

    #[test]
    fn single_listing_is_both_lowest_and_highest() {
        let phone = mk_phone("solo", vec![mk_listing("دیجی‌کالا", 9_300_000)]);
        let m = price_metrics(&phone).expect("metrics");
        assert_eq!(m.lowest.price, 9_300_000);
        assert_eq!(m.highest.price, 9_300_000);
        assert_eq!(m.spread, 0);
    }

    #[test]
    fn empty_listings_error_carries_the_phone_id() {
        let phone = mk_phone("ghost", vec![]);
        assert_eq!(
            price_metrics(&phone),
            Err(CatalogError::EmptyListings {
                id: "ghost".to_string()
            })
        );
    }

    #[test]
    fn bounds_span_lowest_low_and_highest_high() {
        let catalog = vec![
            mk_phone(
                "a",
                vec![mk_listing("دیجی‌کالا", 9_300_000), mk_listing("تکنولایف", 9_900_000)],
            ),
            mk_phone("b", vec![]),
            mk_phone(
                "c",
                vec![mk_listing("همراه‌تل", 61_500_000), mk_listing("موبایل ۱۴۰", 59_800_000)],
            ),
        ];
        let b = price_bounds(&catalog).expect("bounds");
        assert_eq!(b.min, 9_300_000);
        assert_eq!(b.max, 61_500_000);
    }

    #[test]
    fn bounds_are_none_without_any_listing() {
        assert_eq!(price_bounds(&[]), None);
        assert_eq!(price_bounds(&[mk_phone("empty", vec![])]), None);
    }
}
