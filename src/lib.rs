// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod bot;
pub mod catalog;
pub mod config;
pub mod data;
pub mod format;
pub mod metrics;
pub mod pricing;
pub mod query;
pub mod snapshot;

// Outbound delivery (Telegram behind the Notifier trait)
pub mod notify;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::catalog::{CatalogError, Phone, PricePoint, Shipping, Specs, StockStatus};
pub use crate::config::WatcherConfig;
pub use crate::notify::{DeliveryStatus, Notifier, TelegramNotifier};
pub use crate::snapshot::{build_snapshot, MarketSnapshot};
