//! Mobile Price Watcher — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.
//!
//! See `README.md` for quickstart and `config/watcher.toml` for tuning.

use std::sync::Arc;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mobile_price_watcher::api::{create_router, AppState};
use mobile_price_watcher::bot::BotOptions;
use mobile_price_watcher::catalog::validate_catalog;
use mobile_price_watcher::config::WatcherConfig;
use mobile_price_watcher::data;
use mobile_price_watcher::metrics::Metrics;
use mobile_price_watcher::notify::TelegramNotifier;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - WATCHER_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("WATCHER_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mobile_price_watcher=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // This enables WATCHER_CONFIG_PATH / TELEGRAM_BOT_TOKEN from .env.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    enable_dev_tracing();

    let cfg = WatcherConfig::load().expect("Failed to load watcher config");

    // The embedded catalog must be structurally sound before we serve it.
    let catalog = data::phones();
    validate_catalog(catalog).expect("Embedded phone catalog is invalid");

    let metrics = Metrics::init(catalog);

    let notifier = Arc::new(TelegramNotifier::new(cfg.telegram_token.clone()));
    let state = AppState::new(catalog.to_vec(), notifier, BotOptions::from(&cfg));

    let router = create_router(state).merge(metrics.router());

    Ok(router.into())
}
