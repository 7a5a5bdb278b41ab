// src/api.rs
//! HTTP surface: catalog queries for the storefront and the Telegram
//! webhook. Handlers stay thin; all ranking lives in the library modules.

use std::sync::Arc;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use shuttle_axum::axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::bot::{build_reply, BotOptions};
use crate::catalog::{distinct_brands, Phone};
use crate::notify::{DeliveryStatus, Notifier};
use crate::pricing::{price_bounds, price_metrics, PriceBounds};
use crate::query::{filter_by_price_range, search_phones, sort_phones, SortOption};
use crate::snapshot::{build_snapshot_with_limit, MarketSnapshot};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Vec<Phone>>,
    pub notifier: Arc<dyn Notifier>,
    pub options: BotOptions,
}

impl AppState {
    pub fn new(catalog: Vec<Phone>, notifier: Arc<dyn Notifier>, options: BotOptions) -> Self {
        Self {
            catalog: Arc::new(catalog),
            notifier,
            options,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/market", get(market))
        .route("/api/phones", get(list_phones))
        .route("/api/brands", get(brands))
        .route("/api/bot", get(bot_info).post(bot_webhook))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("bot_updates_total", "Webhook updates accepted.");
        describe_counter!("bot_replies_total", "Replies rendered for chat messages.");
        describe_counter!(
            "bot_delivery_errors_total",
            "Outbound Telegram deliveries that failed."
        );
        describe_counter!(
            "bot_invalid_payload_total",
            "Webhook bodies rejected as malformed."
        );
    });
}

async fn market(State(state): State<AppState>) -> Json<MarketSnapshot> {
    Json(build_snapshot_with_limit(
        &state.catalog,
        state.options.brand_limit,
    ))
}

#[derive(serde::Deserialize)]
struct PhonesQuery {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    min: Option<u64>,
    #[serde(default)]
    max: Option<u64>,
    #[serde(default)]
    sort: Option<SortOption>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingMetrics {
    lowest_price: u64,
    lowest_store: String,
    highest_price: u64,
    spread: u64,
}

#[derive(serde::Serialize)]
struct PhoneView {
    #[serde(flatten)]
    phone: Phone,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<ListingMetrics>,
}

#[derive(serde::Serialize)]
struct PhonesResponse {
    count: usize,
    bounds: PriceBounds,
    phones: Vec<PhoneView>,
}

async fn list_phones(
    State(state): State<AppState>,
    Query(params): Query<PhonesQuery>,
) -> Json<PhonesResponse> {
    // Same pipeline as the storefront grid: range, then brand, then free
    // text, then sort. `brand=all` is the picker's "no filter" sentinel.
    let ranged = filter_by_price_range(state.catalog.iter(), params.min, params.max);
    let branded: Vec<&Phone> = match params.brand.as_deref().filter(|b| *b != "all") {
        Some(brand) => ranged.into_iter().filter(|p| p.brand == brand).collect(),
        None => ranged,
    };
    let searched = match params.search.as_deref() {
        Some(q) => search_phones(branded, q),
        None => branded,
    };
    let sorted = sort_phones(searched, params.sort.unwrap_or_default());

    // Bounds describe the whole catalog (they back the range inputs), not
    // the filtered page.
    let bounds = price_bounds(&state.catalog).unwrap_or(PriceBounds { min: 0, max: 0 });

    let phones = sorted
        .into_iter()
        .map(|p| PhoneView {
            metrics: price_metrics(p).ok().map(|m| ListingMetrics {
                lowest_price: m.lowest.price,
                lowest_store: m.lowest.store.clone(),
                highest_price: m.highest.price,
                spread: m.spread,
            }),
            phone: p.clone(),
        })
        .collect::<Vec<_>>();

    Json(PhonesResponse {
        count: phones.len(),
        bounds,
        phones,
    })
}

async fn brands(State(state): State<AppState>) -> Json<Vec<String>> {
    let out = distinct_brands(&state.catalog)
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    Json(out)
}

#[derive(serde::Serialize)]
struct BotInfo {
    ok: bool,
    message: &'static str,
}

async fn bot_info() -> Json<BotInfo> {
    Json(BotInfo {
        ok: true,
        message: "Telegram bot webhook ready. Send POST requests from Telegram.",
    })
}

#[derive(serde::Deserialize)]
struct WebhookUpdate {
    #[serde(default)]
    message: Option<WebhookMessage>,
}

#[derive(serde::Deserialize)]
struct WebhookMessage {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    chat: Option<WebhookChat>,
}

#[derive(serde::Deserialize)]
struct WebhookChat {
    #[serde(default)]
    id: Option<i64>,
}

#[derive(serde::Serialize)]
struct BotResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivered: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

impl BotResponse {
    fn ack() -> Self {
        Self {
            ok: true,
            delivered: None,
            reply: None,
            error: None,
        }
    }
}

async fn bot_webhook(
    State(state): State<AppState>,
    payload: Result<Json<WebhookUpdate>, JsonRejection>,
) -> (StatusCode, Json<BotResponse>) {
    ensure_metrics_described();

    let Ok(Json(update)) = payload else {
        counter!("bot_invalid_payload_total").increment(1);
        return (
            StatusCode::BAD_REQUEST,
            Json(BotResponse {
                ok: false,
                delivered: None,
                reply: None,
                error: Some("invalid payload"),
            }),
        );
    };

    counter!("bot_updates_total").increment(1);

    // Non-text updates (stickers, photos, joins) are acknowledged and dropped
    // so Telegram does not retry them.
    let Some(text) = update.message.as_ref().and_then(|m| m.text.clone()) else {
        return (StatusCode::OK, Json(BotResponse::ack()));
    };

    let reply = build_reply(&state.catalog, &text, &state.options);
    counter!("bot_replies_total").increment(1);

    let chat_id = update
        .message
        .as_ref()
        .and_then(|m| m.chat.as_ref())
        .and_then(|c| c.id);

    let delivered = match chat_id {
        Some(id) => {
            let status = state.notifier.deliver(id, &reply).await;
            if let DeliveryStatus::Error { detail } = &status {
                counter!("bot_delivery_errors_total").increment(1);
                tracing::warn!(chat_id = id, %detail, "telegram delivery failed");
            }
            status.tag().to_string()
        }
        // No chat id to answer; the reply still goes back in the response
        // body so local callers can read it.
        None => "local".to_string(),
    };

    (
        StatusCode::OK,
        Json(BotResponse {
            ok: true,
            delivered: Some(delivered),
            reply: Some(reply),
            error: None,
        }),
    )
}
