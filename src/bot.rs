// src/bot.rs
//! Command routing for the chat bot: ordered prefix dispatch over the raw
//! message text, and the Persian reply builders behind each command.
//! Replies are plain multi-line strings; delivery happens elsewhere.

use crate::catalog::Phone;
use crate::format::format_currency;
use crate::pricing::price_metrics;
use crate::query::search_phones;
use crate::snapshot::{build_snapshot_with_limit, DEFAULT_BRAND_LIMIT};

/// How many search hits a single reply lists.
pub const DEFAULT_SEARCH_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Market,
    TopDeal,
    Search(String),
}

impl Command {
    /// Priority-ordered prefix dispatch on the lowercased input. Anything
    /// that is not a known command is a search query; the raw text is kept
    /// so Persian queries are matched as typed.
    pub fn parse(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.starts_with("/start") || lower.starts_with("/help") {
            Command::Help
        } else if lower.starts_with("/market") {
            Command::Market
        } else if lower.starts_with("/top") {
            Command::TopDeal
        } else {
            Command::Search(text.to_string())
        }
    }
}

/// Reply tuning injected from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotOptions {
    pub search_limit: usize,
    pub brand_limit: usize,
}

impl Default for BotOptions {
    fn default() -> Self {
        Self {
            search_limit: DEFAULT_SEARCH_LIMIT,
            brand_limit: DEFAULT_BRAND_LIMIT,
        }
    }
}

/// Map one inbound message to its reply text. Pure: same catalog and text,
/// same reply.
pub fn build_reply(catalog: &[Phone], text: &str, options: &BotOptions) -> String {
    match Command::parse(text) {
        Command::Help => help_message(),
        Command::Market => market_message(catalog, options.brand_limit),
        Command::TopDeal => top_deal_message(catalog),
        Command::Search(query) => search_message(catalog, &query, options.search_limit),
    }
}

pub fn help_message() -> String {
    [
        "👋 به ربات تحلیل‌گر قیمت موبایل خوش آمدید!",
        "",
        "دستورات پیشنهادی:",
        "• /top — نمایش بهترین پیشنهاد امروز",
        "• /market — وضعیت کلی بازار",
        "• نام دستگاه یا برند را بنویسید تا قیمت‌های لحظه‌ای را ببینید.",
    ]
    .join("\n")
}

fn market_message(catalog: &[Phone], brand_limit: usize) -> String {
    let snapshot = build_snapshot_with_limit(catalog, brand_limit);

    let mut lines = vec![
        "📊 وضعیت بازار موبایل امروز".to_string(),
        format!("• میانگین قیمت: {}", format_currency(snapshot.average_price)),
        format!(
            "• اختلاف میانه بازار: {}",
            format_currency(snapshot.median_spread)
        ),
    ];
    if let Some(best) = &snapshot.best_value {
        lines.push(format!(
            "• بهترین ارزش خرید: {} از برند {} با قیمت {} در فروشگاه {}",
            best.name,
            best.brand,
            format_currency(best.price as f64),
            best.store
        ));
    }

    if !snapshot.rising_brands.is_empty() {
        lines.push(String::new());
        lines.push("برندهای با ثبات قیمت:".to_string());
        for (index, brand) in snapshot.rising_brands.iter().enumerate() {
            lines.push(format!(
                "{}. {} — میانگین اختلاف {}",
                index + 1,
                brand.brand,
                format_currency(brand.avg_spread)
            ));
        }
    }

    lines.join("\n")
}

fn top_deal_message(catalog: &[Phone]) -> String {
    // The snapshot is cheap at this catalog size; no reason for a
    // special-cased minimum search here.
    let snapshot = build_snapshot_with_limit(catalog, DEFAULT_BRAND_LIMIT);
    let Some(best) = snapshot.best_value else {
        return "فعلاً پیشنهادی برای نمایش ثبت نشده است.".to_string();
    };
    [
        "🏆 بهترین پیشنهاد امروز".to_string(),
        format!("{} ({})", best.name, best.brand),
        format!(
            "قیمت: {} در فروشگاه {}",
            format_currency(best.price as f64),
            best.store
        ),
    ]
    .join("\n")
}

fn search_message(catalog: &[Phone], query: &str, search_limit: usize) -> String {
    if query.trim().is_empty() {
        return help_message();
    }

    let matches = search_phones(catalog, query);
    if matches.is_empty() {
        return [
            "نتیجه‌ای یافت نشد ❌",
            "نام دستگاه یا برند را دقیق‌تر وارد کنید. مثال:",
            "• iPhone 15 Pro",
            "• سامسونگ",
            "• شارژ 120 وات",
        ]
        .join("\n");
    }

    matches
        .into_iter()
        .take(search_limit)
        .map(phone_summary)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One search hit: metrics header plus the per-store offer table
/// (store, price, shipping label, stock label).
fn phone_summary(phone: &Phone) -> String {
    let mut lines = vec![format!("📱 {} — {}", phone.name, phone.brand)];

    let Ok(metrics) = price_metrics(phone) else {
        lines.push("فعلاً قیمتی برای این مدل ثبت نشده است.".to_string());
        return lines.join("\n");
    };
    lines.push(format!(
        "کمترین قیمت: {} در {}",
        format_currency(metrics.lowest.price as f64),
        metrics.lowest.store
    ));
    lines.push(format!(
        "اختلاف بازار: {}",
        format_currency(metrics.spread as f64)
    ));
    lines.push("فروشندگان:".to_string());
    for listing in &phone.prices {
        lines.push(format!(
            "  • {}: {} ({}، {})",
            listing.store,
            format_currency(listing.price as f64),
            listing.shipping.label(),
            listing.stock.label()
        ));
    }

    lines.join("\n")
}
