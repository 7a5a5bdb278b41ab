//! Demo that renders bot replies for a few sample messages (and delivers one
//! over Telegram when TELEGRAM_BOT_TOKEN + WATCHER_DEMO_CHAT_ID are set).

use mobile_price_watcher::bot::{build_reply, BotOptions};
use mobile_price_watcher::data;
use mobile_price_watcher::notify::{Notifier, TelegramNotifier};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let catalog = data::phones();
    let options = BotOptions::default();

    let seq = ["/start", "/market", "/top", "سامسونگ"];

    for text in seq {
        let reply = build_reply(catalog, text, &options);
        println!("### {text}\n{reply}\n");
    }

    let chat_id = std::env::var("WATCHER_DEMO_CHAT_ID")
        .ok()
        .and_then(|v| v.parse::<i64>().ok());

    if let Some(chat_id) = chat_id {
        let notifier = TelegramNotifier::new(std::env::var("TELEGRAM_BOT_TOKEN").ok());
        let status = notifier
            .deliver(chat_id, &build_reply(catalog, "/top", &options))
            .await;
        println!(
            "delivery: {}",
            serde_json::to_string(&status).unwrap_or_default()
        );
    }

    println!("reply-demo done");
}
