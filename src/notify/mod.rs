// src/notify/mod.rs
//! Delivery seam for outbound replies: the router computes text, a
//! `Notifier` moves it. Implementations report problems through
//! `DeliveryStatus` and never fail the caller.

pub mod telegram;

use async_trait::async_trait;
use serde::Serialize;

pub use telegram::TelegramNotifier;

/// Outcome of a single delivery attempt. `Skipped` means no credential is
/// configured; it is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Error { detail: String },
    Skipped { reason: String },
}

impl DeliveryStatus {
    /// Short tag surfaced in webhook responses and logs.
    pub fn tag(&self) -> &'static str {
        match self {
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Error { .. } => "error",
            DeliveryStatus::Skipped { .. } => "skipped",
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to `chat_id`. One attempt, no retry, no timeout; a
    /// failed delivery comes back as `Error`, never as a panic or `Err`.
    async fn deliver(&self, chat_id: i64, text: &str) -> DeliveryStatus;
}
