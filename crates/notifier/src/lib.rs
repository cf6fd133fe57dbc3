//! Notification delivery.
//!
//! The poll loop only sees the [`Notifier`] trait. Delivery is fire-and-forget:
//! [`notify`] logs a failed send and returns, it never hands the error back to
//! the caller and never retries.

use std::future::Future;

use thiserror::Error;

pub mod telegram;

pub use telegram::TelegramNotifier;

/// Delivery failures reported by a [`Notifier`].
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Delivery rejected with HTTP status {0}")]
    Rejected(u16),

    #[error("Chat API error: {0}")]
    Api(String),
}

/// Outbound channel that delivers a text message to one fixed destination.
pub trait Notifier {
    fn send(&self, text: &str) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Deliver `message`, swallowing any failure into a log event.
pub async fn notify<N: Notifier>(notifier: &N, message: &str) {
    match notifier.send(message).await {
        Ok(()) => tracing::debug!(message, "Notification sent"),
        Err(e) => tracing::error!(error = %e, message, "Failed to send notification"),
    }
}
