use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// How long the "saved" notification stays visible.
pub const SAVED_TIMEOUT: Duration = Duration::from_millis(3000);

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub icon: &'static str,
    pub text: String,
    pub timeout: Duration,
    pub at: DateTime<Utc>,
}

impl Notification {
    /// Confirmation shown after a successful write.
    pub fn saved() -> Self {
        Self {
            icon: "ok",
            text: "Settings saved.".to_string(),
            timeout: SAVED_TIMEOUT,
            at: Utc::now(),
        }
    }
}

/// Port the editor pushes notifications through.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification);
}

/// Forwards notifications to a receiver, e.g. the TUI toast.
pub struct ChannelNotifier {
    tx: tokio::sync::mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, tokio::sync::mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }
}

/// Logs notifications.
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notification: Notification) {
        tracing::info!(
            at = %notification.at.to_rfc3339(),
            text = %notification.text,
            "notification"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_notifier_forwards() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.notify(Notification::saved()).await;

        let got = rx.recv().await.unwrap();
        assert_eq!(got.text, "Settings saved.");
        assert_eq!(got.icon, "ok");
        assert_eq!(got.timeout, Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn channel_notifier_survives_dropped_receiver() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        notifier.notify(Notification::saved()).await;
    }
}
