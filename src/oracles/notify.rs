//! Notification delivery

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::config::NotificationSettings;

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub kind: String,
    pub message: String,
    pub details: serde_json::Value,
}

/// Fire-and-forget delivery. Implementations must swallow their own failures;
/// a dead webhook never stalls the scheduler.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: Notification);
}

/// Default sink: structured log lines, honoring the configured channels only
/// as log fields until real email/webhook transports are wired up.
pub struct LogNotifier {
    settings: NotificationSettings,
}

impl LogNotifier {
    pub fn new(settings: NotificationSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl NotificationSink for LogNotifier {
    async fn notify(&self, notification: Notification) {
        info!(
            kind = %notification.kind,
            email = self.settings.email_enabled,
            webhook = self.settings.webhook_enabled,
            browser = self.settings.browser_notifications,
            "{}",
            notification.message
        );
    }
}
