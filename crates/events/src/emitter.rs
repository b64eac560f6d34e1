//! Best-effort notification emission.
//!
//! The settlement engine hands every [`NotificationMessage`] to the
//! [`NotificationEmitter`] after its own transaction has committed. A failed
//! write is logged and swallowed, so it can never undo points, completions
//! or draws.

use std::sync::Arc;

use loyalty_core::notification::NotificationMessage;
use loyalty_db::models::notification::{CreateNotification, Notification};
use loyalty_db::repositories::NotificationRepo;
use loyalty_db::DbPool;

use crate::bus::{EventBus, PlatformEvent, EVENT_NOTIFICATION_CREATED};

/// Writes notification rows and announces them on the [`EventBus`].
#[derive(Clone)]
pub struct NotificationEmitter {
    pool: DbPool,
    bus: Arc<EventBus>,
}

impl NotificationEmitter {
    pub fn new(pool: DbPool, bus: Arc<EventBus>) -> Self {
        Self { pool, bus }
    }

    /// Write one notification.
    ///
    /// Returns the stored row, or `None` when the write failed. Failures are
    /// logged at `error` level and never returned.
    pub async fn emit(&self, message: &NotificationMessage) -> Option<Notification> {
        let input = CreateNotification::from(message);
        match NotificationRepo::create(&self.pool, &input).await {
            Ok(notification) => {
                tracing::debug!(
                    notification_id = notification.id,
                    user_id = notification.user_id,
                    notification_type = %notification.notification_type,
                    "Notification emitted"
                );
                self.publish(&notification);
                Some(notification)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    user_id = message.user_id,
                    notification_type = message.notification_type.as_str(),
                    "Failed to emit notification"
                );
                None
            }
        }
    }

    /// Emit messages in order, returning how many were written.
    pub async fn emit_all(&self, messages: &[NotificationMessage]) -> usize {
        let mut written = 0;
        for message in messages {
            if self.emit(message).await.is_some() {
                written += 1;
            }
        }
        written
    }

    fn publish(&self, notification: &Notification) {
        let payload = match serde_json::to_value(notification) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, notification_id = notification.id, "Could not serialize notification event");
                return;
            }
        };
        self.bus.publish(
            PlatformEvent::new(EVENT_NOTIFICATION_CREATED)
                .with_source("notification", notification.id)
                .with_user(notification.user_id)
                .with_payload(payload),
        );
    }
}
