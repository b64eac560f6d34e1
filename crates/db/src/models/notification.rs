//! Notification entity model and DTOs.

use loyalty_core::notification::NotificationMessage;
use loyalty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: String,
    pub title: String,
    pub body: Option<String>,
    pub data: serde_json::Value,
    pub is_read: bool,
    pub channel: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub notification_type: String,
    pub title: String,
    pub body: Option<String>,
    pub data: serde_json::Value,
    pub channel: String,
}

impl From<&NotificationMessage> for CreateNotification {
    fn from(msg: &NotificationMessage) -> Self {
        Self {
            user_id: msg.user_id,
            notification_type: msg.notification_type.as_str().to_string(),
            title: msg.title.clone(),
            body: msg.body.clone(),
            data: msg.data.clone(),
            channel: msg.channel.clone(),
        }
    }
}
