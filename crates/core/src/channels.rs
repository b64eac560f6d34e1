//! Well-known notification channel name constants.
//!
//! These must match the values accepted by the `notifications.channel`
//! check constraint.

/// In-app notification shown in the notification bell.
pub const CHANNEL_IN_APP: &str = "in_app";

/// Notification handed to the email transport.
pub const CHANNEL_EMAIL: &str = "email";

/// Notification shown in-app and sent by email.
pub const CHANNEL_BOTH: &str = "both";

/// Whether a notification on `channel` should be handed to the email transport.
pub fn includes_email(channel: &str) -> bool {
    channel == CHANNEL_EMAIL || channel == CHANNEL_BOTH
}
