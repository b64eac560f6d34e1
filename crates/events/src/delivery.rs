//! Notification delivery boundary.
//!
//! Delivery is a collaborator: the platform only decides that a
//! notification exists. [`DeliveryWorker`] listens for
//! `notification.created` events and hands rows whose channel includes
//! email to a [`DeliveryTransport`]. Transport failures are logged and
//! never reach the settlement engine.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use loyalty_core::channels::includes_email;
use loyalty_db::models::notification::Notification;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::bus::{PlatformEvent, EVENT_NOTIFICATION_CREATED};

/// Error type for transport failures.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Transport unavailable: {0}")]
    Unavailable(String),

    #[error("Delivery rejected: {0}")]
    Rejected(String),
}

/// Outbound transport for notifications (email, push, ...).
#[async_trait]
pub trait DeliveryTransport: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

/// Transport that only records deliveries in the log.
pub struct LogTransport;

#[async_trait]
impl DeliveryTransport for LogTransport {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        tracing::info!(
            notification_id = notification.id,
            user_id = notification.user_id,
            channel = %notification.channel,
            title = %notification.title,
            "Notification delivered"
        );
        Ok(())
    }
}

/// Background service that forwards emitted notifications to a transport.
pub struct DeliveryWorker;

impl DeliveryWorker {
    /// Run the delivery loop until the bus is dropped.
    pub async fn run(
        mut receiver: broadcast::Receiver<PlatformEvent>,
        transport: Arc<dyn DeliveryTransport>,
    ) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    Self::handle(&event, transport.as_ref()).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Delivery worker lagged, some notifications were not delivered"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, delivery worker shutting down");
                    break;
                }
            }
        }
    }

    /// Wait up to `grace` for a worker whose bus has been dropped to finish.
    ///
    /// Returns `false` and logs a warning when the worker is still running
    /// at the deadline, or when it panicked.
    pub async fn drain(handle: JoinHandle<()>, grace: Duration) -> bool {
        match tokio::time::timeout(grace, handle).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Delivery worker ended abnormally");
                false
            }
            Err(_) => {
                tracing::warn!(
                    grace_secs = grace.as_secs_f64(),
                    "Delivery worker did not drain in time, pending deliveries dropped"
                );
                false
            }
        }
    }

    /// Deliver the notification carried by `event`, if it needs delivery.
    ///
    /// Returns `true` when the transport accepted it.
    pub async fn handle(event: &PlatformEvent, transport: &dyn DeliveryTransport) -> bool {
        if event.event_type != EVENT_NOTIFICATION_CREATED {
            return false;
        }
        let notification: Notification = match serde_json::from_value(event.payload.clone()) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed notification event payload");
                return false;
            }
        };
        if !includes_email(&notification.channel) {
            return false;
        }
        match transport.deliver(&notification).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    notification_id = notification.id,
                    "Notification delivery failed"
                );
                false
            }
        }
    }
}
