//! Event bus and notification plumbing for the rewards platform.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the domain event envelope carried on the bus.
//! - [`NotificationEmitter`]: best-effort writer of notification rows. A
//!   failed write is logged and never propagated to the caller.
//! - [`delivery`]: the transport boundary and the background worker that
//!   hands emitted notifications to it.

pub mod bus;
pub mod delivery;
pub mod emitter;

pub use bus::{EventBus, PlatformEvent};
pub use delivery::{DeliveryError, DeliveryTransport, DeliveryWorker, LogTransport};
pub use emitter::NotificationEmitter;
