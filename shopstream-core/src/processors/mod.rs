//! Long-running processors.
//!
//! - `PublisherLoop`: generates an event per tick and hands it to the broker

pub mod publisher_loop;

pub use publisher_loop::{LoopError, LoopReport, LoopState, PublisherLoop};

use tokio::sync::watch;

/// Sender half of the shutdown signal. Sending `true` requests shutdown.
pub type ShutdownSender = watch::Sender<bool>;
/// Receiver half of the shutdown signal.
pub type ShutdownReceiver = watch::Receiver<bool>;

/// Create a new shutdown channel, initially not cancelled.
pub fn shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    watch::channel(false)
}
