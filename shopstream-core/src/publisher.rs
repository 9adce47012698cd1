//! Broker publisher seam.
//!
//! The loop only needs to hand a payload to a topic and, once, ask for
//! everything buffered to be delivered. Connection handling, batching and
//! retries belong to the implementation.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a broker publisher.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The event could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The broker did not accept the message.
    #[error("delivery to {topic} failed: {reason}")]
    Delivery { topic: String, reason: String },

    /// Buffered messages could not be flushed.
    #[error("flush failed: {0}")]
    Flush(String),
}

#[async_trait]
pub trait BrokerPublisher: Send {
    /// Submit one message. May return before the broker acknowledges it.
    async fn publish(
        &mut self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<(), PublishError>;

    /// Deliver everything still buffered. Called exactly once, when the loop stops.
    async fn shutdown(&mut self) -> Result<(), PublishError>;
}

#[async_trait]
impl<P: BrokerPublisher + ?Sized> BrokerPublisher for Box<P> {
    async fn publish(
        &mut self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<(), PublishError> {
        (**self).publish(topic, key, payload).await
    }

    async fn shutdown(&mut self) -> Result<(), PublishError> {
        (**self).shutdown().await
    }
}
