use async_trait::async_trait;
use shopstream_core::publisher::{BrokerPublisher, PublishError};
use tracing::info;

/// Publisher that only logs what it would have sent.
#[derive(Debug, Default)]
pub struct LogPublisher {
    logged: u64,
}

impl LogPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logged(&self) -> u64 {
        self.logged
    }
}

#[async_trait]
impl BrokerPublisher for LogPublisher {
    async fn publish(
        &mut self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<(), PublishError> {
        self.logged += 1;
        info!(
            topic,
            key,
            payload = %String::from_utf8_lossy(payload),
            "Dry run event"
        );
        Ok(())
    }

    async fn shutdown(&mut self) -> Result<(), PublishError> {
        info!(logged = self.logged(), "Dry run finished, nothing to flush");
        Ok(())
    }
}
