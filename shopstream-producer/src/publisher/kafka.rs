//! Kafka publisher backed by `rdkafka`.
//!
//! Each publish waits for the broker's delivery report, bounded by the
//! configured message timeout. Shutdown flushes whatever librdkafka still has
//! queued, bounded by the flush timeout.

use crate::config::BrokerConfig;
use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::error::KafkaError;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use shopstream_core::publisher::{BrokerPublisher, PublishError};
use std::time::Duration;
use tracing::{debug, info};

pub struct KafkaPublisher {
    producer: FutureProducer,
    message_timeout: Duration,
    flush_timeout: Duration,
}

impl KafkaPublisher {
    /// Create the underlying producer. Connections are opened lazily by librdkafka.
    pub fn connect(config: &BrokerConfig) -> Result<Self, KafkaError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.bootstrap_servers)
            .set("client.id", &config.client_id)
            .set(
                "message.timeout.ms",
                config.message_timeout.as_millis().to_string(),
            )
            .create()?;

        info!(
            brokers = %config.bootstrap_servers,
            client_id = %config.client_id,
            "Kafka producer created"
        );

        Ok(Self {
            producer,
            message_timeout: config.message_timeout,
            flush_timeout: config.flush_timeout,
        })
    }
}

#[async_trait]
impl BrokerPublisher for KafkaPublisher {
    async fn publish(
        &mut self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<(), PublishError> {
        let record = FutureRecord::to(topic).key(key).payload(payload);
        self.producer
            .send(record, Timeout::After(self.message_timeout))
            .await
            .map(|_| ())
            .map_err(|(e, _)| PublishError::Delivery {
                topic: topic.to_string(),
                reason: e.to_string(),
            })
    }

    async fn shutdown(&mut self) -> Result<(), PublishError> {
        let producer = self.producer.clone();
        let timeout = self.flush_timeout;
        debug!(timeout_ms = timeout.as_millis() as u64, "Flushing Kafka producer");

        // librdkafka's flush blocks the calling thread.
        tokio::task::spawn_blocking(move || producer.flush(Timeout::After(timeout)))
            .await
            .map_err(|e| PublishError::Flush(e.to_string()))?
            .map_err(|e| PublishError::Flush(e.to_string()))?;

        info!("Kafka producer flushed");
        Ok(())
    }
}
