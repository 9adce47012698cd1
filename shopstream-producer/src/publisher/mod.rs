//! Broker publisher implementations.
//!
//! - `KafkaPublisher`: delivers to Kafka through `rdkafka` (feature `kafka`)
//! - `LogPublisher`: logs payloads instead of sending them (`--dry-run`)

pub mod dry_run;
#[cfg(feature = "kafka")]
pub mod kafka;

pub use dry_run::LogPublisher;
#[cfg(feature = "kafka")]
pub use kafka::KafkaPublisher;

use crate::config::BrokerConfig;
use shopstream_core::publisher::BrokerPublisher;

/// Build the publisher the loop will own.
pub fn build_publisher(
    broker: &BrokerConfig,
    dry_run: bool,
) -> anyhow::Result<Box<dyn BrokerPublisher>> {
    if dry_run {
        tracing::info!("Dry run: events are logged, nothing is sent to the broker");
        return Ok(Box::new(LogPublisher::new()));
    }
    connect(broker)
}

#[cfg(feature = "kafka")]
fn connect(broker: &BrokerConfig) -> anyhow::Result<Box<dyn BrokerPublisher>> {
    let publisher = KafkaPublisher::connect(broker).map_err(|e| {
        tracing::error!("Failed to create Kafka producer: {}", e);
        e
    })?;
    Ok(Box::new(publisher))
}

#[cfg(not(feature = "kafka"))]
fn connect(_broker: &BrokerConfig) -> anyhow::Result<Box<dyn BrokerPublisher>> {
    anyhow::bail!("built without the `kafka` feature; run with --dry-run")
}
