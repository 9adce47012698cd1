#![allow(dead_code)]

use async_trait::async_trait;
use shopstream_core::config::{DEFAULT_CUSTOMERS, GeneratorConfig, LoopConfig, TopicRouting};
use shopstream_core::generator::EventGenerator;
use shopstream_core::processors::{PublisherLoop, ShutdownReceiver, ShutdownSender};
use shopstream_core::publisher::{BrokerPublisher, PublishError};
use shopstream_core::random::RandomSource;
use shopstream_core::registry::CustomerRegistry;
use shopstream_sdk::objects::{Event, Record};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub topic: String,
    pub key: String,
    pub payload: Vec<u8>,
}

impl SentMessage {
    pub fn event(&self) -> Event {
        serde_json::from_slice(&self.payload).expect("payload is a valid event")
    }

    pub fn record(&self) -> Record {
        serde_json::from_slice(&self.payload).expect("payload is a valid record")
    }
}

#[derive(Debug, Default)]
struct LogInner {
    sent: Vec<SentMessage>,
    attempts: usize,
    flushes: usize,
}

/// Shared view of everything a [`RecordingPublisher`] saw.
#[derive(Debug, Clone, Default)]
pub struct PublisherLog {
    inner: Arc<Mutex<LogInner>>,
}

impl PublisherLog {
    pub fn sent(&self) -> Vec<SentMessage> {
        self.inner.lock().unwrap().sent.clone()
    }

    pub fn attempts(&self) -> usize {
        self.inner.lock().unwrap().attempts
    }

    pub fn flushes(&self) -> usize {
        self.inner.lock().unwrap().flushes
    }
}

/// In-memory publisher that records messages and flush calls.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    log: PublisherLog,
    reject_messages: bool,
    reject_flush: bool,
    shutdown_on_publish: Option<ShutdownSender>,
}

impl RecordingPublisher {
    pub fn new() -> (Self, PublisherLog) {
        let publisher = Self::default();
        let log = publisher.log.clone();
        (publisher, log)
    }

    pub fn rejecting_messages(mut self) -> Self {
        self.reject_messages = true;
        self
    }

    pub fn rejecting_flush(mut self) -> Self {
        self.reject_flush = true;
        self
    }

    /// Request shutdown from inside the first `publish` call, before it returns.
    pub fn signalling_shutdown(mut self, shutdown_tx: ShutdownSender) -> Self {
        self.shutdown_on_publish = Some(shutdown_tx);
        self
    }
}

#[async_trait]
impl BrokerPublisher for RecordingPublisher {
    async fn publish(
        &mut self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<(), PublishError> {
        if let Some(shutdown_tx) = self.shutdown_on_publish.take() {
            shutdown_tx.send(true).unwrap();
        }
        let mut inner = self.log.inner.lock().unwrap();
        inner.attempts += 1;
        if self.reject_messages {
            return Err(PublishError::Delivery {
                topic: topic.to_string(),
                reason: "broker unreachable".to_string(),
            });
        }
        inner.sent.push(SentMessage {
            topic: topic.to_string(),
            key: key.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }

    async fn shutdown(&mut self) -> Result<(), PublishError> {
        self.log.inner.lock().unwrap().flushes += 1;
        if self.reject_flush {
            return Err(PublishError::Flush("broker unreachable".to_string()));
        }
        Ok(())
    }
}

pub fn split_routing() -> TopicRouting {
    TopicRouting::Split {
        orders: "orders-topic".to_string(),
        customers: "customers-topic".to_string(),
    }
}

pub fn default_registry() -> CustomerRegistry {
    CustomerRegistry::with_defaults(DEFAULT_CUSTOMERS)
}

pub fn loop_config(interval_ms: u64, max_events: Option<u64>) -> LoopConfig {
    LoopConfig {
        interval: Duration::from_millis(interval_ms),
        max_events,
    }
}

/// Loop over the default population and tenants.
pub fn build_loop<R: RandomSource + Send>(
    rng: R,
    publisher: RecordingPublisher,
    routing: TopicRouting,
    config: LoopConfig,
    shutdown_rx: ShutdownReceiver,
) -> PublisherLoop<R, RecordingPublisher> {
    PublisherLoop::new(
        EventGenerator::new(GeneratorConfig::default()),
        default_registry(),
        rng,
        publisher,
        routing,
        config,
        shutdown_rx,
    )
}
