//! PublisherLoop processor.
//!
//! The PublisherLoop is responsible for:
//! - Asking the `EventGenerator` for one event per tick
//! - Serializing the event to JSON
//! - Submitting it to the `BrokerPublisher` on the topic its category routes to
//! - Sleeping for the configured interval between ticks
//! - Flushing the publisher exactly once when it stops, on every exit path
//!
//! Cancellation is checked before each tick and after each publish. A
//! shutdown signal that arrives during the sleep wakes the loop immediately;
//! any other change on the shutdown channel leaves the sleep deadline as it
//! was. An event is never half-generated when the loop stops.

use super::ShutdownReceiver;
use crate::config::{LoopConfig, TopicRouting};
use crate::generator::{EventGenerator, GenerationError, Generated};
use crate::publisher::{BrokerPublisher, PublishError};
use crate::random::RandomSource;
use crate::registry::CustomerRegistry;
use shopstream_sdk::objects::Record;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, error, info, trace, warn};

/// Errors that stop the loop.
#[derive(Debug, Error)]
pub enum LoopError {
    /// The generator could not produce an event.
    #[error("event generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Buffered messages could not be delivered at shutdown.
    #[error("publisher shutdown failed: {0}")]
    Shutdown(#[source] PublishError),
}

/// Where the loop is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Generating,
    Serializing,
    Publishing,
    Sleeping,
    ShuttingDown,
    Stopped,
}

/// Counters for one run of the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopReport {
    /// Events produced by the generator.
    pub generated: u64,
    /// Events the publisher accepted.
    pub published: u64,
    /// Events that failed to serialize or publish.
    pub failed: u64,
    /// Customer events that changed an email.
    pub email_changes: u64,
}

/// PublisherLoop drives generation and delivery until cancelled.
pub struct PublisherLoop<R, P> {
    generator: EventGenerator,
    registry: CustomerRegistry,
    rng: R,
    publisher: P,
    routing: TopicRouting,
    config: LoopConfig,
    shutdown_rx: ShutdownReceiver,
    state: LoopState,
    report: LoopReport,
}

impl<R, P> PublisherLoop<R, P>
where
    R: RandomSource + Send,
    P: BrokerPublisher,
{
    /// Create a new PublisherLoop.
    ///
    /// # Arguments
    ///
    /// * `generator` - Event generator, owns the order counter
    /// * `registry` - Customer emails, seeded by the caller
    /// * `rng` - Random source for every draw
    /// * `publisher` - Broker publisher; shut down when the loop stops
    /// * `routing` - Topic per event category
    /// * `config` - Interval and optional event bound
    /// * `shutdown_rx` - Receiver for shutdown signal
    pub fn new(
        generator: EventGenerator,
        registry: CustomerRegistry,
        rng: R,
        publisher: P,
        routing: TopicRouting,
        config: LoopConfig,
        shutdown_rx: ShutdownReceiver,
    ) -> Self {
        Self {
            generator,
            registry,
            rng,
            publisher,
            routing,
            config,
            shutdown_rx,
            state: LoopState::Idle,
            report: LoopReport::default(),
        }
    }

    /// Run until cancelled, the event bound is reached, or generation fails.
    ///
    /// The publisher is shut down before this returns, whatever the outcome.
    /// A failed shutdown is the only publish error that is returned.
    pub async fn run(mut self) -> Result<LoopReport, LoopError> {
        info!(
            topics = ?self.routing.topics(),
            interval_ms = self.config.interval.as_millis() as u64,
            max_events = ?self.config.max_events,
            "PublisherLoop started"
        );

        let outcome = self.drive().await;

        self.transition(LoopState::ShuttingDown);
        info!("Shutting down producer, flushing buffered messages");
        let flushed = self.publisher.shutdown().await;
        self.transition(LoopState::Stopped);

        let report = self.report;
        if let Err(e) = outcome {
            if let Err(flush_error) = &flushed {
                error!(error = %flush_error, "Failed to flush publisher");
            }
            error!(error = %e, "PublisherLoop stopped on generation failure");
            return Err(e.into());
        }
        if let Err(e) = flushed {
            error!(error = %e, "Failed to flush publisher");
            return Err(LoopError::Shutdown(e));
        }

        info!(
            generated = report.generated,
            published = report.published,
            failed = report.failed,
            email_changes = report.email_changes,
            "PublisherLoop shutdown complete"
        );
        Ok(report)
    }

    async fn drive(&mut self) -> Result<(), GenerationError> {
        loop {
            if self.should_stop() {
                return Ok(());
            }

            self.tick().await?;

            if self.should_stop() {
                return Ok(());
            }

            self.transition(LoopState::Sleeping);
            let wake_at = Instant::now() + self.config.interval;
            if self.sleep_until(wake_at).await {
                return Ok(());
            }
        }
    }

    /// Sleep until `deadline`. Returns `true` when shutdown was requested first.
    async fn sleep_until(&mut self, deadline: Instant) -> bool {
        let sleep = tokio::time::sleep_until(deadline);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                biased;

                // Check for shutdown
                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() {
                        info!("Shutdown sender dropped, stopping");
                        return true;
                    }
                    if *self.shutdown_rx.borrow() {
                        info!("PublisherLoop received shutdown signal");
                        return true;
                    }
                }

                _ = &mut sleep => return false,
            }
        }
    }

    /// One cycle: generate, serialize, publish.
    async fn tick(&mut self) -> Result<(), GenerationError> {
        self.transition(LoopState::Generating);
        let Generated {
            record,
            email_change,
        } = self.generator.generate(&mut self.registry, &mut self.rng)?;
        self.report.generated += 1;
        if email_change.is_some() {
            self.report.email_changes += 1;
        }

        match self.publish(&record).await {
            Ok(()) => self.report.published += 1,
            Err(e) => {
                self.report.failed += 1;
                warn!(
                    category = %record.category(),
                    key = %record.key(),
                    error = %e,
                    "Failed to publish event"
                );
            }
        }
        Ok(())
    }

    async fn publish(&mut self, record: &Record) -> Result<(), PublishError> {
        self.transition(LoopState::Serializing);
        let payload = serde_json::to_vec(record)?;

        self.transition(LoopState::Publishing);
        let topic = self.routing.topic_for(record.category());
        let key = record.key();
        self.publisher.publish(topic, &key, &payload).await?;

        match record {
            Record::Commerce(event) => {
                debug!(
                    topic,
                    event_id = %event.id,
                    event_type = %event.event_type,
                    tenant_id = event.tenant_id,
                    "Sent event"
                );
            }
            Record::Sample(sample) => {
                debug!(topic, id = sample.id, value = sample.value, "Sent sample");
            }
        }
        Ok(())
    }

    fn should_stop(&self) -> bool {
        if *self.shutdown_rx.borrow() {
            info!("PublisherLoop received shutdown signal");
            return true;
        }
        let generated = self.report.generated;
        match self.config.max_events {
            Some(max) if generated >= max => {
                info!(max_events = max, generated, "Event limit reached");
                true
            }
            _ => false,
        }
    }

    fn transition(&mut self, next: LoopState) {
        trace!(from = ?self.state, to = ?next, "PublisherLoop state change");
        self.state = next;
    }
}
