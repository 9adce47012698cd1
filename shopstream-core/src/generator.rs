//! EventGenerator.
//!
//! Shapes one event per call from the customer registry and a random source.
//! Commerce streams:
//! - pick a tenant uniformly
//! - flip a weighted coin between an order event (70%) and a customer event
//! - for customer events, change the customer's email 30% of the time and
//!   write the change to the registry before the event is built
//!
//! Sample streams number each message from 1 and draw a value in 1..=100.
//!
//! Draw order is fixed so scripted sources can force any branch:
//! order events take `pick` tenant, customer, total, payment method, kind and
//! one `uniform` (category); customer events take `pick` tenant, customer and
//! two `uniform` (category, email change); samples take one `pick` (value).

use crate::config::{GeneratorConfig, StreamKind};
use crate::random::{RandomSource, pick};
use crate::registry::{CustomerRegistry, RegistryError, updated_email};
use rust_decimal::Decimal;
use shopstream_sdk::objects::sample::{MAX_VALUE, MIN_VALUE};
use shopstream_sdk::objects::{
    CustomerId, CustomerObject, CustomerRef, Event, EventObject, EventType, OrderObject,
    PaymentMethod, Record, SampleEvent, TenantId,
};
use shopstream_sdk::timestamp::{now_unix_seconds, now_utc_micros};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Probability that a tick produces an order-class event.
pub const ORDER_PROBABILITY: f64 = 0.7;

/// Probability that a customer-class event changes the customer's email.
pub const EMAIL_CHANGE_PROBABILITY: f64 = 0.3;

/// Smallest order total, in cents.
pub const MIN_TOTAL_CENTS: i64 = 1_000;

/// Largest order total, in cents.
pub const MAX_TOTAL_CENTS: i64 = 20_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("customer population is empty")]
    EmptyPopulation,

    #[error("no tenants configured")]
    NoTenants,

    #[error("no order event kinds configured")]
    NoOrderKinds,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// An email change applied to the registry while generating an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailChange {
    pub customer_id: CustomerId,
    pub previous: String,
    pub current: String,
}

/// Result of one generation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub record: Record,
    pub email_change: Option<EmailChange>,
}

impl Generated {
    /// The commerce event, if this step produced one.
    pub fn event(&self) -> Option<&Event> {
        self.record.as_event()
    }
}

pub struct EventGenerator {
    config: GeneratorConfig,
    order_counter: u64,
    sample_counter: u64,
}

impl EventGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            order_counter: 0,
            sample_counter: 0,
        }
    }

    /// Number of order-class events produced so far. Also the `n` of the
    /// latest `ORD-<n>`.
    pub fn orders_generated(&self) -> u64 {
        self.order_counter
    }

    /// Number of samples produced so far, the `id` of the latest one.
    pub fn samples_generated(&self) -> u64 {
        self.sample_counter
    }

    /// Produce the next event.
    ///
    /// The only side effects are the counters and, for customer events, at
    /// most one registry write.
    pub fn generate<R>(
        &mut self,
        registry: &mut CustomerRegistry,
        rng: &mut R,
    ) -> Result<Generated, GenerationError>
    where
        R: RandomSource + ?Sized,
    {
        if self.config.kind == StreamKind::Samples {
            return Ok(Generated {
                record: self.sample_event(rng).into(),
                email_change: None,
            });
        }

        let tenant_id = *pick(rng, &self.config.tenants).ok_or(GenerationError::NoTenants)?;

        if rng.uniform() < ORDER_PROBABILITY {
            let event = self.order_event(tenant_id, registry, rng)?;
            Ok(Generated {
                record: event.into(),
                email_change: None,
            })
        } else {
            customer_event(tenant_id, registry, rng)
        }
    }

    fn sample_event<R>(&mut self, rng: &mut R) -> SampleEvent
    where
        R: RandomSource + ?Sized,
    {
        let span = (MAX_VALUE - MIN_VALUE + 1) as usize;
        let value = MIN_VALUE + rng.pick_index(span) as u32;
        self.sample_counter += 1;
        SampleEvent::new(self.sample_counter, now_unix_seconds(), value)
    }

    fn order_event<R>(
        &mut self,
        tenant_id: TenantId,
        registry: &CustomerRegistry,
        rng: &mut R,
    ) -> Result<Event, GenerationError>
    where
        R: RandomSource + ?Sized,
    {
        let customer_id = pick_customer(registry, rng)?;
        let email = registry.get(customer_id)?.to_owned();

        let span = (MAX_TOTAL_CENTS - MIN_TOTAL_CENTS + 1) as usize;
        let cents = MIN_TOTAL_CENTS + rng.pick_index(span) as i64;
        let payment_method = pick(rng, &PaymentMethod::ALL)
            .copied()
            .unwrap_or(PaymentMethod::CreditCard);
        let event_type = *pick(rng, &self.config.order_kinds).ok_or(GenerationError::NoOrderKinds)?;

        // Nothing below can fail, so the sequence stays gap-free.
        self.order_counter += 1;

        Ok(Event {
            id: Uuid::new_v4(),
            tenant_id,
            event_type,
            created_at: now_utc_micros(),
            object: EventObject::Order(OrderObject {
                id: OrderObject::order_id(self.order_counter),
                total: Decimal::new(cents, 2),
                payment_method,
                customer: CustomerRef {
                    id: customer_id,
                    email,
                },
            }),
        })
    }
}

fn customer_event<R>(
    tenant_id: TenantId,
    registry: &mut CustomerRegistry,
    rng: &mut R,
) -> Result<Generated, GenerationError>
where
    R: RandomSource + ?Sized,
{
    let customer_id = pick_customer(registry, rng)?;

    let email_change = if rng.uniform() < EMAIL_CHANGE_PROBABILITY {
        let previous = registry.get(customer_id)?.to_owned();
        let current = updated_email(customer_id);
        registry.set(customer_id, current.clone())?;
        info!(customer_id, email = %current, "Updating customer email");
        Some(EmailChange {
            customer_id,
            previous,
            current,
        })
    } else {
        None
    };

    let email = registry.get(customer_id)?.to_owned();
    let event = Event {
        id: Uuid::new_v4(),
        tenant_id,
        event_type: EventType::CustomerUpdated,
        created_at: now_utc_micros(),
        object: EventObject::Customer(CustomerObject {
            id: customer_id,
            email,
        }),
    };

    Ok(Generated {
        record: event.into(),
        email_change,
    })
}

fn pick_customer<R>(registry: &CustomerRegistry, rng: &mut R) -> Result<CustomerId, GenerationError>
where
    R: RandomSource + ?Sized,
{
    if registry.is_empty() {
        return Err(GenerationError::EmptyPopulation);
    }
    let index = rng.pick_index(registry.len());
    registry
        .customer_ids()
        .nth(index)
        .ok_or(GenerationError::EmptyPopulation)
}
