//! The published event envelope.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{CustomerId, CustomerObject, OrderObject, TenantId};

/// One message on the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub event_type: EventType,
    #[serde(with = "crate::timestamp")]
    pub created_at: OffsetDateTime,
    pub object: EventObject,
}

impl Event {
    pub fn category(&self) -> EventCategory {
        self.event_type.category()
    }

    /// The customer this event concerns, used as the message key.
    pub fn customer_id(&self) -> CustomerId {
        match &self.object {
            EventObject::Order(order) => order.customer.id,
            EventObject::Customer(customer) => customer.id,
        }
    }
}

/// Variant payload. Orders are tried first; a customer payload has no `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventObject {
    Order(OrderObject),
    Customer(CustomerObject),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "order.created")]
    OrderCreated,
    #[serde(rename = "order.updated")]
    OrderUpdated,
    #[serde(rename = "order.shipped")]
    OrderShipped,
    #[serde(rename = "order.canceled")]
    OrderCanceled,
    #[serde(rename = "customer.updated")]
    CustomerUpdated,
}

impl EventType {
    /// Every order lifecycle kind, in wire order.
    pub const ORDER_LIFECYCLE: [EventType; 4] = [
        EventType::OrderCreated,
        EventType::OrderUpdated,
        EventType::OrderShipped,
        EventType::OrderCanceled,
    ];

    pub fn category(self) -> EventCategory {
        match self {
            EventType::OrderCreated
            | EventType::OrderUpdated
            | EventType::OrderShipped
            | EventType::OrderCanceled => EventCategory::Order,
            EventType::CustomerUpdated => EventCategory::Customer,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::OrderCreated => write!(f, "order.created"),
            EventType::OrderUpdated => write!(f, "order.updated"),
            EventType::OrderShipped => write!(f, "order.shipped"),
            EventType::OrderCanceled => write!(f, "order.canceled"),
            EventType::CustomerUpdated => write!(f, "customer.updated"),
        }
    }
}

/// Coarse classification that decides payload shape and topic routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Order,
    Customer,
    /// Flat counter/value messages of the `events` stream.
    Sample,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Order => write!(f, "order"),
            EventCategory::Customer => write!(f, "customer"),
            EventCategory::Sample => write!(f, "sample"),
        }
    }
}
