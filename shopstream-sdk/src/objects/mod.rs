pub mod customer;
pub mod event;
pub mod order;
pub mod record;
pub mod sample;

pub use customer::CustomerObject;
pub use event::{Event, EventCategory, EventObject, EventType};
pub use order::{CustomerRef, OrderObject, PaymentMethod};
pub use record::Record;
pub use sample::SampleEvent;

/// Identifier of the organization that owns an event.
pub type TenantId = u32;

/// Identifier of a customer within the seeded population.
pub type CustomerId = u32;
