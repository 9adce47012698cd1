use serde::{Deserialize, Serialize};

use super::{Event, EventCategory, SampleEvent};

/// Anything the producer publishes.
///
/// Serializes as the inner payload with no wrapper. A commerce event is tried
/// first when parsing; a sample has no `tenant_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Commerce(Event),
    Sample(SampleEvent),
}

impl Record {
    pub fn category(&self) -> EventCategory {
        match self {
            Record::Commerce(event) => event.category(),
            Record::Sample(_) => EventCategory::Sample,
        }
    }

    /// Message key: the customer id of a commerce event, the counter of a sample.
    pub fn key(&self) -> String {
        match self {
            Record::Commerce(event) => event.customer_id().to_string(),
            Record::Sample(sample) => sample.id.to_string(),
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Record::Commerce(event) => Some(event),
            Record::Sample(_) => None,
        }
    }

    pub fn as_sample(&self) -> Option<&SampleEvent> {
        match self {
            Record::Commerce(_) => None,
            Record::Sample(sample) => Some(sample),
        }
    }
}

impl From<Event> for Record {
    fn from(event: Event) -> Self {
        Record::Commerce(event)
    }
}

impl From<SampleEvent> for Record {
    fn from(sample: SampleEvent) -> Self {
        Record::Sample(sample)
    }
}
