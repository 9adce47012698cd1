//! Flat sample payload of the `events` stream.

use serde::{Deserialize, Serialize};

/// Smallest sample value.
pub const MIN_VALUE: u32 = 1;

/// Largest sample value.
pub const MAX_VALUE: u32 = 100;

/// One message of the `events` profile.
///
/// `id` is a per-run counter starting at 1 and `timestamp` is whole seconds
/// since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleEvent {
    pub id: u64,
    pub timestamp: i64,
    pub value: u32,
    pub message: String,
}

impl SampleEvent {
    pub fn new(id: u64, timestamp: i64, value: u32) -> Self {
        Self {
            id,
            timestamp,
            value,
            message: Self::message_for(id),
        }
    }

    pub fn message_for(id: u64) -> String {
        format!("Hello Kafka! Message #{id}")
    }
}
