//! TOML file configuration structures.
//!
//! Every section and key is optional; anything left out falls back to the
//! defaults below, and environment variables or CLI flags override the file.

use serde::{Deserialize, Serialize};
use shopstream_core::config::{DEFAULT_CUSTOMERS, DEFAULT_TENANTS, Profile};

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub broker: BrokerSection,
    pub topics: TopicsSection,
    pub producer: ProducerSection,
}

/// Kafka connection section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerSection {
    /// Comma separated `host:port` list.
    pub bootstrap_servers: String,
    pub client_id: String,
    /// How long the client may spend delivering one message.
    pub message_timeout_ms: u64,
    /// How long shutdown may spend flushing buffered messages.
    pub flush_timeout_ms: u64,
}

impl Default for BrokerSection {
    fn default() -> Self {
        Self {
            bootstrap_servers: "localhost:9092".to_string(),
            client_id: "event-producer".to_string(),
            message_timeout_ms: 5_000,
            flush_timeout_ms: 10_000,
        }
    }
}

/// Topic names. `orders` and `customers` are used by the split profile,
/// `shared` by the shared and events profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicsSection {
    pub orders: String,
    pub customers: String,
    pub shared: String,
}

impl Default for TopicsSection {
    fn default() -> Self {
        Self {
            orders: "orders-topic".to_string(),
            customers: "customers-topic".to_string(),
            shared: "example-topic".to_string(),
        }
    }
}

/// Event generation and pacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProducerSection {
    pub profile: Profile,
    pub interval_ms: u64,
    pub seed: Option<u64>,
    pub max_events: Option<u64>,
    pub tenants: Vec<u32>,
    pub customers: Vec<u32>,
}

impl Default for ProducerSection {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            interval_ms: 1_000,
            seed: None,
            max_events: None,
            tenants: DEFAULT_TENANTS.to_vec(),
            customers: DEFAULT_CUSTOMERS.to_vec(),
        }
    }
}
