use super::StreamKind;
use serde::{Deserialize, Serialize};
use shopstream_sdk::objects::EventType;
use std::str::FromStr;
use thiserror::Error;

/// Shape of the stream.
///
/// `Split` publishes `order.created` to an orders topic and customer updates to
/// a customers topic. `Shared` publishes everything to one topic and mixes the
/// four order lifecycle kinds. `Events` publishes flat counter/value samples to
/// the shared topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Split,
    Shared,
    Events,
}

impl Profile {
    /// Event types order-class events are drawn from. Empty for `Events`.
    pub fn order_kinds(self) -> Vec<EventType> {
        match self {
            Profile::Split => vec![EventType::OrderCreated],
            Profile::Shared => EventType::ORDER_LIFECYCLE.to_vec(),
            Profile::Events => Vec::new(),
        }
    }

    pub fn stream_kind(self) -> StreamKind {
        match self {
            Profile::Split | Profile::Shared => StreamKind::Commerce,
            Profile::Events => StreamKind::Samples,
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Profile::Split => write!(f, "split"),
            Profile::Shared => write!(f, "shared"),
            Profile::Events => write!(f, "events"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown profile {0:?}, expected \"split\", \"shared\" or \"events\"")]
pub struct UnknownProfile(pub String);

impl FromStr for Profile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "split" => Ok(Profile::Split),
            "shared" => Ok(Profile::Shared),
            "events" => Ok(Profile::Events),
            _ => Err(UnknownProfile(s.to_string())),
        }
    }
}
