//! Runtime configuration types.
//!
//! These are the validated values the generator and the loop run with. Loading
//! them from the environment, CLI flags or a file is the producer binary's job.

mod generator;
mod profile;
mod routing;

pub use generator::{DEFAULT_CUSTOMERS, DEFAULT_TENANTS, GeneratorConfig, StreamKind};
pub use profile::{Profile, UnknownProfile};
pub use routing::TopicRouting;

use std::time::Duration;

/// Default pause between two published events.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Pacing and bounds of the publish loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    /// Pause after each publish.
    pub interval: Duration,
    /// Stop after this many generated events. `None` runs until cancelled.
    pub max_events: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_events: None,
        }
    }
}
