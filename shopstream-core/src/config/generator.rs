use super::Profile;
use shopstream_sdk::objects::{CustomerId, EventType, TenantId};

pub const DEFAULT_TENANTS: [TenantId; 3] = [100, 200, 300];
pub const DEFAULT_CUSTOMERS: [CustomerId; 5] = [1001, 1002, 1003, 1004, 1005];

/// Which payloads the generator produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StreamKind {
    /// Multi-tenant order and customer events.
    #[default]
    Commerce,
    /// Flat counter/value samples.
    Samples,
}

/// What the event generator draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub kind: StreamKind,
    pub tenants: Vec<TenantId>,
    /// Event types for order-class events, drawn uniformly.
    pub order_kinds: Vec<EventType>,
}

impl GeneratorConfig {
    pub fn for_profile(profile: Profile, tenants: Vec<TenantId>) -> Self {
        Self {
            kind: profile.stream_kind(),
            tenants,
            order_kinds: profile.order_kinds(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default(), DEFAULT_TENANTS.to_vec())
    }
}
