use serde::{Deserialize, Serialize};

use super::CustomerId;

/// Payload of a `customer.updated` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerObject {
    pub id: CustomerId,
    pub email: String,
}
