//! Field contract of the downstream semantic layer.
//!
//! The analytical model ingests the `orders`, `customers` and shared `events`
//! topics and resolves its dimensions by path into the published JSON. Its
//! measures (`count`, `sum(order_total)`, `avg(value)`) are computed over those
//! dimensions. Renaming a field or changing its JSON type breaks them
//! silently, so the contract is kept here as data and checked against real
//! serialized payloads.

use serde_json::Value;
use thiserror::Error;

use crate::objects::EventCategory;

/// JSON type a dimension resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Number,
    String,
    /// A string in the `created_at` wire format.
    Time,
    /// An integer count of seconds since the Unix epoch.
    EpochSeconds,
}

impl FieldType {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::Number => value.is_number(),
            FieldType::String => value.is_string(),
            FieldType::Time => value
                .as_str()
                .is_some_and(|raw| crate::timestamp::parse(raw).is_ok()),
            FieldType::EpochSeconds => value.is_i64() || value.is_u64(),
        }
    }
}

/// A dimension and where it lives in the event JSON.
#[derive(Debug, Clone, Copy)]
pub struct ContractField {
    pub dimension: &'static str,
    pub path: &'static [&'static str],
    pub field_type: FieldType,
}

const fn field(
    dimension: &'static str,
    path: &'static [&'static str],
    field_type: FieldType,
) -> ContractField {
    ContractField {
        dimension,
        path,
        field_type,
    }
}

/// Dimensions of the `Orders` cube.
pub const ORDER_FIELDS: &[ContractField] = &[
    field("team_id", &["tenant_id"], FieldType::Number),
    field("order_id", &["object", "id"], FieldType::String),
    field("order_total", &["object", "total"], FieldType::Number),
    field("payment_method", &["object", "payment_method"], FieldType::String),
    field("customer_id", &["object", "customer", "id"], FieldType::Number),
    field("customer_email", &["object", "customer", "email"], FieldType::String),
    field("event_at", &["created_at"], FieldType::Time),
];

/// Dimensions of the `Customers` cube.
pub const CUSTOMER_FIELDS: &[ContractField] = &[
    field("team_id", &["tenant_id"], FieldType::Number),
    field("customer_id", &["object", "id"], FieldType::Number),
    field("email", &["object", "email"], FieldType::String),
    field("event_at", &["created_at"], FieldType::Time),
];

/// Dimensions of the `Events` cube.
pub const SAMPLE_FIELDS: &[ContractField] = &[
    field("id", &["id"], FieldType::Number),
    field("message", &["message"], FieldType::String),
    field("value", &["value"], FieldType::Number),
    field("timestamp", &["timestamp"], FieldType::EpochSeconds),
];

pub fn fields_for(category: EventCategory) -> &'static [ContractField] {
    match category {
        EventCategory::Order => ORDER_FIELDS,
        EventCategory::Customer => CUSTOMER_FIELDS,
        EventCategory::Sample => SAMPLE_FIELDS,
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("dimension {dimension} missing at {path}")]
    Missing { dimension: &'static str, path: String },

    #[error("dimension {dimension} at {path} is not a {expected:?}")]
    WrongType {
        dimension: &'static str,
        path: String,
        expected: FieldType,
    },
}

/// Check a serialized event against the dimensions of its category.
pub fn check(category: EventCategory, event: &Value) -> Result<(), ContractViolation> {
    for field in fields_for(category) {
        let path = field.path.join(".");
        let Some(value) = field.path.iter().try_fold(event, |node, key| node.get(key)) else {
            return Err(ContractViolation::Missing {
                dimension: field.dimension,
                path,
            });
        };
        if !field.field_type.matches(value) {
            return Err(ContractViolation::WrongType {
                dimension: field.dimension,
                path,
                expected: field.field_type,
            });
        }
    }
    Ok(())
}
