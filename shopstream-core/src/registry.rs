//! Current email per customer.

use shopstream_sdk::objects::CustomerId;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown customer: {0}")]
    UnknownCustomer(CustomerId),
}

/// Mapping from customer id to the email events should carry.
///
/// The population is fixed at construction; ids are never added or removed
/// afterwards. Ids iterate in ascending order.
///
/// Writes take `&mut self`. Several producers sharing one registry would put
/// it behind a lock, and every read would still observe the latest write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRegistry {
    emails: BTreeMap<CustomerId, String>,
}

impl CustomerRegistry {
    /// Seed the registry with `customer<id>@example.com` for every id.
    pub fn with_defaults(ids: impl IntoIterator<Item = CustomerId>) -> Self {
        let emails = ids
            .into_iter()
            .map(|id| (id, default_email(id)))
            .collect();
        Self { emails }
    }

    pub fn get(&self, id: CustomerId) -> Result<&str, RegistryError> {
        self.emails
            .get(&id)
            .map(String::as_str)
            .ok_or(RegistryError::UnknownCustomer(id))
    }

    pub fn set(&mut self, id: CustomerId, email: impl Into<String>) -> Result<(), RegistryError> {
        let slot = self
            .emails
            .get_mut(&id)
            .ok_or(RegistryError::UnknownCustomer(id))?;
        *slot = email.into();
        Ok(())
    }

    pub fn customer_ids(&self) -> impl Iterator<Item = CustomerId> + '_ {
        self.emails.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

pub fn default_email(id: CustomerId) -> String {
    format!("customer{id}@example.com")
}

/// The address a customer switches to when an email change fires.
pub fn updated_email(id: CustomerId) -> String {
    format!("updated{id}@example.com")
}
