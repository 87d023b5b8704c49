//! Customer domain model.
//!
//! # Responsibility
//! - Define the canonical customer record shared by repository and service.
//! - Provide persistence-precondition validation.
//!
//! # Invariants
//! - `id` is stable once assigned and never reused for another customer.
//! - `name` and `phone_number` are non-empty for every persisted record.
//! - Phone-number uniqueness is owned by the registration service, not by
//!   this model or the storage schema.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a registered customer.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CustomerId = Uuid;

/// Canonical customer record.
///
/// `id` stays `None` while the customer is only a submitted candidate; the
/// registration service assigns identity on first acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Stable global ID. `None` means "new, not yet registered".
    pub id: Option<CustomerId>,
    /// Display name. Required for persistence.
    pub name: String,
    /// Registration uniqueness key. Required for persistence.
    pub phone_number: String,
}

/// Validation failures for customer persistence preconditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerValidationError {
    MissingId,
    EmptyName,
    EmptyPhoneNumber,
}

impl Display for CustomerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId => write!(f, "customer id must be assigned before persistence"),
            Self::EmptyName => write!(f, "customer name cannot be empty"),
            Self::EmptyPhoneNumber => write!(f, "customer phone number cannot be empty"),
        }
    }
}

impl Error for CustomerValidationError {}

impl Customer {
    /// Creates a candidate customer without an assigned identity.
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Creates a customer with a caller-provided stable ID.
    ///
    /// Used by resubmission paths where identity already exists.
    pub fn with_id(
        id: CustomerId,
        name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Checks persistence preconditions.
    ///
    /// # Invariants
    /// - A persisted customer must carry an assigned id.
    /// - `name` and `phone_number` must be non-blank.
    pub fn validate(&self) -> Result<(), CustomerValidationError> {
        if self.id.is_none() {
            return Err(CustomerValidationError::MissingId);
        }
        if self.name.trim().is_empty() {
            return Err(CustomerValidationError::EmptyName);
        }
        if self.phone_number.trim().is_empty() {
            return Err(CustomerValidationError::EmptyPhoneNumber);
        }
        Ok(())
    }
}
