//! Customer registration use-case service.
//!
//! # Responsibility
//! - Decide whether a candidate registration is accepted, an idempotent
//!   resubmission, or a phone-number conflict.
//! - Assign identity to accepted candidates that do not carry one yet.
//!
//! # Invariants
//! - At most one repository write per registration attempt, issued only
//!   when the phone number is not bound to a different customer.
//! - Repository failures propagate unchanged; the service never retries.

use crate::model::customer::{Customer, CustomerId};
use crate::repo::customer_repo::{CustomerRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Registration failure modes surfaced to callers.
#[derive(Debug)]
pub enum RegistrationError {
    /// The submitted phone number is already bound to a different customer.
    PhoneNumberTaken(String),
    /// Storage failure, propagated without interpretation.
    Repo(RepoError),
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PhoneNumberTaken(phone_number) => {
                write!(f, "phone number [{phone_number}] is taken")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PhoneNumberTaken(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for RegistrationError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service deciding customer registration outcomes.
pub struct RegistrationService<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> RegistrationService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a candidate customer, enforcing phone-number uniqueness.
    ///
    /// # Contract
    /// - A phone number unseen by the store accepts the candidate: identity
    ///   is generated when absent, the record is saved once, and the final
    ///   id is returned.
    /// - A match holding the candidate's own id is an idempotent success:
    ///   nothing is written and the existing id is returned.
    /// - A match holding a different id (or any match when the candidate
    ///   has no id) fails with [`RegistrationError::PhoneNumberTaken`];
    ///   nothing is written.
    pub fn register_customer(
        &self,
        candidate: Customer,
    ) -> Result<CustomerId, RegistrationError> {
        if let Some(existing) = self.repo.find_by_phone_number(&candidate.phone_number)? {
            // Same logical customer resubmitted: success without a write.
            // Field changes riding on the resubmission are dropped.
            return match (existing.id, candidate.id) {
                (Some(existing_id), Some(candidate_id)) if existing_id == candidate_id => {
                    Ok(existing_id)
                }
                _ => Err(RegistrationError::PhoneNumberTaken(candidate.phone_number)),
            };
        }

        let mut accepted = candidate;
        let id = match accepted.id {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4();
                accepted.id = Some(id);
                id
            }
        };

        self.repo.save(&accepted)?;
        Ok(id)
    }
}
