//! Canonical domain model for customer registration.
//!
//! # Responsibility
//! - Define the data structures shared by repository and service layers.
//!
//! # Invariants
//! - Every persisted customer carries a stable `CustomerId`.
//! - Identity is assigned by the registration service, never by storage.

pub mod customer;
