//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Customer::validate()` before
//!   persistence.
//! - Phone-number lookups treat absence as a normal result, not an error.

pub mod customer_repo;
