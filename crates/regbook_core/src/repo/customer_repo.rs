//! Customer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable save/lookup APIs over canonical `customers` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Customer::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `save` upserts by id; it never generates identity.

use crate::db::DbError;
use crate::model::customer::{Customer, CustomerId, CustomerValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const CUSTOMER_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number
FROM customers";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for customer persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(CustomerValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted customer data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<CustomerValidationError> for RepoError {
    fn from(value: CustomerValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for customer persistence.
///
/// Lookup misses are `Ok(None)`, never errors. `save` requires an already
/// assigned id: identity generation belongs to the registration service.
pub trait CustomerRepository {
    fn save(&self, customer: &Customer) -> RepoResult<()>;
    fn find_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    fn find_by_phone_number(&self, phone_number: &str) -> RepoResult<Option<Customer>>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn save(&self, customer: &Customer) -> RepoResult<()> {
        customer.validate()?;
        let id = match customer.id {
            Some(id) => id,
            None => return Err(CustomerValidationError::MissingId.into()),
        };

        self.conn.execute(
            "INSERT INTO customers (id, name, phone_number)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                phone_number = excluded.phone_number,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                id.to_string(),
                customer.name.as_str(),
                customer.phone_number.as_str(),
            ],
        )?;

        Ok(())
    }

    fn find_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_customer_row(row)?));
        }

        Ok(None)
    }

    fn find_by_phone_number(&self, phone_number: &str) -> RepoResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE phone_number = ?1;"))?;

        let mut rows = stmt.query([phone_number])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_customer_row(row)?));
        }

        Ok(None)
    }
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in customers.id"))
    })?;

    let customer = Customer {
        id: Some(id),
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
    };
    customer.validate()?;
    Ok(customer)
}
