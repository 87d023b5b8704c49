//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `regbook_core` linkage.
//! - Keep output deterministic enough for quick local sanity checks.

use regbook_core::db::open_db_in_memory;
use regbook_core::{Customer, RegistrationService, SqliteCustomerRepository};

fn main() {
    println!("regbook_core version={}", regbook_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("db open failed: {err}");
            std::process::exit(1);
        }
    };

    let service = RegistrationService::new(SqliteCustomerRepository::new(&conn));
    match service.register_customer(Customer::new("Smoke Probe", "000000")) {
        Ok(id) => println!("registered sample customer id={id}"),
        Err(err) => {
            eprintln!("registration failed: {err}");
            std::process::exit(1);
        }
    }
}
