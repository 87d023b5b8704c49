use regbook_core::db::open_db_in_memory;
use regbook_core::{
    Customer, CustomerId, CustomerRepository, RegistrationError, RegistrationService, RepoError,
    RepoResult, SqliteCustomerRepository,
};
use std::cell::RefCell;
use uuid::Uuid;

/// Recording repository double.
///
/// Keeps every `save` argument and every phone-number lookup so tests can
/// assert on write counts and on the exact record handed to persistence.
#[derive(Default)]
struct RecordingRepo {
    existing: Option<Customer>,
    fail_lookups: bool,
    lookups: RefCell<Vec<String>>,
    saved: RefCell<Vec<Customer>>,
}

impl RecordingRepo {
    fn empty() -> Self {
        Self::default()
    }

    fn with_existing(existing: Customer) -> Self {
        Self {
            existing: Some(existing),
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail_lookups: true,
            ..Self::default()
        }
    }

    fn saved_customers(&self) -> Vec<Customer> {
        self.saved.borrow().clone()
    }
}

impl CustomerRepository for &RecordingRepo {
    fn save(&self, customer: &Customer) -> RepoResult<()> {
        self.saved.borrow_mut().push(customer.clone());
        Ok(())
    }

    fn find_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        Ok(self.existing.clone().filter(|c| c.id == Some(id)))
    }

    fn find_by_phone_number(&self, phone_number: &str) -> RepoResult<Option<Customer>> {
        if self.fail_lookups {
            return Err(RepoError::InvalidData("lookup backend offline".to_string()));
        }
        self.lookups.borrow_mut().push(phone_number.to_string());
        Ok(self
            .existing
            .clone()
            .filter(|c| c.phone_number == phone_number))
    }
}

#[test]
fn registers_new_customer_and_keeps_supplied_id() {
    let repo = RecordingRepo::empty();
    let service = RegistrationService::new(&repo);

    let id = Uuid::new_v4();
    let candidate = Customer::with_id(id, "Marion", "000099");
    let registered = service.register_customer(candidate.clone()).unwrap();

    assert_eq!(registered, id);
    assert_eq!(repo.saved_customers(), [candidate]);
}

#[test]
fn registers_new_customer_and_assigns_id_when_absent() {
    let repo = RecordingRepo::empty();
    let service = RegistrationService::new(&repo);

    let registered = service
        .register_customer(Customer::new("Marion", "000099"))
        .unwrap();

    assert!(!registered.is_nil());
    let saved = repo.saved_customers();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, Some(registered));
    assert_eq!(saved[0].name, "Marion");
    assert_eq!(saved[0].phone_number, "000099");
}

#[test]
fn resubmission_with_same_id_succeeds_without_writing() {
    let id = Uuid::new_v4();
    let repo = RecordingRepo::with_existing(Customer::with_id(id, "Marion", "000099"));
    let service = RegistrationService::new(&repo);

    let registered = service
        .register_customer(Customer::with_id(id, "Marion", "000099"))
        .unwrap();

    assert_eq!(registered, id);
    assert!(repo.saved_customers().is_empty());
    assert_eq!(repo.lookups.borrow().as_slice(), ["000099"]);
}

#[test]
fn resubmission_with_changed_name_is_still_a_no_write_success() {
    let id = Uuid::new_v4();
    let repo = RecordingRepo::with_existing(Customer::with_id(id, "Marion", "000099"));
    let service = RegistrationService::new(&repo);

    let registered = service
        .register_customer(Customer::with_id(id, "Marianne", "000099"))
        .unwrap();

    assert_eq!(registered, id);
    assert!(repo.saved_customers().is_empty());
}

#[test]
fn conflicting_phone_number_fails_without_writing() {
    let repo =
        RecordingRepo::with_existing(Customer::with_id(Uuid::new_v4(), "Steve", "000099"));
    let service = RegistrationService::new(&repo);

    let err = service
        .register_customer(Customer::with_id(Uuid::new_v4(), "Marion", "000099"))
        .unwrap_err();

    match err {
        RegistrationError::PhoneNumberTaken(phone_number) => {
            assert_eq!(phone_number, "000099");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(repo.saved_customers().is_empty());
}

#[test]
fn candidate_without_id_conflicts_against_any_existing_holder() {
    let repo =
        RecordingRepo::with_existing(Customer::with_id(Uuid::new_v4(), "Steve", "000099"));
    let service = RegistrationService::new(&repo);

    let err = service
        .register_customer(Customer::new("Marion", "000099"))
        .unwrap_err();

    assert!(matches!(err, RegistrationError::PhoneNumberTaken(_)));
    assert!(repo.saved_customers().is_empty());
}

#[test]
fn conflict_message_names_the_taken_phone_number() {
    let err = RegistrationError::PhoneNumberTaken("000099".to_string());
    assert_eq!(err.to_string(), "phone number [000099] is taken");
}

#[test]
fn lookup_failure_propagates_unchanged() {
    let repo = RecordingRepo::failing();
    let service = RegistrationService::new(&repo);

    let err = service
        .register_customer(Customer::new("Marion", "000099"))
        .unwrap_err();

    assert!(matches!(err, RegistrationError::Repo(RepoError::InvalidData(_))));
    assert!(repo.saved_customers().is_empty());
}

#[test]
fn registration_against_sqlite_store_persists_and_guards_the_number() {
    let conn = open_db_in_memory().unwrap();
    let service = RegistrationService::new(SqliteCustomerRepository::new(&conn));

    let id = service
        .register_customer(Customer::new("Marion", "000099"))
        .unwrap();

    let stored = SqliteCustomerRepository::new(&conn)
        .find_by_id(id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "Marion");
    assert_eq!(stored.phone_number, "000099");

    let err = service
        .register_customer(Customer::new("Steve", "000099"))
        .unwrap_err();
    assert!(matches!(err, RegistrationError::PhoneNumberTaken(_)));

    let again = service
        .register_customer(Customer::with_id(id, "Marion", "000099"))
        .unwrap();
    assert_eq!(again, id);
}
