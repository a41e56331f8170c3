//! Core domain logic for the employee record manager.
//! This crate is the single source of truth for record invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{
    is_valid_email, is_valid_id, is_valid_phone, validate_email, validate_id, validate_phone,
    Employee, EmployeeValidationError,
};
pub use service::employee_service::{
    EmployeeRepository, EmployeeService, EmployeeServiceError, EmployeeUpdate, NewEmployee,
    ServiceResult,
};
pub use store::config::{validate_delimiter, StoreConfig, DEFAULT_DATA_FILE, DEFAULT_DELIMITER};
pub use store::record_store::{LoadOutcome, RecordStore, ScopedOutcome};
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
