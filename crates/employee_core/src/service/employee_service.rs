//! Employee use-case service.
//!
//! # Responsibility
//! - Provide add/get/update/delete/list entry points with typed outcomes.
//! - Enforce field validation that the store itself does not perform.
//!
//! # Invariants
//! - A rejected request leaves the repository unchanged.
//! - New ids must be well-formed and unused.
//! - Name/position must not contain the storage delimiter or a line break.
//! - Service methods never loop or block waiting for better input.

use crate::model::employee::{
    validate_email, validate_id, validate_phone, Employee, EmployeeValidationError,
};
use crate::store::record_store::RecordStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, EmployeeServiceError>;

/// Service error for employee use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeServiceError {
    /// A field value failed its validator.
    Validation(EmployeeValidationError),
    /// Id is well-formed but already used.
    DuplicateId(String),
    /// No record has this id.
    NotFound(String),
}

impl Display for EmployeeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "employee id already exists: {id}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
        }
    }
}

impl Error for EmployeeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<EmployeeValidationError> for EmployeeServiceError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Request model for creating one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub id: String,
    pub name: String,
    pub position: String,
    pub email: String,
    pub phone: String,
}

/// Replacement values for every field except `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub name: String,
    pub position: String,
    pub email: String,
    pub phone: String,
}

/// Storage contract consumed by `EmployeeService`.
pub trait EmployeeRepository {
    fn find_by_id(&self, id: &str) -> Option<&Employee>;
    fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Employee>;
    fn add(&mut self, employee: Employee);
    fn delete(&mut self, id: &str) -> Option<Employee>;
    fn list(&self) -> &[Employee];
    /// Field separator of the backing storage.
    fn delimiter(&self) -> char;
}

impl EmployeeRepository for RecordStore {
    fn find_by_id(&self, id: &str) -> Option<&Employee> {
        RecordStore::find_by_id(self, id)
    }

    fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Employee> {
        RecordStore::find_by_id_mut(self, id)
    }

    fn add(&mut self, employee: Employee) {
        RecordStore::add(self, employee)
    }

    fn delete(&mut self, id: &str) -> Option<Employee> {
        RecordStore::delete(self, id)
    }

    fn list(&self) -> &[Employee] {
        RecordStore::list(self)
    }

    fn delimiter(&self) -> char {
        self.config().delimiter()
    }
}

impl<R: EmployeeRepository + ?Sized> EmployeeRepository for &mut R {
    fn find_by_id(&self, id: &str) -> Option<&Employee> {
        (**self).find_by_id(id)
    }

    fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Employee> {
        (**self).find_by_id_mut(id)
    }

    fn add(&mut self, employee: Employee) {
        (**self).add(employee)
    }

    fn delete(&mut self, id: &str) -> Option<Employee> {
        (**self).delete(id)
    }

    fn list(&self) -> &[Employee] {
        (**self).list()
    }

    fn delimiter(&self) -> char {
        (**self).delimiter()
    }
}

/// Use-case facade over an employee repository.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Checks that `id` can be used for a new record.
    ///
    /// Format is checked before the duplicate lookup.
    pub fn check_new_id(&self, id: &str) -> ServiceResult<()> {
        validate_id(id)?;
        if self.repo.find_by_id(id).is_some() {
            return Err(EmployeeServiceError::DuplicateId(id.to_string()));
        }
        Ok(())
    }

    /// Checks that a free-text field can be stored without corrupting its row.
    pub fn check_free_text(&self, field: &'static str, value: &str) -> ServiceResult<()> {
        if value.contains(['\n', '\r']) {
            return Err(EmployeeValidationError::ContainsLineBreak { field }.into());
        }
        let delimiter = self.repo.delimiter();
        if value.contains(delimiter) {
            return Err(EmployeeValidationError::ContainsDelimiter { field, delimiter }.into());
        }
        Ok(())
    }

    /// Validates and appends one employee, returning the stored record.
    pub fn add_employee(&mut self, request: NewEmployee) -> ServiceResult<Employee> {
        self.check_new_id(&request.id)?;
        self.check_free_text("name", &request.name)?;
        self.check_free_text("position", &request.position)?;
        validate_email(&request.email)?;
        validate_phone(&request.phone)?;

        let employee = Employee::new(
            request.id,
            request.name,
            request.position,
            request.email,
            request.phone,
        );
        self.repo.add(employee.clone());
        info!(
            "event=employee_add module=service status=ok id={}",
            employee.id()
        );
        Ok(employee)
    }

    /// Gets one employee by id.
    pub fn get_employee(&self, id: &str) -> ServiceResult<&Employee> {
        self.repo
            .find_by_id(id)
            .ok_or_else(|| EmployeeServiceError::NotFound(id.to_string()))
    }

    /// Replaces every field except `id` after validating the whole update.
    pub fn update_employee(&mut self, id: &str, update: EmployeeUpdate) -> ServiceResult<Employee> {
        if self.repo.find_by_id(id).is_none() {
            return Err(EmployeeServiceError::NotFound(id.to_string()));
        }
        self.check_free_text("name", &update.name)?;
        self.check_free_text("position", &update.position)?;
        validate_email(&update.email)?;
        validate_phone(&update.phone)?;

        let employee = self
            .repo
            .find_by_id_mut(id)
            .ok_or_else(|| EmployeeServiceError::NotFound(id.to_string()))?;
        employee.set_name(update.name);
        employee.set_position(update.position);
        employee.set_email(update.email);
        employee.set_phone(update.phone);
        info!("event=employee_update module=service status=ok id={id}");
        Ok(employee.clone())
    }

    /// Deletes the first employee with `id`.
    pub fn delete_employee(&mut self, id: &str) -> ServiceResult<Employee> {
        let removed = self
            .repo
            .delete(id)
            .ok_or_else(|| EmployeeServiceError::NotFound(id.to_string()))?;
        info!("event=employee_delete module=service status=ok id={id}");
        Ok(removed)
    }

    /// Lists employees in insertion order.
    pub fn list_employees(&self) -> &[Employee] {
        self.repo.list()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.list().is_empty()
    }
}
