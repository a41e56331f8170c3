//! Employee record model.
//!
//! # Responsibility
//! - Define the five-field record persisted by the store.
//! - Provide the id/email/phone validators used before values are assigned.
//!
//! # Invariants
//! - A stored `id` is exactly 3 ASCII digits.
//! - A stored `email` matches the lowercase `local@domain.tld` shape.
//! - A stored `phone` matches `DD[D]-DDD[D]-DDDD`.
//! - No field contains the storage delimiter (not enforced here).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Required length of an employee id.
pub const ID_LEN: usize = 3;

// Local part is lowercase only. Uppercase addresses are rejected on purpose.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[_a-z0-9-]+(\.[_a-z0-9-]+)*@([0-9A-Za-z_]+\.)+[0-9A-Za-z_]+$")
        .expect("valid email regex")
});
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2,3}-[0-9]{3,4}-[0-9]{4}$").expect("valid phone regex"));

/// Field validation failures for user-supplied employee values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// Id is not exactly 3 ASCII digits.
    InvalidId(String),
    /// Email does not match the accepted address shape.
    InvalidEmail(String),
    /// Phone does not match `DD[D]-DDD[D]-DDDD`.
    InvalidPhone(String),
    /// Free-text field contains the storage delimiter.
    ContainsDelimiter {
        field: &'static str,
        delimiter: char,
    },
    /// A free-text field would split its row in two.
    ContainsLineBreak { field: &'static str },
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "invalid id: `{value}`"),
            Self::InvalidEmail(value) => write!(f, "invalid email: `{value}`"),
            Self::InvalidPhone(value) => write!(f, "invalid phone: `{value}`"),
            Self::ContainsDelimiter { field, delimiter } => {
                write!(f, "{field} must not contain `{delimiter}`")
            }
            Self::ContainsLineBreak { field } => write!(f, "{field} must not contain a line break"),
        }
    }
}

impl Error for EmployeeValidationError {}

/// One employee record.
///
/// Setters assign unconditionally. Callers run the `validate_*` helpers first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: String,
    name: String,
    position: String,
    email: String,
    phone: String,
}

impl Employee {
    /// Creates a record from already-collected field values.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: position.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_position(&mut self, position: impl Into<String>) {
        self.position = position.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    /// Field values in persisted column order.
    pub fn fields(&self) -> [&str; 5] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.position.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
        ]
    }

    /// Checks the three validated fields in id, email, phone order.
    ///
    /// Name and position are free text and are not checked here.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        validate_id(&self.id)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.id, self.name, self.position, self.email, self.phone
        )
    }
}

/// Returns true iff `id` is exactly 3 ASCII digits.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LEN && id.bytes().all(|byte| byte.is_ascii_digit())
}

/// Returns true iff `email` matches the accepted address shape.
///
/// Case-sensitive: `A@B.com` is rejected because of the uppercase local part.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Returns true iff `phone` matches `DD[D]-DDD[D]-DDDD`.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn validate_id(id: &str) -> Result<(), EmployeeValidationError> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(EmployeeValidationError::InvalidId(id.to_string()))
    }
}

pub fn validate_email(email: &str) -> Result<(), EmployeeValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(EmployeeValidationError::InvalidEmail(email.to_string()))
    }
}

pub fn validate_phone(phone: &str) -> Result<(), EmployeeValidationError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(EmployeeValidationError::InvalidPhone(phone.to_string()))
    }
}
