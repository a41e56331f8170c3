//! Domain model for employee records.
//!
//! # Responsibility
//! - Define the record value type owned by the store.
//! - Provide pure field validators shared by the service layer and the shell.
//!
//! # Invariants
//! - Setters never validate; validation happens before a value is assigned.
//! - Validators are side-effect free and never panic.

pub mod employee;
