//! Service layer for employee use-cases.
//!
//! # Responsibility
//! - Validate caller input and map outcomes to typed results.
//! - Keep retry policy out of core; callers decide whether to re-prompt.

pub mod employee_service;
