//! Line codec for the delimited data file.
//!
//! One record per line, `id,name,position,email,phone`, no header and no
//! escaping. A value containing the delimiter shifts the field count and the
//! row is dropped on the next load.

use crate::model::employee::Employee;

/// Number of fields in one persisted row.
pub(crate) const FIELD_COUNT: usize = 5;

/// Parses one row. Returns `None` unless the row has exactly 5 fields.
pub(crate) fn parse_line(line: &str, delimiter: char) -> Option<Employee> {
    let fields: Vec<&str> = line.split(delimiter).collect();
    if fields.len() != FIELD_COUNT {
        return None;
    }
    match fields.as_slice() {
        [id, name, position, email, phone] => {
            Some(Employee::new(*id, *name, *position, *email, *phone))
        }
        _ => None,
    }
}

/// Formats one row without a trailing newline.
pub(crate) fn format_line(employee: &Employee, delimiter: char) -> String {
    let separator = delimiter.to_string();
    employee.fields().join(separator.as_str())
}
