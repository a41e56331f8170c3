//! Store configuration.

use super::{StoreError, StoreResult};
use std::path::{Path, PathBuf};

/// Data file used when no path is configured.
pub const DEFAULT_DATA_FILE: &str = "data.txt";
/// Field separator used when no delimiter is configured.
pub const DEFAULT_DELIMITER: char = ',';

/// Storage binding for one `RecordStore`.
///
/// The delimiter is checked on construction, so every config in use can
/// round-trip a record whose id, email and phone pass validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    path: PathBuf,
    delimiter: char,
}

impl StoreConfig {
    /// Creates a config for `path` with the default delimiter.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Replaces the delimiter after `validate_delimiter` accepts it.
    pub fn with_delimiter(mut self, delimiter: char) -> StoreResult<Self> {
        validate_delimiter(delimiter)?;
        self.delimiter = delimiter;
        Ok(self)
    }

    /// Data file read on open and overwritten on close.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Field separator for persisted rows.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

/// Rejects separators that a valid id/email/phone may contain, and line breaks.
pub fn validate_delimiter(delimiter: char) -> StoreResult<()> {
    let clashes = delimiter.is_ascii_alphanumeric()
        || matches!(delimiter, '_' | '-' | '.' | '@' | '\n' | '\r');
    if clashes {
        return Err(StoreError::InvalidDelimiter(delimiter));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_delimiter, StoreConfig, DEFAULT_DATA_FILE};
    use crate::store::StoreError;
    use std::path::Path;

    #[test]
    fn default_binds_data_txt_and_comma() {
        let config = StoreConfig::default();
        assert_eq!(config.path(), Path::new(DEFAULT_DATA_FILE));
        assert_eq!(config.delimiter(), ',');
    }

    #[test]
    fn builders_override_fields() {
        let config = StoreConfig::default()
            .with_path("/tmp/staff.db")
            .with_delimiter('|')
            .expect("pipe is a safe delimiter");
        assert_eq!(config.path(), Path::new("/tmp/staff.db"));
        assert_eq!(config.delimiter(), '|');
    }

    #[test]
    fn delimiters_found_in_validated_fields_are_rejected() {
        for delimiter in ['-', '.', '@', '_', '0', '7', 'a', 'Z', '\n', '\r'] {
            assert!(
                matches!(
                    validate_delimiter(delimiter),
                    Err(StoreError::InvalidDelimiter(c)) if c == delimiter
                ),
                "{delimiter:?} should be rejected"
            );
        }
        for delimiter in [',', ';', '|', '\t', ' '] {
            assert!(validate_delimiter(delimiter).is_ok(), "{delimiter:?} should pass");
        }
    }

    #[test]
    fn rejected_delimiter_leaves_no_config() {
        let err = StoreConfig::default().with_delimiter('-').unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid delimiter '-': it must not be a line break or occur in ids, emails or phones"
        );
    }
}
