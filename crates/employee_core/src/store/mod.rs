//! Delimited-file storage for employee records.
//!
//! # Responsibility
//! - Own the in-memory record collection for one process.
//! - Load the collection from the data file once and write it back on close.
//!
//! # Invariants
//! - The data file is read exactly once (open) and rewritten in full on
//!   flush/close; there are no partial writes.
//! - Rows with a field count other than 5 are dropped on load.
//! - Field values are written verbatim; the delimiter is never escaped.
//! - A data file that exists but could not be read is never overwritten.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub(crate) mod codec;
pub mod config;
pub mod record_store;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Delimiter could appear inside a valid field or split a row.
    InvalidDelimiter(char),
    /// Save refused because the existing file was never read successfully.
    UnreadDataFile(PathBuf),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the data file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "could not open the file `{}`: {source}", path.display())
            }
            Self::InvalidDelimiter(delimiter) => write!(
                f,
                "invalid delimiter {delimiter:?}: it must not be a line break or occur in ids, emails or phones"
            ),
            Self::UnreadDataFile(path) => write!(
                f,
                "refusing to overwrite `{}` because it could not be loaded",
                path.display()
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidDelimiter(_) | Self::UnreadDataFile(_) => None,
        }
    }
}
