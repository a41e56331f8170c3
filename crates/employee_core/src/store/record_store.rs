//! In-memory record store bound to one delimited data file.
//!
//! # Responsibility
//! - Load all rows once at open and expose lookup/mutation over them.
//! - Write the full snapshot back through an explicit `flush`/`close`.
//!
//! # Invariants
//! - Records keep insertion order; nothing is sorted or filtered.
//! - The store performs no field validation; callers validate first.
//! - `close` consumes the store, so `Open -> Closed` happens once.
//! - A data file that exists but failed to load is never overwritten.
//! - `scoped` saves even when its closure panics.

use super::codec::{format_line, parse_line};
use super::config::StoreConfig;
use super::{StoreError, StoreResult};
use crate::model::employee::{is_valid_id, Employee};
use log::{error, info};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Rows read from the data file plus per-row counters.
struct LoadedRows {
    employees: Vec<Employee>,
    skipped: usize,
    recoded: usize,
}

/// Result of reading the data file at open.
#[derive(Debug)]
pub enum LoadOutcome {
    /// File was read. `skipped` counts rows without exactly 5 fields,
    /// `recoded` counts rows whose invalid UTF-8 was replaced with U+FFFD.
    Loaded {
        records: usize,
        skipped: usize,
        recoded: usize,
    },
    /// File could not be opened or read; the store started empty.
    Unavailable(StoreError),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// True when saving would replace a file whose rows were never read.
    fn blocks_overwrite(&self) -> bool {
        matches!(self, Self::Unavailable(err) if !err.is_not_found())
    }

    fn from_rows(rows: &LoadedRows) -> Self {
        Self::Loaded {
            records: rows.employees.len(),
            skipped: rows.skipped,
            recoded: rows.recoded,
        }
    }
}

/// Closure value and save result from `RecordStore::scoped`.
#[derive(Debug)]
pub struct ScopedOutcome<T> {
    pub value: T,
    pub saved: StoreResult<()>,
}

/// Ordered employee collection loaded from and saved to one file.
#[derive(Debug)]
pub struct RecordStore {
    config: StoreConfig,
    employees: Vec<Employee>,
    load_outcome: LoadOutcome,
}

impl RecordStore {
    /// Opens the store, starting empty when the data file is unavailable.
    ///
    /// # Side effects
    /// - Reads the whole data file.
    /// - Emits `store_load` events; a failure is logged, not returned.
    ///   Inspect `load_outcome()` to report it.
    pub fn open(config: StoreConfig) -> Self {
        let started_at = Instant::now();
        info!("event=store_load module=store status=start");

        match read_rows(&config) {
            Ok(rows) => {
                info!(
                    "event=store_load module=store status=ok duration_ms={} records={} skipped={} recoded={}",
                    started_at.elapsed().as_millis(),
                    rows.employees.len(),
                    rows.skipped,
                    rows.recoded
                );
                Self {
                    config,
                    load_outcome: LoadOutcome::from_rows(&rows),
                    employees: rows.employees,
                }
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error duration_ms={} error_code=store_open_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Self {
                    config,
                    employees: Vec::new(),
                    load_outcome: LoadOutcome::Unavailable(err),
                }
            }
        }
    }

    /// Opens the store, returning the read error instead of starting empty.
    pub fn try_open(config: StoreConfig) -> StoreResult<Self> {
        let rows = read_rows(&config)?;
        Ok(Self {
            config,
            load_outcome: LoadOutcome::from_rows(&rows),
            employees: rows.employees,
        })
    }

    /// Opens a store, runs `f`, then closes it whatever `f` returned.
    ///
    /// A panic in `f` still closes the store before the panic resumes.
    pub fn scoped<T>(
        config: StoreConfig,
        f: impl FnOnce(&mut RecordStore) -> T,
    ) -> ScopedOutcome<T> {
        let mut store = Self::open(config);
        let result = panic::catch_unwind(AssertUnwindSafe(|| f(&mut store)));
        let saved = store.close();
        match result {
            Ok(value) => ScopedOutcome { value, saved },
            Err(payload) => {
                error!(
                    "event=store_scope module=store status=error error_code=closure_panicked saved={}",
                    saved.is_ok()
                );
                panic::resume_unwind(payload)
            }
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[Employee] {
        &self.employees
    }

    /// First record whose id equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|employee| employee.id() == id)
    }

    /// True when `id` is well-formed and not used by any record.
    pub fn is_id_acceptable_for_new_record(&self, id: &str) -> bool {
        is_valid_id(id) && self.find_by_id(id).is_none()
    }

    /// Appends a record. No validation or duplicate check happens here.
    pub fn add(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    /// Applies `change` to the first record with `id`.
    ///
    /// Returns `false` when no record matched.
    pub fn edit(&mut self, id: &str, change: impl FnOnce(&mut Employee)) -> bool {
        match self.find_by_id_mut(id) {
            Some(employee) => {
                change(employee);
                true
            }
            None => false,
        }
    }

    /// Removes the first record with `id`. Absent ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Option<Employee> {
        let index = self
            .employees
            .iter()
            .position(|employee| employee.id() == id)?;
        Some(self.employees.remove(index))
    }

    /// Rewrites the data file with the current snapshot and keeps the store open.
    ///
    /// Refused with `UnreadDataFile` when the file exists but failed to load.
    pub fn flush(&self) -> StoreResult<()> {
        let started_at = Instant::now();
        if self.load_outcome.blocks_overwrite() {
            error!("event=store_save module=store status=error error_code=unread_data_file");
            return Err(StoreError::UnreadDataFile(self.config.path().to_path_buf()));
        }
        match write_rows(&self.config, &self.employees) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok duration_ms={} records={}",
                    started_at.elapsed().as_millis(),
                    self.employees.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error duration_ms={} error_code=store_write_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Writes the final snapshot and ends the store's lifetime.
    pub fn close(self) -> StoreResult<()> {
        self.flush()
    }
}

// Reads raw bytes per row so one badly encoded row cannot fail the whole load.
fn read_rows(config: &StoreConfig) -> StoreResult<LoadedRows> {
    let path = config.path();
    let file = File::open(path).map_err(|err| StoreError::io(path, err))?;

    let mut rows = LoadedRows {
        employees: Vec::new(),
        skipped: 0,
        recoded: 0,
    };
    for raw in BufReader::new(file).split(b'\n') {
        let mut raw = raw.map_err(|err| StoreError::io(path, err))?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(err) => {
                rows.recoded += 1;
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        match parse_line(&line, config.delimiter()) {
            Some(employee) => rows.employees.push(employee),
            None => rows.skipped += 1,
        }
    }

    Ok(rows)
}

fn write_rows(config: &StoreConfig, employees: &[Employee]) -> StoreResult<()> {
    let path = config.path();
    let file = File::create(path).map_err(|err| StoreError::io(path, err))?;

    let mut writer = BufWriter::new(file);
    for employee in employees {
        writeln!(writer, "{}", format_line(employee, config.delimiter()))
            .map_err(|err| StoreError::io(path, err))?;
    }
    writer.flush().map_err(|err| StoreError::io(path, err))
}
