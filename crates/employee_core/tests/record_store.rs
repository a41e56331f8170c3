use employee_core::{Employee, LoadOutcome, RecordStore, StoreConfig, StoreError};
use std::fs;
use std::panic;
use std::path::Path;

fn ada() -> Employee {
    Employee::new("101", "Ada", "Engineer", "ada@corp.io", "02-123-4567")
}

fn grace() -> Employee {
    Employee::new("102", "Grace", "Architect", "grace@corp.io", "031-5555-0100")
}

fn linus() -> Employee {
    Employee::new("103", "Linus", "Maintainer", "linus@kernel.org", "010-123-4567")
}

fn config_in(dir: &Path) -> StoreConfig {
    StoreConfig::new(dir.join("data.txt"))
}

#[test]
fn find_by_id_on_empty_store_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::open(config_in(dir.path()));

    assert!(store.is_empty());
    assert!(store.find_by_id("101").is_none());
    assert!(store.find_by_id("").is_none());
}

#[test]
fn add_then_find_returns_identical_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecordStore::open(config_in(dir.path()));

    store.add(ada());
    let found = store.find_by_id("101").unwrap();
    assert_eq!(found, &ada());
}

#[test]
fn save_then_load_preserves_content_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let mut store = RecordStore::open(config.clone());
    store.add(linus());
    store.add(ada());
    store.add(grace());
    store.close().unwrap();

    let reopened = RecordStore::open(config);
    assert_eq!(reopened.list(), &[linus(), ada(), grace()]);
    assert!(matches!(
        reopened.load_outcome(),
        LoadOutcome::Loaded {
            records: 3,
            skipped: 0,
            recoded: 0
        }
    ));
}

#[test]
fn saved_file_uses_comma_rows_without_header() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let mut store = RecordStore::open(config.clone());
    store.add(ada());
    store.add(grace());
    store.close().unwrap();

    let contents = fs::read_to_string(config.path()).unwrap();
    assert_eq!(
        contents,
        "101,Ada,Engineer,ada@corp.io,02-123-4567\n\
         102,Grace,Architect,grace@corp.io,031-5555-0100\n"
    );
}

#[test]
fn load_skips_rows_without_five_fields() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    fs::write(
        config.path(),
        "101,Ada,Engineer,ada@corp.io,02-123-4567\n\
         999,Broken,Row\n\
         102,Grace,Architect,grace@corp.io,031-5555-0100\n",
    )
    .unwrap();

    let store = RecordStore::open(config);
    assert_eq!(store.len(), 2);
    assert_eq!(store.list()[0].id(), "101");
    assert_eq!(store.list()[1].id(), "102");
    assert!(matches!(
        store.load_outcome(),
        LoadOutcome::Loaded {
            records: 2,
            skipped: 1,
            recoded: 0
        }
    ));
}

#[test]
fn load_accepts_crlf_line_endings() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    fs::write(config.path(), "101,Ada,Engineer,ada@corp.io,02-123-4567\r\n").unwrap();

    let store = RecordStore::open(config);
    assert_eq!(store.list(), &[ada()]);
}

#[test]
fn delimiter_inside_a_field_corrupts_the_row_on_reload() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let mut store = RecordStore::open(config.clone());
    store.add(Employee::new(
        "104",
        "Hopper, Grace",
        "Admiral",
        "grace@navy.mil",
        "02-123-4567",
    ));
    store.add(ada());
    store.close().unwrap();

    let reopened = RecordStore::open(config);
    assert_eq!(reopened.list(), &[ada()]);
}

#[test]
fn delete_of_absent_id_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecordStore::open(config_in(dir.path()));
    store.add(ada());
    store.add(grace());

    assert!(store.delete("999").is_none());
    assert_eq!(store.list(), &[ada(), grace()]);
}

#[test]
fn new_id_must_be_valid_and_unused() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecordStore::open(config_in(dir.path()));
    store.add(ada());

    assert!(store.is_id_acceptable_for_new_record("102"));
    // Valid format but already taken.
    assert!(!store.is_id_acceptable_for_new_record("101"));
    // Unused but malformed.
    assert!(!store.is_id_acceptable_for_new_record("12"));
    assert!(!store.is_id_acceptable_for_new_record("abc"));
}

#[test]
fn edit_overwrites_fields_except_id() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecordStore::open(config_in(dir.path()));
    store.add(ada());

    let edited = store.edit("101", |employee| {
        employee.set_name("Ada Lovelace");
        employee.set_position("Analyst");
        employee.set_email("ada.l@corp.io");
        employee.set_phone("02-999-0000");
    });

    assert!(edited);
    assert_eq!(
        store.find_by_id("101").unwrap(),
        &Employee::new("101", "Ada Lovelace", "Analyst", "ada.l@corp.io", "02-999-0000")
    );
}

#[test]
fn unreadable_path_starts_empty_and_strict_open_fails() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be read as a data file.
    let config = StoreConfig::new(dir.path());

    let store = RecordStore::open(config.clone());
    assert!(store.is_empty());
    assert!(!store.load_outcome().is_loaded());

    let err = RecordStore::try_open(config).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}

#[test]
fn close_reports_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("missing-dir").join("data.txt"));

    let mut store = RecordStore::open(config);
    store.add(ada());
    let err = store.close().unwrap_err();
    assert!(err.to_string().contains("could not open the file"));
}

#[test]
fn flush_keeps_store_open() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let mut store = RecordStore::open(config.clone());
    store.add(ada());
    store.flush().unwrap();
    store.add(grace());
    store.flush().unwrap();

    assert_eq!(RecordStore::open(config).list(), &[ada(), grace()]);
}

#[test]
fn scoped_closes_even_when_closure_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let outcome = RecordStore::scoped(config.clone(), |store| -> Result<(), String> {
        store.add(ada());
        Err("shell aborted".to_string())
    });

    assert_eq!(outcome.value, Err("shell aborted".to_string()));
    assert!(outcome.saved.is_ok());
    assert_eq!(RecordStore::open(config).list(), &[ada()]);
}

#[test]
fn custom_delimiter_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("staff.psv"))
        .with_delimiter('|')
        .unwrap();
    let with_comma = Employee::new("105", "Smith, Jane", "Lead", "jane@corp.io", "02-123-4567");

    let mut store = RecordStore::open(config.clone());
    store.add(with_comma.clone());
    store.close().unwrap();

    assert_eq!(
        fs::read_to_string(config.path()).unwrap(),
        "105|Smith, Jane|Lead|jane@corp.io|02-123-4567\n"
    );
    assert_eq!(RecordStore::open(config).list(), &[with_comma]);
}

#[test]
fn badly_encoded_row_does_not_wipe_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let mut bytes = b"101,Ada,Engineer,ada@corp.io,02-123-4567\n".to_vec();
    bytes.extend_from_slice(b"102,Jos\xe9,Architect,jose@corp.io,031-5555-0100\n");
    fs::write(config.path(), bytes).unwrap();

    let outcome = RecordStore::scoped(config.clone(), |store| {
        assert!(matches!(
            store.load_outcome(),
            LoadOutcome::Loaded {
                records: 2,
                skipped: 0,
                recoded: 1
            }
        ));
        store.len()
    });
    assert_eq!(outcome.value, 2);
    outcome.saved.unwrap();

    let reopened = RecordStore::open(config);
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.list()[0], ada());
    assert_eq!(reopened.list()[1].name(), "Jos\u{FFFD}");
    assert_eq!(reopened.list()[1].email(), "jose@corp.io");
}

#[test]
fn existing_file_that_failed_to_load_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    // Exists, but reading it as a data file fails.
    let config = StoreConfig::new(dir.path());

    let mut store = RecordStore::open(config);
    store.add(ada());
    let err = store.close().unwrap_err();
    assert!(matches!(err, StoreError::UnreadDataFile(_)));
    assert!(dir.path().is_dir());
}

#[test]
fn scoped_saves_before_a_panic_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let scoped_config = config.clone();
    let result = panic::catch_unwind(move || {
        RecordStore::scoped(scoped_config, |store| {
            store.add(ada());
            panic!("shell crashed");
        })
    });

    assert!(result.is_err());
    assert_eq!(
        fs::read_to_string(config.path()).unwrap(),
        "101,Ada,Engineer,ada@corp.io,02-123-4567\n"
    );
}
