//! Employee manager console entry point.
//!
//! # Responsibility
//! - Parse command-line options and start file logging.
//! - Open the record store, run the menu shell, and always save on the way out.

mod shell;

use clap::Parser;
use employee_core::{
    default_log_level, init_logging, validate_delimiter, EmployeeService, LoadOutcome, RecordStore, StoreConfig,
    DEFAULT_DATA_FILE, DEFAULT_DELIMITER,
};
use log::warn;
use shell::Shell;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "employee_manager", version, about = "Console employee record manager")]
struct Cli {
    /// Data file loaded at start and rewritten on exit.
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Field separator used in the data file.
    #[arg(long, default_value_t = DEFAULT_DELIMITER, value_parser = parse_delimiter)]
    delimiter: char,

    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.unwrap_or_else(default_log_dir);
    let log_level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
    if let Err(err) = init_logging(log_level, &log_dir) {
        eprintln!("logging disabled: {err}");
    }

    let config = match StoreConfig::new(cli.data_file).with_delimiter(cli.delimiter) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let outcome = RecordStore::scoped(config, |store| {
        if let LoadOutcome::Unavailable(err) = store.load_outcome() {
            eprintln!("{err}");
        }
        let mut service = EmployeeService::new(store);
        Shell::new(io::stdin().lock(), io::stdout().lock(), io::stderr().lock()).run(&mut service)
    });

    // Save failures lose this session's edits but do not change the exit status.
    if let Err(err) = outcome.saved {
        warn!("event=app_exit module=cli status=degraded error_code=save_failed");
        eprintln!("{err}");
    }

    match outcome.value {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("console error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_delimiter(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    let (Some(delimiter), None) = (chars.next(), chars.next()) else {
        return Err(format!("expected exactly one character, got `{value}`"));
    };
    validate_delimiter(delimiter).map_err(|err| err.to_string())?;
    Ok(delimiter)
}

fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("employee_manager").join("logs")
}
