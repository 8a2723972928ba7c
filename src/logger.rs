//! Diagnostics logger
//!
//! A `log` backend that writes `LEVEL [module] message` lines to stderr.
//! The level can be changed at runtime.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Current level, stored as the `LevelFilter` discriminant
static CURRENT_LEVEL: AtomicUsize = AtomicUsize::new(LevelFilter::Warn as usize);

/// Logger writing to stderr
pub struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= current_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", format_record(record));
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Install the logger
///
/// Fails if another logger was installed first.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    set_level(level);
    Ok(())
}

/// Change the log level at runtime
pub fn set_level(level: LevelFilter) {
    CURRENT_LEVEL.store(level as usize, Ordering::SeqCst);
    log::set_max_level(level);
}

/// Current log level
pub fn current_level() -> LevelFilter {
    LevelFilter::iter()
        .nth(CURRENT_LEVEL.load(Ordering::Relaxed))
        .unwrap_or(LevelFilter::Warn)
}

/// Shift a level by `steps` (positive is more verbose), clamped to Off..=Trace
pub fn adjust_level(level: LevelFilter, steps: i32) -> LevelFilter {
    let max = LevelFilter::Trace as i32;
    let index = (level as i32 + steps).clamp(0, max);
    LevelFilter::iter()
        .nth(index as usize)
        .unwrap_or(level)
}

fn format_record(record: &Record) -> String {
    match record.module_path() {
        Some(module) => format!("{:<5} [{}] {}", record.level(), module, record.args()),
        None => format!("{:<5} {}", record.level(), record.args()),
    }
}
