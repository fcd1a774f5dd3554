//! Minimal stderr sink for the `log` facade.

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the logger. A second call keeps the first logger.
pub fn init(level: LevelFilter) {
    match log::set_boxed_logger(Box::new(StderrLogger { level })) {
        Ok(()) => log::set_max_level(level),
        Err(_) => log::debug!(target: "daoml", "logger already installed"),
    }
}
