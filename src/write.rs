//! Direct shim-based logging.
//!
//! This routes the records of the `log` facade through the shim's non-allocating writer, so the
//! allocator can be traced while it is in the middle of an operation.

use buddy_shim::{config, log as shim_log};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// The logger.
static LOGGER: Logger = Logger;

/// A log sink writing to the shim's log target (stderr by default).
///
/// Every record becomes a single line: the level, the message and the source location.
pub struct Logger;

impl Logger {
    /// The shim's numeric level of a record, from `0` (trace) to `4` (error).
    fn level(level: Level) -> u8 {
        match level {
            Level::Trace => 0,
            Level::Debug => 1,
            Level::Info => 2,
            Level::Warn => 3,
            Level::Error => 4,
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        Logger::level(metadata.level()) >= config::MIN_LOG_LEVEL
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // There is nowhere to report a failing log target to.
        let _ = shim_log::write(
            Logger::level(record.level()),
            record.level().as_str(),
            *record.args(),
            record.file().unwrap_or("?"),
            record.line().unwrap_or(0),
        );
    }

    fn flush(&self) {}
}

/// Install the logger, showing records up to `level`.
///
/// This fails if another logger was installed already.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_level() {
        assert!(Logger::level(Level::Error) > Logger::level(Level::Warn));
        assert!(Logger::level(Level::Debug) > Logger::level(Level::Trace));
        assert!(Logger.enabled(&Metadata::builder().level(Level::Error).build()));
    }
}
