//! `log` backend writing to the debugger console over semihosting.
//!
//! Records never go to the serial transport. Without the `semihosting` feature they
//! are dropped, as a semihosting call halts a core that has no debugger attached.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

struct SemihostingLogger;

static G_LOGGER: SemihostingLogger = SemihostingLogger;

impl Log for SemihostingLogger {
    fn enabled(&self, p_metadata: &Metadata) -> bool {
        cfg!(feature = "semihosting") && p_metadata.level() <= log::max_level()
    }

    fn log(&self, p_record: &Record) {
        if !self.enabled(p_record.metadata()) {
            return;
        }

        #[cfg(feature = "semihosting")]
        cortex_m_semihosting::hprintln!("[{}] {}", p_record.level(), p_record.args());
    }

    fn flush(&self) {}
}

/// Installs the semihosting logger.
///
/// # Parameters
/// - `p_level`: level in force until the kernel applies its own configuration.
///
/// # Errors
/// Returns [`SetLoggerError`] if a logger is already installed.
pub fn init(p_level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&G_LOGGER)?;
    log::set_max_level(p_level);
    Ok(())
}
