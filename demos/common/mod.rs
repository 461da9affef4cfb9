//! Stderr logger shared by the demos.
//!
//! The level is read from `AVL_DICTIONARY_LOG` (`error`, `warn`, `info`, `debug`, `trace`
//! or `off`) and defaults to `warn`.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct DemoLogger {
    level: LevelFilter,
}

impl Log for DemoLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Blue for warnings, green for informational messages
        let label = match record.level() {
            Level::Error => "\x1b[91mError:\x1b[0m",
            Level::Warn => "\x1b[94mWarning:\x1b[0m",
            Level::Info => "\x1b[92mInfo:\x1b[0m",
            Level::Debug => "Debug:",
            Level::Trace => "Trace:",
        };
        eprintln!("{} {}", label, record.args());
    }

    fn flush(&self) {}
}

pub fn level_from_env() -> LevelFilter {
    std::env::var("AVL_DICTIONARY_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

pub fn init_logging() -> Result<(), log::SetLoggerError> {
    let level = level_from_env();
    log::set_boxed_logger(Box::new(DemoLogger { level }))?;
    log::set_max_level(level);
    Ok(())
}
