//! Custom logging module.
//!
//! This module provides a logger implementation that formats log entries and
//! forwards them to a caller-installed sink.

use crate::error::AppError;
use log::{LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

type Sink = Box<dyn Fn(String) + Send + Sync>;

/// Format a record as `time LEVEL module: message`, with the module path
/// relative to this crate.
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%H:%M:%S%.3f");
    let target = record.target();
    let module = target
        .strip_prefix(concat!(env!("CARGO_CRATE_NAME"), "::"))
        .unwrap_or(target);
    format!(
        "{} {:<5} {}: {}",
        timestamp,
        record.level(),
        module,
        record.args()
    )
}

/// Logger that forwards formatted records to a sink
///
pub struct CustomLogger {
    level: LevelFilter,
    log_callback: Arc<Mutex<Option<Sink>>>,
}

impl CustomLogger {
    pub fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_log_callback(&self, callback: Sink) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(callback) = self.log_callback.lock() {
                if let Some(ref cb) = *callback {
                    cb(format_log(record));
                }
            }
        }
    }

    fn flush(&self) {}
}

/// Install a `CustomLogger` as the global logger.
///
pub fn init(level: LevelFilter, sink: Sink) -> Result<(), AppError> {
    let logger = CustomLogger::new(level);
    logger.set_log_callback(sink);
    log::set_boxed_logger(Box::new(logger)).map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    fn captured(logger: &CustomLogger) -> Arc<Mutex<Vec<String>>> {
        let lines = Arc::new(Mutex::new(vec![]));
        let sink = Arc::clone(&lines);
        logger.set_log_callback(Box::new(move |line: String| sink.lock().unwrap().push(line)));
        lines
    }

    #[test]
    fn format_strips_crate_from_module() {
        let line = format_log(
            &Record::builder()
                .args(format_args!("Chat disconnected."))
                .level(Level::Info)
                .target("netbank::events::inbound")
                .build(),
        );
        assert!(line.ends_with("INFO  events::inbound: Chat disconnected."));
    }

    #[test]
    fn format_keeps_foreign_targets() {
        let line = format_log(
            &Record::builder()
                .args(format_args!("replaying 3 events"))
                .level(Level::Warn)
                .target("netbank_replay")
                .build(),
        );
        assert!(line.ends_with("WARN  netbank_replay: replaying 3 events"));
    }

    #[test]
    fn forwards_enabled_records() {
        let logger = CustomLogger::new(LevelFilter::Info);
        let lines = captured(&logger);
        logger.log(
            &Record::builder()
                .args(format_args!("kept"))
                .level(Level::Info)
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("dropped"))
                .level(Level::Debug)
                .build(),
        );
        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(": kept"));
    }

    #[test]
    fn init_installs_once() {
        assert!(init(LevelFilter::Warn, Box::new(|_line: String| {})).is_ok());
        assert_eq!(log::max_level(), LevelFilter::Warn);
        let again = init(LevelFilter::Debug, Box::new(|_line: String| {}));
        assert!(matches!(again, Err(AppError::Logger(_))));
    }

    #[test]
    fn without_callback_nothing_happens() {
        let logger = CustomLogger::new(LevelFilter::Trace);
        logger.log(
            &Record::builder()
                .args(format_args!("nowhere"))
                .level(Level::Error)
                .build(),
        );
        logger.flush();
    }
}
