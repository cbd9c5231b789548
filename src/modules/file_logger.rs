// file_logger.rs - Logging for CGI scripts
// stdout belongs to the response, so log lines go to stderr (which the host
// server routes to its error log) and optionally to an append-only file

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use super::enhanced_error::{file_operation_error, operation_error, EnhancedError};

/// Logger writing to stderr and an optional file
pub struct CgiLogger {
    file: Mutex<Option<File>>,
    level: RwLock<log::LevelFilter>,
    use_stderr: bool,
}

impl CgiLogger {
    fn new(use_stderr: bool) -> Self {
        Self {
            file: Mutex::new(None),
            level: RwLock::new(log::LevelFilter::Info),
            use_stderr,
        }
    }

    /// Open `log_path` for appending, creating parent directories
    fn attach_file(&self, log_path: &Path) -> Result<(), EnhancedError> {
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| file_operation_error("create_log_dir", parent, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .map_err(|e| file_operation_error("open_log_file", log_path, e))?;

        if let Ok(mut slot) = self.file.lock() {
            *slot = Some(file);
        }
        Ok(())
    }

    /// Format one log line
    fn format_line(level: log::Level, target: &str, message: &str) -> String {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        format!("[{}] {} {}: {}\n", timestamp, level, target, message)
    }
}

impl log::Log for CgiLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.level
            .read()
            .map(|level| metadata.level() <= *level)
            .unwrap_or(false)
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = Self::format_line(record.level(), record.target(), &record.args().to_string());

        if self.use_stderr {
            let _ = io::stderr().write_all(line.as_bytes());
        }
        if let Ok(mut slot) = self.file.lock() {
            if let Some(file) = slot.as_mut() {
                if let Err(e) = file.write_all(line.as_bytes()) {
                    eprintln!("Failed to write to log file: {}", e);
                }
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut slot) = self.file.lock() {
            if let Some(file) = slot.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

// Global logger instance
lazy_static::lazy_static! {
    static ref LOGGER: CgiLogger = CgiLogger::new(true);
}

/// Install the global logger. `verbose` enables debug records.
///
/// stderr logging is active even when the log file cannot be opened; that
/// failure is still returned to the caller.
pub fn init_logger(verbose: bool, log_path: Option<&Path>) -> Result<(), EnhancedError> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    if let Ok(mut slot) = LOGGER.level.write() {
        *slot = level;
    }

    log::set_logger(&*LOGGER)
        .map_err(|e| operation_error("init_logger", e.to_string().into()))?;
    log::set_max_level(level);

    if let Some(path) = log_path {
        LOGGER.attach_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use std::fs;

    #[test]
    fn test_format_line() {
        let line = CgiLogger::format_line(log::Level::Warn, "cgi_echo::runner", "body truncated");
        assert!(line.starts_with('['));
        assert!(line.ends_with("] WARN cgi_echo::runner: body truncated\n"));
    }

    #[test]
    fn test_file_logging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cgi.log");

        let logger = CgiLogger::new(false);
        logger.attach_file(&path).unwrap();
        logger.log(
            &log::Record::builder()
                .level(log::Level::Error)
                .target("test")
                .args(format_args!("stdout closed"))
                .build(),
        );
        logger.flush();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("ERROR test: stdout closed"));
    }

    #[test]
    fn test_unwritable_log_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"not a directory").unwrap();

        let logger = CgiLogger::new(false);
        let err = logger.attach_file(&blocker.join("cgi.log")).unwrap_err();
        assert_eq!(err.operation, "create_log_dir");
    }

    // The only test that installs the global logger
    #[test]
    fn test_bad_log_path_keeps_stderr_logging() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = init_logger(false, Some(&blocker.join("cgi.log"))).unwrap_err();
        assert_eq!(err.operation, "create_log_dir");
        assert!(log::max_level() >= log::LevelFilter::Warn);
        assert!(log::logger().enabled(
            &log::Metadata::builder().level(log::Level::Warn).target("cgi_echo").build()
        ));
    }
}
