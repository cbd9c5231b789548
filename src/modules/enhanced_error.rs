//! Enhanced error reporting module
//! Provides detailed error information for stream, file and protocol operations

use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

/// Enhanced error type that provides context about what operation failed
#[derive(Debug)]
pub struct EnhancedError {
    pub operation: String,
    pub target: Option<String>,
    pub original_error: Box<dyn Error + Send + Sync>,
}

impl fmt::Display for EnhancedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref target) = self.target {
            write!(f, "{} failed for '{}': {}", self.operation, target, self.original_error)
        } else {
            write!(f, "{} failed: {}", self.operation, self.original_error)
        }
    }
}

impl Error for EnhancedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.original_error.as_ref())
    }
}

/// Helper function to create enhanced error for file operations
pub fn file_operation_error<P: AsRef<Path>>(
    operation: &str,
    path: P,
    error: io::Error,
) -> EnhancedError {
    EnhancedError {
        operation: operation.to_string(),
        target: Some(path.as_ref().to_string_lossy().to_string()),
        original_error: Box::new(error),
    }
}

/// Helper function to create enhanced error for stdin/stdout operations
pub fn stream_operation_error(operation: &str, stream: &str, error: io::Error) -> EnhancedError {
    EnhancedError {
        operation: operation.to_string(),
        target: Some(stream.to_string()),
        original_error: Box::new(error),
    }
}

/// Helper function to create enhanced error for general operations
pub fn operation_error(
    operation: &str,
    error: Box<dyn Error + Send + Sync>,
) -> EnhancedError {
    EnhancedError {
        operation: operation.to_string(),
        target: None,
        original_error: error,
    }
}

/// Macro to wrap a stdout write with enhanced error reporting
#[macro_export]
macro_rules! enhanced_stream_result {
    ($operation:expr, $result:expr) => {
        $result.map_err(|e| $crate::modules::enhanced_error::stream_operation_error($operation, "stdout", e))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_target() {
        let err = stream_operation_error(
            "read_body",
            "stdin",
            io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
        );
        assert_eq!(err.to_string(), "read_body failed for 'stdin': pipe closed");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display_without_target() {
        let err = operation_error("emit_header", "header already written".into());
        assert_eq!(err.to_string(), "emit_header failed: header already written");
    }

    #[test]
    fn test_file_error_names_path() {
        let err = file_operation_error(
            "open_log_file",
            "/nonexistent/cgi.log",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("/nonexistent/cgi.log"));
    }
}
