//! Error types for coverage parsing and evaluation

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("Coverage file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read coverage file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A `LF:`/`LH:` payload that is not a non-negative integer
    #[error("Invalid {directive} value '{value}' on line {line}")]
    Parse {
        line: usize,
        directive: String,
        value: String,
    },

    /// Running totals no longer fit in a `u64`
    #[error("Coverage totals overflow at end_of_record on line {line}")]
    TotalOverflow { line: usize },

    #[error("No lines found in coverage report.")]
    EmptyReport,
}

impl CoverageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kind_maps_to_not_found() {
        let err = CoverageError::io("coverage/lcov.info", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, CoverageError::NotFound(_)));
        assert_eq!(err.to_string(), "Coverage file not found: coverage/lcov.info");
    }

    #[test]
    fn test_other_io_kind_keeps_source() {
        let err = CoverageError::io(
            "lcov.info",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        match err {
            CoverageError::Io { ref source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied)
            }
            _ => panic!("expected Io variant"),
        }
        assert_eq!(err.to_string(), "Failed to read coverage file lcov.info");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("denied"));
    }

    #[test]
    fn test_parse_error_message() {
        let err = CoverageError::Parse {
            line: 3,
            directive: "LF".to_string(),
            value: "ten".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid LF value 'ten' on line 3");
    }

    #[test]
    fn test_total_overflow_message() {
        let err = CoverageError::TotalOverflow { line: 8 };
        assert_eq!(
            err.to_string(),
            "Coverage totals overflow at end_of_record on line 8"
        );
    }
}
