//! Error types for the CLI

use pocketcalc::storage::StorageError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// State file error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Calculator state could not be written back
    #[error("State not saved: {message}")]
    NotSaved {
        /// Error message
        message: String,
    },

    /// Terminal setup or drawing failed
    #[error("Terminal error: {message}")]
    Terminal {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not-saved error
    #[must_use]
    pub fn not_saved(message: impl Into<String>) -> Self {
        Self::NotSaved {
            message: message.into(),
        }
    }

    /// Create a terminal error
    #[must_use]
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("missing skin");
        assert_eq!(err.to_string(), "Configuration error: missing skin");
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("unknown key 'q'");
        assert!(err.to_string().contains("unknown key 'q'"));
    }

    #[test]
    fn test_terminal_error() {
        let err = CliError::terminal("not a tty");
        assert_eq!(err.to_string(), "Terminal error: not a tty");
    }

    #[test]
    fn test_not_saved_error() {
        let err = CliError::not_saved("calc.json: disk full");
        assert_eq!(err.to_string(), "State not saved: calc.json: disk full");
    }

    #[test]
    fn test_from_io() {
        let err: CliError = std::io::Error::other("disk gone").into();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_from_storage() {
        let err: CliError = StorageError::BridgeClosed.into();
        assert_eq!(err.to_string(), "Storage error: storage bridge closed");
    }
}
