//! Error types for the rl-core crate.
//!
//! This module provides [`CoreError`] for malformed domain inputs (catalogs
//! that violate their invariants) and [`ConfigError`] for configuration
//! loading and validation.

use camino::Utf8PathBuf;

/// Errors raised when a domain value fails validation.
///
/// # Examples
///
/// ```
/// use rl_core::CoreError;
///
/// let error = CoreError::invalid_input("duplicate uri 'src/a.js'");
/// assert!(error.to_string().contains("src/a.js"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An argument did not have the expected shape.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Explanation of what was wrong with the input.
        reason: String,
    },
}

impl CoreError {
    /// Creates a new [`CoreError::InvalidInput`] error.
    #[inline]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use rl_core::ConfigError;
///
/// let error = ConfigError::InvalidOption {
///     option: "rewrite.import_pattern".to_owned(),
///     reason: "must not be empty".to_owned(),
/// };
/// assert!(error.to_string().contains("import_pattern"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// The configuration file path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let error = CoreError::invalid_input("duplicate uri 'src/a.js'");
        assert_eq!(error.to_string(), "invalid input: duplicate uri 'src/a.js'");
    }

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("scan.text_extensions", "must not be empty");
        let msg = error.to_string();
        assert!(msg.contains("scan.text_extensions"));
        assert!(msg.contains("must not be empty"));
    }

    #[test]
    fn test_io_display_includes_path() {
        let error = ConfigError::Io {
            path: Utf8PathBuf::from("/etc/relink.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(error.to_string().contains("/etc/relink.json"));
    }
}
