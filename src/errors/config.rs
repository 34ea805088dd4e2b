//! Error types for loading client configuration.

/// Errors that can occur while reading a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}")]
    Io {
        /// Path to the configuration file
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid JSON for this schema.
    #[error("Failed to parse configuration")]
    Parse(#[from] serde_json::Error),

    /// The same account name appears twice in the registry.
    #[error("Duplicate account name: {name}")]
    DuplicateAccount {
        /// The repeated name
        name: String,
    },

    /// A configured value is out of range.
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
        /// Description of the problem
        reason: String,
    },
}

impl ConfigError {
    /// Create an `Io` error for a path.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an `InvalidValue` error.
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
