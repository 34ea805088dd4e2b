// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration options

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::constants::DEFAULT_RPC_URL;

/// Configuration for creating providers
///
/// # Example
///
/// ```rust
/// use evmprobe::ProviderConfig;
/// use std::time::Duration;
///
/// let config = ProviderConfig::new("http://127.0.0.1:8545")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.timeout, Some(Duration::from_secs(10)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// RPC endpoint URL
    pub url: String,
    /// Per-request timeout; `None` waits as long as the HTTP client does
    pub timeout: Option<Duration>,
    /// Install the tower [`LoggingLayer`](crate::transport::LoggingLayer)
    pub logging_enabled: bool,
    /// Log full request and response payloads at TRACE level
    pub verbose_logging: bool,
}

impl ProviderConfig {
    /// Create a new provider configuration with the specified URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
            logging_enabled: true,
            verbose_logging: false,
        }
    }

    /// Set request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable the RPC logging layer
    #[must_use]
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// Log request and response payloads (implies logging)
    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.logging_enabled = true;
        self.verbose_logging = true;
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::local_node(DEFAULT_RPC_URL)
    }
}

/// Preset configurations for common endpoints
impl ProviderConfig {
    /// Configuration preset for a development node (generous timeout)
    #[must_use]
    pub fn local_node(url: impl Into<String>) -> Self {
        Self::new(url).with_timeout(Duration::from_secs(120))
    }

    /// Configuration preset for public endpoints
    #[must_use]
    pub fn public_endpoint(url: impl Into<String>) -> Self {
        Self::new(url).with_timeout(Duration::from_secs(30))
    }
}
