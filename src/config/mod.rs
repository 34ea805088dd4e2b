// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for evmprobe clients
//!
//! A [`ClientConfig`] bundles everything the client facade needs: where the
//! node lives, which accounts it may send from, default gas settings and how
//! long to wait for receipts.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use evmprobe::ClientConfig;
//!
//! // Local node at http://localhost:8545, 20 gwei, 21 000 gas
//! let config = ClientConfig::default();
//! assert!(config.accounts.is_empty());
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use alloy_primitives::{address, U256};
//! use evmprobe::ClientConfigBuilder;
//! use std::time::Duration;
//!
//! let config = ClientConfigBuilder::new()
//!     .rpc_url("http://127.0.0.1:8545")
//!     .account("account1", address!("742d35Cc6634C0532925a3b844Bc454e4438f44e"))
//!     .default_gas_price(U256::from(30_000_000_000u64))
//!     .confirmation_timeout(Duration::from_secs(60))
//!     .build()
//!     .unwrap();
//! assert_eq!(config.accounts.len(), 1);
//! ```
//!
//! # Example: JSON
//!
//! ```rust
//! use evmprobe::ClientConfig;
//!
//! let config = ClientConfig::from_json_str(r#"{
//!     "rpc_url": "http://localhost:8545",
//!     "accounts": { "account1": "0x742d35Cc6634C0532925a3b844Bc454e4438f44e" },
//!     "default_gas_price_gwei": "20"
//! }"#).unwrap();
//! assert_eq!(config.accounts.get("account1").is_some(), true);
//! ```

use std::path::Path;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use serde::Deserialize;

use crate::accounts::AccountRegistry;
use crate::errors::ConfigError;
use crate::provider::ProviderConfig;
use crate::transaction::ConfirmationPolicy;
use crate::types::transaction::GasSettings;
use crate::types::units::{parse_units, Denomination};

pub mod constants;

use constants::{DEFAULT_GAS_PRICE_WEI, TRANSFER_GAS_LIMIT};

/// Configuration for an [`EvmClient`](crate::EvmClient)
///
/// Use [`ClientConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint and transport options
    pub provider: ProviderConfig,

    /// Accounts the node holds keys for
    pub accounts: AccountRegistry,

    /// Gas price used when the caller does not pick one
    /// Default: 20 gwei
    pub default_gas_price: U256,

    /// Gas limit used for value transfers when the caller does not pick one
    /// Default: 21 000
    pub default_gas_limit: u64,

    /// Receipt polling cadence and deadline
    pub confirmation: ConfirmationPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            accounts: AccountRegistry::empty(),
            default_gas_price: DEFAULT_GAS_PRICE_WEI,
            default_gas_limit: TRANSFER_GAS_LIMIT,
            confirmation: ConfirmationPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Default gas settings for value transfers
    pub fn default_gas(&self) -> GasSettings {
        GasSettings::new(self.default_gas_limit, self.default_gas_price)
    }

    /// Gas settings at the default price with a different limit
    pub fn gas_with_limit(&self, gas_limit: u64) -> GasSettings {
        self.default_gas().with_gas_limit(gas_limit)
    }

    /// Parse configuration from a JSON document.
    ///
    /// Every field is optional; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or bad addresses and
    /// [`ConfigError::InvalidValue`] for values that parse but make no sense.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(json)?;
        file.into_config()
    }

    /// Read configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`ClientConfig::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io(path.display().to_string(), e))?;
        Self::from_json_str(&json)
    }
}

/// Builder for [`ClientConfig`] with a fluent API
///
/// # Example
///
/// ```rust
/// use evmprobe::ClientConfigBuilder;
/// use std::time::Duration;
///
/// let config = ClientConfigBuilder::new()
///     .receipt_poll_interval(Duration::from_millis(500))
///     .build()
///     .unwrap();
/// assert_eq!(config.confirmation.poll_interval, Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
    accounts: Vec<(String, Address)>,
}

impl ClientConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the RPC endpoint URL
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.config.provider.url = url.into();
        self
    }

    /// Replace the provider configuration
    pub fn provider(mut self, provider: ProviderConfig) -> Self {
        self.config.provider = provider;
        self
    }

    /// Register an account under `name`
    pub fn account(mut self, name: impl Into<String>, address: Address) -> Self {
        self.accounts.push((name.into(), address));
        self
    }

    /// Set the default gas price, in wei
    pub fn default_gas_price(mut self, gas_price: U256) -> Self {
        self.config.default_gas_price = gas_price;
        self
    }

    /// Set the default gas limit for value transfers
    pub fn default_gas_limit(mut self, gas_limit: u64) -> Self {
        self.config.default_gas_limit = gas_limit;
        self
    }

    /// Set the spacing between receipt lookups
    pub fn receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.config.confirmation.poll_interval = interval;
        self
    }

    /// Set how long to wait for a receipt
    pub fn confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.config.confirmation.timeout = timeout;
        self
    }

    /// Build the final configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateAccount`] if an account name was
    /// registered twice and [`ConfigError::InvalidValue`] for a zero gas limit
    /// or a zero receipt poll interval.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let mut config = self.config;
        if !self.accounts.is_empty() {
            let mut entries: Vec<(String, Address)> =
                config.accounts.iter().map(|a| (a.name.clone(), a.address)).collect();
            entries.extend(self.accounts);
            config.accounts = AccountRegistry::new(entries)?;
        }
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.default_gas_limit == 0 {
        return Err(ConfigError::invalid_value(
            "default_gas_limit",
            "must be greater than zero",
        ));
    }
    if config.confirmation.poll_interval.is_zero() {
        return Err(ConfigError::invalid_value(
            "receipt_poll_interval",
            "must be greater than zero",
        ));
    }
    Ok(())
}

/// On-disk shape of [`ClientConfig`]
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    rpc_url: Option<String>,
    request_timeout_secs: Option<u64>,
    log_requests: Option<bool>,
    accounts: AccountRegistry,
    default_gas_price_gwei: Option<String>,
    default_gas_limit: Option<u64>,
    receipt_poll_interval_ms: Option<u64>,
    confirmation_timeout_secs: Option<u64>,
}

impl ConfigFile {
    fn into_config(self) -> Result<ClientConfig, ConfigError> {
        let mut builder = ClientConfigBuilder::new();
        builder.config.accounts = self.accounts;

        if let Some(url) = self.rpc_url {
            builder = builder.rpc_url(url);
        }
        if let Some(secs) = self.request_timeout_secs {
            builder.config.provider.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(enabled) = self.log_requests {
            builder.config.provider.logging_enabled = enabled;
        }
        if let Some(gwei) = self.default_gas_price_gwei {
            let price = parse_units(&gwei, Denomination::Gwei)
                .map_err(|e| ConfigError::invalid_value("default_gas_price_gwei", e.to_string()))?;
            builder = builder.default_gas_price(price);
        }
        if let Some(limit) = self.default_gas_limit {
            builder = builder.default_gas_limit(limit);
        }
        if let Some(ms) = self.receipt_poll_interval_ms {
            builder = builder.receipt_poll_interval(Duration::from_millis(ms));
        }
        if let Some(secs) = self.confirmation_timeout_secs {
            builder = builder.confirmation_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }
}
