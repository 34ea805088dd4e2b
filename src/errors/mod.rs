//! Error types for the evmprobe library.
//!
//! This module provides strongly-typed errors for all public APIs in evmprobe.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling (`TransactionError`,
//!   `ContractError`, etc.)
//! - **Unified error type** (`EvmProbeError`) for convenience when you don't need
//!   to distinguish between error sources
//!
//! # Architecture
//!
//! Each component has its own error type:
//! - [`UnitError`] - Denomination conversions
//! - [`TransactionError`] - Value transfers and receipt confirmation
//! - [`ContractError`] - Contract deployment and calls (wraps [`TransactionError`])
//! - [`MonitorError`] - Block polling
//! - [`StatsError`] - Network statistics
//! - [`ConfigError`] - Loading client configuration
//!
//! Additionally, [`RpcError`] provides shared error variants for transport operations.
//! Per-address balance failures are not errors of the whole call; they are
//! reported inside [`BalanceLookup`](crate::BalanceLookup).
//!
//! # Examples
//!
//! ## Fine-grained error handling
//!
//! ```rust,ignore
//! use evmprobe::{ContractError, DeploymentFailure};
//!
//! match deployer.deploy(bytecode, &interface, "deployer".into(), gas).await {
//!     Ok(address) => println!("deployed at {address}"),
//!     Err(ContractError::DeploymentFailed(DeploymentFailure::Reverted { tx_hash })) => {
//!         eprintln!("constructor reverted in {tx_hash}");
//!     }
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! ```
//!
//! ## Using the unified error type
//!
//! ```rust,ignore
//! use evmprobe::{EvmClient, EvmProbeError};
//!
//! async fn example(client: &EvmClient<impl RpcTransport + Clone>) -> Result<(), EvmProbeError> {
//!     let stats = client.stats().get_stats().await?;
//!     let receipt = client.transactions().send_value("alice".into(), "bob".into(), amount, gas).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod contract;
mod monitor;
mod rpc;
mod stats;
mod transaction;
mod units;

pub use config::ConfigError;
pub use contract::{ContractError, DeploymentFailure};
pub use monitor::MonitorError;
pub use rpc::RpcError;
pub use stats::StatsError;
pub use transaction::TransactionError;
pub use units::UnitError;

/// Unified error type for all evmprobe operations.
///
/// All module-specific error types automatically convert to `EvmProbeError` via
/// `From` implementations, so you can use `?` to propagate errors naturally.
#[derive(Debug, thiserror::Error)]
pub enum EvmProbeError {
    /// Error from the transport layer (including an unreachable node).
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Error from denomination conversions.
    #[error("Unit conversion error: {0}")]
    Units(#[from] UnitError),

    /// Error from value transfers.
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    /// Error from contract deployment or calls.
    #[error("Contract error: {0}")]
    Contract(#[from] ContractError),

    /// Error from block monitoring.
    #[error("Block monitor error: {0}")]
    Monitor(#[from] MonitorError),

    /// Error from network statistics.
    #[error("Network stats error: {0}")]
    Stats(#[from] StatsError),

    /// Error from loading configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
