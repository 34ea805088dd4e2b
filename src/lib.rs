// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Typed client facade for EVM JSON-RPC nodes.
//!
//! evmprobe wraps a node that holds unlocked accounts (anvil, geth `--dev`,
//! ganache) and offers:
//!
//! - [`BalanceReader`] - native balances for many addresses, failures isolated per address
//! - [`TransactionSubmitter`] - value transfers signed by the node, confirmed by receipt polling
//! - [`ContractDeployer`] / [`ContractCaller`] - deployment and ABI-encoded calls
//! - [`BlockMonitor`] - a bounded stream of new blocks
//! - [`NetworkStatsReader`] / [`NodeHealth`] - chain head, gas price, sync and peer state
//! - Unit conversions between wei, gwei and ether ([`from_base_units`], [`to_base_units`])
//!
//! Every component is generic over [`RpcTransport`]; [`EvmClient`] wires them
//! all to one [`AlloyTransport`] built from a [`ClientConfig`].
//!
//! # Example
//!
//! ```rust,ignore
//! use evmprobe::{parse_units, ClientConfigBuilder, Denomination, EvmClient};
//!
//! let config = ClientConfigBuilder::new()
//!     .rpc_url("http://localhost:8545")
//!     .account("account1", alice)
//!     .account("account2", bob)
//!     .build()?;
//! let client = EvmClient::connect(config)?;
//!
//! for row in client.get_account_balances().await {
//!     println!("{}: {:?}", row.name, row.lookup.display_in(Denomination::Ether));
//! }
//!
//! let one = parse_units("1", Denomination::Ether)?;
//! let receipt = client.send_value("account1", "account2", one).await?;
//! println!("included in block {}", receipt.block_number);
//! ```

pub mod accounts;
pub mod balances;
pub mod blocks;
mod client;
pub mod config;
pub mod contract;
pub mod errors;
pub mod provider;
pub mod rpc;
pub mod stats;
pub mod transaction;
pub mod transport;
pub mod types;

mod tracing;

pub use accounts::{Account, AccountRef, AccountRegistry};
pub use balances::{BalanceLookup, BalanceReader, NamedBalance};
pub use blocks::{BlockMonitor, BlockWatch, MonitorState};
pub use client::EvmClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use contract::{
    Constructor, ContractCaller, ContractDeployer, ContractInterface, FunctionDescriptor,
    Mutability,
};
pub use errors::{
    ConfigError, ContractError, DeploymentFailure, EvmProbeError, MonitorError, RpcError,
    StatsError, TransactionError, UnitError,
};
pub use provider::ProviderConfig;
pub use rpc::{AlloyTransport, RpcTransport};
pub use stats::{NetworkStats, NetworkStatsReader, NodeHealth, NodeStatus};
pub use transaction::{ConfirmationPolicy, TransactionSubmitter};
pub use types::block::{Block, BlockSelector, SyncState};
pub use types::transaction::{GasSettings, TransactionReceipt, TransactionRequest};
pub use types::units::{
    format_units, from_base_units, parse_units, to_base_units, to_f64_lossy, Denomination,
};
