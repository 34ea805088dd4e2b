// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Network statistics and node health.
//!
//! [`NetworkStatsReader`] takes a snapshot of the chain head, the gas price
//! and the chain id. [`NodeHealth`] reports whether the node is reachable,
//! synced and peered.
//!
//! # Example
//!
//! ```rust,ignore
//! use evmprobe::{format_units, Denomination, NetworkStatsReader};
//!
//! let stats = NetworkStatsReader::new(transport).get_stats().await?;
//! println!(
//!     "block {} on chain {} at {} gwei",
//!     stats.latest_block.number,
//!     stats.chain_id,
//!     format_units(stats.gas_price, Denomination::Gwei),
//! );
//! ```

mod health;

pub use health::{NodeHealth, NodeStatus};

use alloy_chains::NamedChain;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use tracing::{debug, Instrument};

use crate::errors::StatsError;
use crate::rpc::RpcTransport;
use crate::tracing::spans;
use crate::types::block::{Block, BlockSelector};

/// Snapshot of the chain as seen by the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStats {
    /// The latest block
    pub latest_block: Block,
    /// Current gas price in wei
    pub gas_price: U256,
    /// EIP-155 chain id
    pub chain_id: u64,
}

impl NetworkStats {
    /// Well-known chain for `chain_id`, if there is one
    pub fn chain(&self) -> Option<NamedChain> {
        NamedChain::try_from(self.chain_id).ok()
    }
}

/// Reads [`NetworkStats`] through an [`RpcTransport`]
#[derive(Debug, Clone)]
pub struct NetworkStatsReader<T> {
    transport: T,
}

impl<T: RpcTransport> NetworkStatsReader<T> {
    /// Create a reader over `transport`
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Query the latest block, gas price and chain id.
    ///
    /// Every call issues three fresh requests. Nothing is cached or retried.
    ///
    /// # Errors
    ///
    /// [`StatsError::Unavailable`] naming the first query that failed.
    pub async fn get_stats(&self) -> Result<NetworkStats, StatsError> {
        async move {
            let latest_block = self
                .transport
                .get_block(BlockSelector::Latest)
                .await
                .map_err(|e| StatsError::unavailable("latest_block", e))?;
            let gas_price = self
                .transport
                .gas_price()
                .await
                .map_err(|e| StatsError::unavailable("gas_price", e))?;
            let chain_id = self
                .transport
                .chain_id()
                .await
                .map_err(|e| StatsError::unavailable("chain_id", e))?;

            debug!(
                block_number = latest_block.number,
                %gas_price,
                chain_id,
                "network stats read"
            );
            Ok(NetworkStats {
                latest_block,
                gas_price,
                chain_id,
            })
        }
        .instrument(spans::get_stats())
        .await
    }
}
