// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block snapshots and block selectors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which block to ask the node for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockSelector {
    /// A specific block height
    Number(u64),
    /// The most recent block known to the node
    Latest,
}

impl std::fmt::Display for BlockSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Latest => write!(f, "latest"),
        }
    }
}

impl From<u64> for BlockSelector {
    fn from(number: u64) -> Self {
        Self::Number(number)
    }
}

/// Point-in-time snapshot of a block header plus its transaction count.
///
/// Blocks are never cached; every read goes to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block height
    pub number: u64,
    /// Unix timestamp in seconds
    pub timestamp: u64,
    /// Number of transactions included in the block
    pub transaction_count: usize,
    /// Gas consumed by all transactions in the block
    pub gas_used: u64,
    /// Gas ceiling of the block
    pub gas_limit: u64,
}

impl Block {
    /// Block timestamp as a UTC datetime, if it is representable.
    ///
    /// # Examples
    ///
    /// ```
    /// use evmprobe::Block;
    ///
    /// let block = Block { number: 1, timestamp: 1_690_608_055, transaction_count: 0, gas_used: 0, gas_limit: 30_000_000 };
    /// assert_eq!(block.timestamp_utc().unwrap().to_rfc3339(), "2023-07-29T05:20:55+00:00");
    /// ```
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Fraction of the gas limit used, in `[0.0, 1.0]`.
    ///
    /// Returns f64 for display purposes.
    pub fn gas_utilization(&self) -> f64 {
        if self.gas_limit == 0 {
            return 0.0;
        }
        self.gas_used as f64 / self.gas_limit as f64
    }
}

/// Result of `eth_syncing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// The node considers itself caught up with the network
    Synced,
    /// The node is still importing blocks
    Syncing {
        /// Height the sync started from
        starting_block: u64,
        /// Height imported so far
        current_block: u64,
        /// Highest height seen on the network
        highest_block: u64,
    },
}

impl SyncState {
    /// Returns true if the node is caught up
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }

    /// Blocks still to import, zero once synced
    pub fn blocks_behind(&self) -> u64 {
        match self {
            Self::Synced => 0,
            Self::Syncing {
                current_block,
                highest_block,
                ..
            } => highest_block.saturating_sub(*current_block),
        }
    }
}
