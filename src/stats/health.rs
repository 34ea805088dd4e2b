// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use tracing::{info, warn, Instrument};

use crate::errors::RpcError;
use crate::rpc::RpcTransport;
use crate::tracing::spans;
use crate::types::block::SyncState;

/// What the node reports about itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
    /// `eth_chainId`
    pub chain_id: u64,
    /// `net_version`
    pub network_id: u64,
    /// `eth_blockNumber`
    pub latest_block: u64,
    /// `eth_syncing`
    pub sync: SyncState,
    /// `net_peerCount`
    pub peer_count: u64,
    /// `web3_clientVersion`
    pub client_version: String,
}

impl NodeStatus {
    /// Synced and either peered or a standalone development chain.
    ///
    /// Dev nodes such as anvil or ganache report zero peers and are still
    /// usable.
    pub fn is_healthy(&self) -> bool {
        self.sync.is_synced() && (self.peer_count > 0 || is_dev_chain(self.chain_id))
    }
}

// anvil/hardhat and ganache defaults
fn is_dev_chain(chain_id: u64) -> bool {
    matches!(chain_id, 31337 | 1337)
}

/// Connection and sync checks against a node
#[derive(Debug, Clone)]
pub struct NodeHealth<T> {
    transport: T,
}

impl<T: RpcTransport> NodeHealth<T> {
    /// Create a probe over `transport`
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns true if the node answers
    pub async fn is_connected(&self) -> bool {
        self.transport.is_connected().await
    }

    /// Ask the node for its identity, height, sync state and peers.
    ///
    /// # Errors
    ///
    /// The first failing request's [`RpcError`];
    /// [`RpcError::Unreachable`] when there is no node at the endpoint.
    pub async fn check(&self) -> Result<NodeStatus, RpcError> {
        async move {
            let status = NodeStatus {
                chain_id: self.transport.chain_id().await?,
                network_id: self.transport.network_id().await?,
                latest_block: self.transport.block_number().await?,
                sync: self.transport.syncing().await?,
                peer_count: self.transport.peer_count().await?,
                client_version: self.transport.client_version().await?,
            };

            if status.is_healthy() {
                info!(
                    chain_id = status.chain_id,
                    latest_block = status.latest_block,
                    client = %status.client_version,
                    "node healthy"
                );
            } else {
                warn!(
                    blocks_behind = status.sync.blocks_behind(),
                    peer_count = status.peer_count,
                    "node not fully healthy"
                );
            }
            Ok(status)
        }
        .instrument(spans::health_check())
        .await
    }
}
