// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The boundary between evmprobe components and the node
//!
//! Every component is generic over [`RpcTransport`], which exposes exactly the
//! JSON-RPC methods evmprobe needs in terms of the crate's own types. The
//! production implementation is [`AlloyTransport`], an adapter over any alloy
//! [`Provider`](alloy_provider::Provider); tests substitute in-memory mocks.
//!
//! # Example
//!
//! ```rust,ignore
//! use evmprobe::provider::{connect_http, ProviderConfig};
//! use evmprobe::RpcTransport;
//!
//! let transport = connect_http(&ProviderConfig::default())?;
//! if transport.is_connected().await {
//!     println!("chain id {}", transport.chain_id().await?);
//! }
//! ```

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;

use crate::errors::RpcError;
use crate::types::block::{Block, BlockSelector, SyncState};
use crate::types::transaction::{TransactionReceipt, TransactionRequest};

mod alloy;

pub use self::alloy::AlloyTransport;

/// JSON-RPC methods used by evmprobe
///
/// Implementations must be thread-safe. Each method issues a single request,
/// with no retries and no caching.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Returns true if the node answers at all
    ///
    /// The default implementation asks for the chain height and discards it.
    async fn is_connected(&self) -> bool {
        self.block_number().await.is_ok()
    }

    /// `eth_blockNumber`
    async fn block_number(&self) -> Result<u64, RpcError>;

    /// `eth_chainId`
    async fn chain_id(&self) -> Result<u64, RpcError>;

    /// `eth_gasPrice`, in wei
    async fn gas_price(&self) -> Result<U256, RpcError>;

    /// `eth_getBalance` at the latest block, in wei
    async fn get_balance(&self, address: Address) -> Result<U256, RpcError>;

    /// `eth_getBlockByNumber` without full transactions
    ///
    /// Returns [`RpcError::BlockNotFound`] if the node has no such block.
    async fn get_block(&self, block: BlockSelector) -> Result<Block, RpcError>;

    /// `eth_sendTransaction`: the node signs with the `from` account
    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, RpcError>;

    /// `eth_getTransactionReceipt`; `None` until the transaction is included
    async fn get_transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, RpcError>;

    /// `eth_call` at the latest block
    async fn call(&self, request: &TransactionRequest) -> Result<Bytes, RpcError>;

    /// `eth_getCode` at the latest block; empty for accounts without code
    async fn get_code(&self, address: Address) -> Result<Bytes, RpcError>;

    /// `eth_estimateGas`
    async fn estimate_gas(&self, request: &TransactionRequest) -> Result<u64, RpcError>;

    /// `eth_getTransactionCount` at the latest block
    async fn transaction_count(&self, address: Address) -> Result<u64, RpcError>;

    /// `net_version`
    async fn network_id(&self) -> Result<u64, RpcError>;

    /// `net_peerCount`
    async fn peer_count(&self) -> Result<u64, RpcError>;

    /// `eth_syncing`
    async fn syncing(&self) -> Result<SyncState, RpcError>;

    /// `web3_clientVersion`
    async fn client_version(&self) -> Result<String, RpcError>;
}

#[async_trait]
impl<T> RpcTransport for Arc<T>
where
    T: RpcTransport + ?Sized,
{
    async fn is_connected(&self) -> bool {
        (**self).is_connected().await
    }

    async fn block_number(&self) -> Result<u64, RpcError> {
        (**self).block_number().await
    }

    async fn chain_id(&self) -> Result<u64, RpcError> {
        (**self).chain_id().await
    }

    async fn gas_price(&self) -> Result<U256, RpcError> {
        (**self).gas_price().await
    }

    async fn get_balance(&self, address: Address) -> Result<U256, RpcError> {
        (**self).get_balance(address).await
    }

    async fn get_block(&self, block: BlockSelector) -> Result<Block, RpcError> {
        (**self).get_block(block).await
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, RpcError> {
        (**self).send_transaction(request).await
    }

    async fn get_transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, RpcError> {
        (**self).get_transaction_receipt(hash).await
    }

    async fn call(&self, request: &TransactionRequest) -> Result<Bytes, RpcError> {
        (**self).call(request).await
    }

    async fn get_code(&self, address: Address) -> Result<Bytes, RpcError> {
        (**self).get_code(address).await
    }

    async fn estimate_gas(&self, request: &TransactionRequest) -> Result<u64, RpcError> {
        (**self).estimate_gas(request).await
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, RpcError> {
        (**self).transaction_count(address).await
    }

    async fn network_id(&self) -> Result<u64, RpcError> {
        (**self).network_id().await
    }

    async fn peer_count(&self) -> Result<u64, RpcError> {
        (**self).peer_count().await
    }

    async fn syncing(&self) -> Result<SyncState, RpcError> {
        (**self).syncing().await
    }

    async fn client_version(&self) -> Result<String, RpcError> {
        (**self).client_version().await
    }
}
