// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! [`RpcTransport`] over an alloy [`Provider`]

use std::future::IntoFuture;
use std::time::Duration;

use alloy_json_rpc::RpcError as AlloyRpcError;
use alloy_network::{Ethereum, TransactionBuilder};
use alloy_primitives::{Address, Bytes, TxHash, U256, U64};
use alloy_provider::Provider;
use alloy_rpc_types::{BlockNumberOrTag, SyncStatus};
use alloy_transport::{TransportError, TransportResult};
use async_trait::async_trait;
use tracing::debug;

use crate::errors::RpcError;
use crate::types::block::{Block, BlockSelector, SyncState};
use crate::types::transaction::{TransactionReceipt, TransactionRequest};

use super::RpcTransport;

/// Adapts an alloy [`Provider`] for the Ethereum network to [`RpcTransport`]
///
/// # Example
///
/// ```rust,ignore
/// use alloy_provider::ProviderBuilder;
/// use evmprobe::{AlloyTransport, RpcTransport};
///
/// let provider = ProviderBuilder::new().connect_http("http://localhost:8545".parse()?);
/// let transport = AlloyTransport::new(provider);
/// let height = transport.block_number().await?;
/// ```
#[derive(Debug, Clone)]
pub struct AlloyTransport<P> {
    provider: P,
    timeout: Option<Duration>,
}

impl<P> AlloyTransport<P> {
    /// Wrap a provider with no per-request timeout
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            timeout: None,
        }
    }

    /// Fail requests that take longer than `timeout` with [`RpcError::Unreachable`]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The wrapped provider
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P> AlloyTransport<P>
where
    P: Provider<Ethereum>,
{
    async fn run<F, R>(&self, operation: &'static str, request: F) -> Result<R, RpcError>
    where
        F: IntoFuture<Output = TransportResult<R>> + Send,
        F::IntoFuture: Send,
        R: Send,
    {
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|elapsed| RpcError::unreachable(operation, elapsed))?,
            None => request.await,
        };
        result.map_err(|e| map_transport_error(operation, e))
    }
}

/// Sort an alloy transport error into node rejections, unusable payloads and
/// connectivity failures
fn map_transport_error(operation: &str, error: TransportError) -> RpcError {
    match error {
        AlloyRpcError::ErrorResp(payload) => {
            RpcError::rejected(operation, payload.code, payload.message.to_string())
        }
        AlloyRpcError::NullResp => RpcError::invalid_response(operation, "null response"),
        AlloyRpcError::DeserError { err, .. } => {
            RpcError::invalid_response(operation, err.to_string())
        }
        other => RpcError::unreachable(operation, other),
    }
}

fn to_alloy_request(request: &TransactionRequest) -> alloy_rpc_types::TransactionRequest {
    // Gas prices above u128::MAX are rejected before submission
    let gas_price: u128 = request.gas_price.saturating_to();

    let mut base = alloy_rpc_types::TransactionRequest::default()
        .with_from(request.from)
        .with_value(request.value);
    if request.gas_limit > 0 {
        base.set_gas_limit(request.gas_limit);
    }
    if gas_price > 0 {
        base.set_gas_price(gas_price);
    }

    match request.to {
        Some(to) => base.with_to(to).with_input(request.input.clone()),
        None => base.with_deploy_code(request.input.clone()),
    }
}

fn to_block_tag(block: BlockSelector) -> BlockNumberOrTag {
    match block {
        BlockSelector::Number(number) => BlockNumberOrTag::Number(number),
        BlockSelector::Latest => BlockNumberOrTag::Latest,
    }
}

fn to_sync_state(status: SyncStatus) -> SyncState {
    match status {
        SyncStatus::None => SyncState::Synced,
        SyncStatus::Info(info) => SyncState::Syncing {
            starting_block: info.starting_block.saturating_to(),
            current_block: info.current_block.saturating_to(),
            highest_block: info.highest_block.saturating_to(),
        },
    }
}

#[async_trait]
impl<P> RpcTransport for AlloyTransport<P>
where
    P: Provider<Ethereum>,
{
    async fn block_number(&self) -> Result<u64, RpcError> {
        self.run("eth_blockNumber", self.provider.get_block_number())
            .await
    }

    async fn chain_id(&self) -> Result<u64, RpcError> {
        self.run("eth_chainId", self.provider.get_chain_id()).await
    }

    async fn gas_price(&self) -> Result<U256, RpcError> {
        let price = self.run("eth_gasPrice", self.provider.get_gas_price()).await?;
        Ok(U256::from(price))
    }

    async fn get_balance(&self, address: Address) -> Result<U256, RpcError> {
        self.run("eth_getBalance", self.provider.get_balance(address))
            .await
    }

    async fn get_block(&self, block: BlockSelector) -> Result<Block, RpcError> {
        let response = self
            .run(
                "eth_getBlockByNumber",
                self.provider.get_block_by_number(to_block_tag(block)),
            )
            .await?
            .ok_or(RpcError::BlockNotFound { block })?;

        Ok(Block {
            number: response.header.number,
            timestamp: response.header.timestamp,
            transaction_count: response.transactions.len(),
            gas_used: response.header.gas_used,
            gas_limit: response.header.gas_limit,
        })
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, RpcError> {
        let pending = self
            .run(
                "eth_sendTransaction",
                self.provider.send_transaction(to_alloy_request(request)),
            )
            .await?;
        Ok(*pending.tx_hash())
    }

    async fn get_transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, RpcError> {
        let Some(receipt) = self
            .run(
                "eth_getTransactionReceipt",
                self.provider.get_transaction_receipt(hash),
            )
            .await?
        else {
            return Ok(None);
        };

        // Some nodes hand out receipts for pending transactions
        let Some(block_number) = receipt.block_number else {
            debug!(tx_hash = %hash, "receipt has no block number yet");
            return Ok(None);
        };

        Ok(Some(TransactionReceipt {
            hash: receipt.transaction_hash,
            block_number,
            gas_used: receipt.gas_used,
            contract_address: receipt.contract_address,
            status: receipt.status(),
        }))
    }

    async fn call(&self, request: &TransactionRequest) -> Result<Bytes, RpcError> {
        self.run("eth_call", self.provider.call(to_alloy_request(request)))
            .await
    }

    async fn get_code(&self, address: Address) -> Result<Bytes, RpcError> {
        self.run("eth_getCode", self.provider.get_code_at(address))
            .await
    }

    async fn estimate_gas(&self, request: &TransactionRequest) -> Result<u64, RpcError> {
        self.run(
            "eth_estimateGas",
            self.provider.estimate_gas(to_alloy_request(request)),
        )
        .await
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, RpcError> {
        self.run(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address),
        )
        .await
    }

    async fn network_id(&self) -> Result<u64, RpcError> {
        self.run("net_version", self.provider.get_net_version())
            .await
    }

    async fn peer_count(&self) -> Result<u64, RpcError> {
        let count: U64 = self
            .run(
                "net_peerCount",
                self.provider.client().request_noparams("net_peerCount"),
            )
            .await?;
        Ok(count.saturating_to())
    }

    async fn syncing(&self) -> Result<SyncState, RpcError> {
        let status = self.run("eth_syncing", self.provider.syncing()).await?;
        Ok(to_sync_state(status))
    }

    async fn client_version(&self) -> Result<String, RpcError> {
        self.run("web3_clientVersion", self.provider.get_client_version())
            .await
    }
}
