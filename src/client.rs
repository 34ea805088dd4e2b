// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! One handle over every evmprobe component

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, U256};
use tracing::info;

use crate::accounts::{AccountRef, AccountRegistry};
use crate::balances::{BalanceLookup, BalanceReader, NamedBalance};
use crate::blocks::{BlockMonitor, BlockWatch};
use crate::config::constants::{CALL_GAS_LIMIT, DEPLOY_GAS_LIMIT};
use crate::config::ClientConfig;
use crate::contract::{ContractCaller, ContractDeployer, ContractInterface};
use crate::errors::{ContractError, RpcError, StatsError, TransactionError};
use crate::provider::{connect_http, HttpProvider};
use crate::rpc::{AlloyTransport, RpcTransport};
use crate::stats::{NetworkStats, NetworkStatsReader, NodeHealth, NodeStatus};
use crate::transaction::TransactionSubmitter;
use crate::types::transaction::TransactionReceipt;

/// Client facade wiring all components to one transport and configuration
///
/// The component accessors expose the full API; the methods on the client
/// itself fill in gas from the configuration.
///
/// # Example
///
/// ```rust,ignore
/// use evmprobe::{ClientConfigBuilder, EvmClient};
///
/// let config = ClientConfigBuilder::new()
///     .rpc_url("http://localhost:8545")
///     .account("account1", alice)
///     .account("account2", bob)
///     .build()?;
/// let client = EvmClient::connect(config)?;
///
/// let stats = client.get_stats().await?;
/// let receipt = client.send_value("account1", "account2", one_ether).await?;
/// ```
#[derive(Debug, Clone)]
pub struct EvmClient<T> {
    config: ClientConfig,
    accounts: Arc<AccountRegistry>,
    balances: BalanceReader<T>,
    transactions: TransactionSubmitter<T>,
    deployer: ContractDeployer<T>,
    caller: ContractCaller<T>,
    monitor: BlockMonitor<T>,
    stats: NetworkStatsReader<T>,
    health: NodeHealth<T>,
}

impl EvmClient<AlloyTransport<HttpProvider>> {
    /// Connect to the HTTP endpoint named in `config`.
    ///
    /// No request is made here; use [`EvmClient::health`] to check that the
    /// node answers.
    ///
    /// # Errors
    ///
    /// [`RpcError::ProviderUrlInvalid`] if the endpoint URL does not parse.
    pub fn connect(config: ClientConfig) -> Result<Self, RpcError> {
        let transport = connect_http(&config.provider)?;
        info!(url = %config.provider.url, accounts = config.accounts.len(), "client created");
        Ok(Self::new(transport, config))
    }
}

impl<T: RpcTransport + Clone> EvmClient<T> {
    /// Build a client over an existing transport
    pub fn new(transport: T, config: ClientConfig) -> Self {
        let accounts = Arc::new(config.accounts.clone());
        let transactions =
            TransactionSubmitter::new(transport.clone(), accounts.clone(), config.confirmation);

        Self {
            balances: BalanceReader::new(transport.clone()),
            deployer: ContractDeployer::new(transactions.clone()),
            caller: ContractCaller::new(transactions.clone()),
            monitor: BlockMonitor::new(transport.clone()),
            stats: NetworkStatsReader::new(transport.clone()),
            health: NodeHealth::new(transport),
            transactions,
            accounts,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn accounts(&self) -> &AccountRegistry {
        &self.accounts
    }

    pub fn balances(&self) -> &BalanceReader<T> {
        &self.balances
    }

    pub fn transactions(&self) -> &TransactionSubmitter<T> {
        &self.transactions
    }

    pub fn deployer(&self) -> &ContractDeployer<T> {
        &self.deployer
    }

    pub fn caller(&self) -> &ContractCaller<T> {
        &self.caller
    }

    pub fn monitor(&self) -> &BlockMonitor<T> {
        &self.monitor
    }

    pub fn stats(&self) -> &NetworkStatsReader<T> {
        &self.stats
    }

    pub fn health(&self) -> &NodeHealth<T> {
        &self.health
    }

    /// Balances of arbitrary addresses
    pub async fn get_balances<I>(&self, addresses: I) -> BTreeMap<Address, BalanceLookup>
    where
        I: IntoIterator<Item = Address>,
    {
        self.balances.get_balances(addresses).await
    }

    /// Balances of every registered account, in registry order
    pub async fn get_account_balances(&self) -> Vec<NamedBalance> {
        self.balances.get_named_balances(&self.accounts).await
    }

    /// Value transfer at the configured default gas
    pub async fn send_value(
        &self,
        from: impl Into<AccountRef>,
        to: impl Into<AccountRef>,
        amount: U256,
    ) -> Result<TransactionReceipt, TransactionError> {
        self.transactions
            .send_value(from, to, amount, self.config.default_gas())
            .await
    }

    /// Deployment with a 1 500 000 gas limit at the default price
    pub async fn deploy(
        &self,
        bytecode: Bytes,
        interface: &ContractInterface,
        from: impl Into<AccountRef>,
    ) -> Result<Address, ContractError> {
        self.deployer
            .deploy(
                bytecode,
                interface,
                from,
                self.config.gas_with_limit(DEPLOY_GAS_LIMIT),
            )
            .await
    }

    /// Read-only call
    pub async fn call_view(
        &self,
        address: Address,
        interface: &ContractInterface,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>, ContractError> {
        self.caller
            .call_view(address, interface, function, args)
            .await
    }

    /// State-changing call with a 100 000 gas limit at the default price
    pub async fn call_mutating(
        &self,
        address: Address,
        interface: &ContractInterface,
        function: &str,
        args: &[DynSolValue],
        from: impl Into<AccountRef>,
    ) -> Result<TransactionReceipt, ContractError> {
        self.caller
            .call_mutating(
                address,
                interface,
                function,
                args,
                from,
                self.config.gas_with_limit(CALL_GAS_LIMIT),
            )
            .await
    }

    /// Returns true if a contract is deployed at `address`
    pub async fn has_code(&self, address: Address) -> Result<bool, ContractError> {
        self.caller.has_code(address).await
    }

    /// Watch for new blocks
    pub fn watch(&self, duration_limit: Duration, poll_interval: Duration) -> BlockWatch<'_> {
        self.monitor.watch(duration_limit, poll_interval)
    }

    pub async fn get_stats(&self) -> Result<NetworkStats, StatsError> {
        self.stats.get_stats().await
    }

    pub async fn node_status(&self) -> Result<NodeStatus, RpcError> {
        self.health.check().await
    }
}
