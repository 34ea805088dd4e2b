// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for evmprobe integration tests
//!
//! Provides an in-memory [`RpcTransport`] so components can be tested without
//! a running node.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{address, keccak256, Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use evmprobe::{
    AccountRegistry, Block, BlockSelector, ConfirmationPolicy, RpcError, RpcTransport, SyncState,
    TransactionReceipt, TransactionRequest, TransactionSubmitter,
};
use tokio::time::Instant;

pub const ALICE: Address = address!("742d35Cc6634C0532925a3b844Bc454e4438f44e");
pub const BOB: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
pub const CAROL: Address = address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");

/// Address anvil assigns to the first contract deployed by its first account
pub const DEPLOYED: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

/// `account1` = ALICE, `account2` = BOB
pub fn registry() -> AccountRegistry {
    AccountRegistry::new([("account1", ALICE), ("account2", BOB)]).unwrap()
}

/// Submitter over `mock` with the test registry
pub fn submitter(
    mock: &Arc<MockTransport>,
    policy: ConfirmationPolicy,
) -> TransactionSubmitter<Arc<MockTransport>> {
    TransactionSubmitter::new(mock.clone(), Arc::new(registry()), policy)
}

/// When a submitted transaction gets a receipt
#[derive(Debug, Clone, Copy)]
pub enum Inclusion {
    /// After this many receipt lookups returned nothing
    AfterPolls(usize),
    /// Never; every lookup returns nothing
    Never,
}

#[derive(Debug)]
struct Submitted {
    hash: TxHash,
    request: TransactionRequest,
    lookups: usize,
}

/// Scriptable in-memory node
///
/// The chain height grows by one every `block_time` of tokio time, so tests
/// running with a paused clock control block production precisely.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockTransport::new()
///     .with_balance(ALICE, U256::from(10))
///     .with_failing_balance(BOB);
/// ```
pub struct MockTransport {
    started: Instant,
    base_height: u64,
    block_time: Option<Duration>,
    chain_id: u64,
    gas_price: U256,
    peer_count: u64,
    sync: SyncState,
    client_version: String,
    balances: HashMap<Address, U256>,
    failing_balances: HashSet<Address>,
    inclusion: Inclusion,
    reverting: bool,
    contract_address: Option<Address>,
    reject_sends: Option<String>,
    call_outputs: HashMap<[u8; 4], Bytes>,
    reverting_calls: HashSet<[u8; 4]>,
    code: HashMap<Address, Bytes>,
    block_number_budget: Option<usize>,
    failing_blocks: HashSet<u64>,
    block_fetch_delay: Option<Duration>,
    failing_methods: HashSet<&'static str>,
    unreachable: bool,
    calls: AtomicUsize,
    methods: Mutex<Vec<&'static str>>,
    submitted: Mutex<Vec<Submitted>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// A synced dev chain at height 100 that never produces blocks and
    /// includes transactions on the first receipt lookup
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            base_height: 100,
            block_time: None,
            chain_id: 31337,
            gas_price: U256::from(20_000_000_000u64),
            peer_count: 0,
            sync: SyncState::Synced,
            client_version: "anvil/v1.0.0".to_string(),
            balances: HashMap::new(),
            failing_balances: HashSet::new(),
            inclusion: Inclusion::AfterPolls(0),
            reverting: false,
            contract_address: Some(DEPLOYED),
            reject_sends: None,
            call_outputs: HashMap::new(),
            reverting_calls: HashSet::new(),
            code: HashMap::new(),
            block_number_budget: None,
            failing_blocks: HashSet::new(),
            block_fetch_delay: None,
            failing_methods: HashSet::new(),
            unreachable: false,
            calls: AtomicUsize::new(0),
            methods: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_height(mut self, height: u64) -> Self {
        self.base_height = height;
        self
    }

    /// Produce one block every `block_time`, counted from construction
    pub fn with_block_time(mut self, block_time: Duration) -> Self {
        self.block_time = Some(block_time);
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn with_peers(mut self, peer_count: u64) -> Self {
        self.peer_count = peer_count;
        self
    }

    pub fn with_sync(mut self, sync: SyncState) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_balance(mut self, address: Address, amount: U256) -> Self {
        self.balances.insert(address, amount);
        self
    }

    pub fn with_failing_balance(mut self, address: Address) -> Self {
        self.failing_balances.insert(address);
        self
    }

    pub fn with_inclusion(mut self, inclusion: Inclusion) -> Self {
        self.inclusion = inclusion;
        self
    }

    /// Every receipt reports a failed execution
    pub fn reverting(mut self) -> Self {
        self.reverting = true;
        self
    }

    /// Contract address reported in creation receipts
    pub fn with_contract_address(mut self, address: Option<Address>) -> Self {
        self.contract_address = address;
        self
    }

    /// Refuse every `eth_sendTransaction` with `message`
    pub fn rejecting_sends(mut self, message: impl Into<String>) -> Self {
        self.reject_sends = Some(message.into());
        self
    }

    /// Answer `eth_call` for `selector` with `output`
    pub fn with_call_output(mut self, selector: [u8; 4], output: impl Into<Bytes>) -> Self {
        self.call_outputs.insert(selector, output.into());
        self
    }

    /// Revert `eth_call` for `selector`
    pub fn with_reverting_call(mut self, selector: [u8; 4]) -> Self {
        self.reverting_calls.insert(selector);
        self
    }

    /// Runtime code reported by `eth_getCode` for `address`
    pub fn with_code(mut self, address: Address, code: impl Into<Bytes>) -> Self {
        self.code.insert(address, code.into());
        self
    }

    /// Fail `eth_blockNumber` once it has answered `successes` times
    pub fn failing_block_number_after(mut self, successes: usize) -> Self {
        self.block_number_budget = Some(successes);
        self
    }

    pub fn with_failing_block(mut self, number: u64) -> Self {
        self.failing_blocks.insert(number);
        self
    }

    /// Make every `eth_getBlockByNumber` take `delay` of tokio time
    pub fn with_block_fetch_delay(mut self, delay: Duration) -> Self {
        self.block_fetch_delay = Some(delay);
        self
    }

    /// Fail every request for `method` with an unreachable-node error
    pub fn failing(mut self, method: &'static str) -> Self {
        self.failing_methods.insert(method);
        self
    }

    /// Fail every request as if nothing listens at the endpoint
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Total number of requests received
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of requests received for `method`
    pub fn calls_to(&self, method: &str) -> usize {
        self.methods
            .lock()
            .unwrap()
            .iter()
            .filter(|m| **m == method)
            .count()
    }

    /// Requests handed to `eth_sendTransaction`, in submission order
    pub fn sent(&self) -> Vec<TransactionRequest> {
        let submitted = self.submitted.lock().unwrap();
        submitted.iter().map(|s| s.request.clone()).collect()
    }

    /// Chain height at the current tokio time
    pub fn height(&self) -> u64 {
        match self.block_time {
            Some(block_time) => {
                let elapsed = self.started.elapsed().as_millis();
                self.base_height + (elapsed / block_time.as_millis()) as u64
            }
            None => self.base_height,
        }
    }

    pub fn block(number: u64) -> Block {
        Block {
            number,
            timestamp: 1_700_000_000 + number * 4,
            transaction_count: (number % 3) as usize,
            gas_used: 21_000 * (number % 3),
            gas_limit: 30_000_000,
        }
    }

    fn record(&self, method: &'static str) -> Result<(), RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.methods.lock().unwrap().push(method);

        if self.unreachable || self.failing_methods.contains(method) {
            return Err(RpcError::unreachable(
                method,
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn block_number(&self) -> Result<u64, RpcError> {
        self.record("eth_blockNumber")?;
        if let Some(budget) = self.block_number_budget {
            if self.calls_to("eth_blockNumber") > budget {
                return Err(RpcError::unreachable(
                    "eth_blockNumber",
                    std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out"),
                ));
            }
        }
        Ok(self.height())
    }

    async fn chain_id(&self) -> Result<u64, RpcError> {
        self.record("eth_chainId")?;
        Ok(self.chain_id)
    }

    async fn gas_price(&self) -> Result<U256, RpcError> {
        self.record("eth_gasPrice")?;
        Ok(self.gas_price)
    }

    async fn get_balance(&self, address: Address) -> Result<U256, RpcError> {
        self.record("eth_getBalance")?;
        if self.failing_balances.contains(&address) {
            return Err(RpcError::invalid_response(
                "eth_getBalance",
                "invalid hex string",
            ));
        }
        Ok(self.balances.get(&address).copied().unwrap_or(U256::ZERO))
    }

    async fn get_block(&self, block: BlockSelector) -> Result<Block, RpcError> {
        self.record("eth_getBlockByNumber")?;
        if let Some(delay) = self.block_fetch_delay {
            tokio::time::sleep(delay).await;
        }
        let height = self.height();
        let number = match block {
            BlockSelector::Latest => height,
            BlockSelector::Number(number) => number,
        };
        if self.failing_blocks.contains(&number) {
            return Err(RpcError::unreachable(
                "eth_getBlockByNumber",
                std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
            ));
        }
        if number > height {
            return Err(RpcError::BlockNotFound { block });
        }
        Ok(Self::block(number))
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, RpcError> {
        self.record("eth_sendTransaction")?;
        if let Some(message) = &self.reject_sends {
            return Err(RpcError::rejected("eth_sendTransaction", -32000, message.clone()));
        }

        let mut submitted = self.submitted.lock().unwrap();
        let hash = keccak256((submitted.len() as u64).to_be_bytes());
        submitted.push(Submitted {
            hash,
            request: request.clone(),
            lookups: 0,
        });
        Ok(hash)
    }

    async fn get_transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, RpcError> {
        self.record("eth_getTransactionReceipt")?;
        let height = self.height();
        let mut submitted = self.submitted.lock().unwrap();
        let Some(entry) = submitted.iter_mut().find(|s| s.hash == hash) else {
            return Ok(None);
        };

        let seen = entry.lookups;
        entry.lookups += 1;
        let included = match self.inclusion {
            Inclusion::AfterPolls(polls) => seen >= polls,
            Inclusion::Never => false,
        };
        if !included {
            return Ok(None);
        }

        let is_create = entry.request.is_create();
        Ok(Some(TransactionReceipt {
            hash,
            block_number: height,
            gas_used: 21_000,
            contract_address: if is_create {
                self.contract_address
            } else {
                None
            },
            status: !self.reverting,
        }))
    }

    async fn call(&self, request: &TransactionRequest) -> Result<Bytes, RpcError> {
        self.record("eth_call")?;
        let Some(selector) = request.input.get(..4) else {
            return Ok(Bytes::new());
        };
        let mut key = [0u8; 4];
        key.copy_from_slice(selector);

        if self.reverting_calls.contains(&key) {
            return Err(RpcError::rejected("eth_call", 3, "execution reverted"));
        }
        Ok(self.call_outputs.get(&key).cloned().unwrap_or_default())
    }

    async fn get_code(&self, address: Address) -> Result<Bytes, RpcError> {
        self.record("eth_getCode")?;
        Ok(self.code.get(&address).cloned().unwrap_or_default())
    }

    async fn estimate_gas(&self, request: &TransactionRequest) -> Result<u64, RpcError> {
        self.record("eth_estimateGas")?;
        Ok(if request.input.is_empty() {
            21_000
        } else {
            21_000 + 16 * request.input.len() as u64
        })
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, RpcError> {
        self.record("eth_getTransactionCount")?;
        let submitted = self.submitted.lock().unwrap();
        Ok(submitted
            .iter()
            .filter(|s| s.request.from == address)
            .count() as u64)
    }

    async fn network_id(&self) -> Result<u64, RpcError> {
        self.record("net_version")?;
        Ok(self.chain_id)
    }

    async fn peer_count(&self) -> Result<u64, RpcError> {
        self.record("net_peerCount")?;
        Ok(self.peer_count)
    }

    async fn syncing(&self) -> Result<SyncState, RpcError> {
        self.record("eth_syncing")?;
        Ok(self.sync)
    }

    async fn client_version(&self) -> Result<String, RpcError> {
        self.record("web3_clientVersion")?;
        Ok(self.client_version.clone())
    }
}
