// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transaction requests, receipts and gas settings

use alloy_primitives::{Address, Bytes, TxHash, U256};
use serde::{Deserialize, Serialize};

use crate::config::constants::{DEFAULT_GAS_PRICE_WEI, TRANSFER_GAS_LIMIT};

/// Gas limit and gas price attached to a transaction.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use evmprobe::GasSettings;
///
/// let gas = GasSettings::transfer().with_gas_price(U256::from(30_000_000_000u64));
/// assert_eq!(gas.gas_limit, 21_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasSettings {
    /// Maximum gas the transaction may consume
    pub gas_limit: u64,
    /// Price per unit of gas, in wei
    pub gas_price: U256,
}

impl GasSettings {
    /// Create gas settings from explicit values
    pub const fn new(gas_limit: u64, gas_price: U256) -> Self {
        Self {
            gas_limit,
            gas_price,
        }
    }

    /// Settings for a plain value transfer (21 000 gas at the default price)
    pub const fn transfer() -> Self {
        Self::new(TRANSFER_GAS_LIMIT, DEFAULT_GAS_PRICE_WEI)
    }

    /// Replace the gas limit
    #[must_use]
    pub const fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Replace the gas price
    #[must_use]
    pub const fn with_gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Upper bound on the fee this transaction can cost: `gas_limit * gas_price`
    pub fn max_fee(&self) -> U256 {
        U256::from(self.gas_limit).saturating_mul(self.gas_price)
    }
}

impl Default for GasSettings {
    fn default() -> Self {
        Self::transfer()
    }
}

/// A transaction as handed to the node via `eth_sendTransaction` or `eth_call`.
///
/// `to == None` means contract creation, with `input` carrying the init code.
/// A zero `gas_limit` or `gas_price` is left out of the request so the node
/// picks its own; only queries ([`TransactionRequest::query`]) use that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Sender; must be an account the node can sign for
    pub from: Address,
    /// Recipient, or `None` for contract creation
    pub to: Option<Address>,
    /// Value transferred, in wei
    pub value: U256,
    /// Maximum gas the transaction may consume
    pub gas_limit: u64,
    /// Price per unit of gas, in wei
    pub gas_price: U256,
    /// Call data or init code
    pub input: Bytes,
}

impl TransactionRequest {
    /// A plain value transfer
    pub fn transfer(from: Address, to: Address, value: U256, gas: GasSettings) -> Self {
        Self {
            from,
            to: Some(to),
            value,
            gas_limit: gas.gas_limit,
            gas_price: gas.gas_price,
            input: Bytes::new(),
        }
    }

    /// A contract creation carrying `init_code`
    pub fn create(from: Address, init_code: Bytes, gas: GasSettings) -> Self {
        Self {
            from,
            to: None,
            value: U256::ZERO,
            gas_limit: gas.gas_limit,
            gas_price: gas.gas_price,
            input: init_code,
        }
    }

    /// A call into `contract` with ABI-encoded `input`
    pub fn call(from: Address, contract: Address, input: Bytes, gas: GasSettings) -> Self {
        Self {
            from,
            to: Some(contract),
            value: U256::ZERO,
            gas_limit: gas.gas_limit,
            gas_price: gas.gas_price,
            input,
        }
    }

    /// A read-only `eth_call` into `contract`, with gas left to the node
    pub fn query(from: Address, contract: Address, input: Bytes) -> Self {
        Self::call(from, contract, input, GasSettings::new(0, U256::ZERO))
    }

    /// Returns true if this request deploys a contract
    pub fn is_create(&self) -> bool {
        self.to.is_none()
    }
}

/// The node's confirmation record for an included transaction.
///
/// Only ever built once inclusion has been observed, so the block number is
/// always known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Transaction hash
    pub hash: TxHash,
    /// Block the transaction was included in
    pub block_number: u64,
    /// Gas consumed by this transaction
    pub gas_used: u64,
    /// Address of the created contract, for creation transactions
    pub contract_address: Option<Address>,
    /// Execution status: `true` on success, `false` if it reverted
    pub status: bool,
}

impl TransactionReceipt {
    /// Returns true if execution succeeded
    pub fn succeeded(&self) -> bool {
        self.status
    }

    /// Fee paid at the given gas price: `gas_used * gas_price`
    pub fn fee(&self, gas_price: U256) -> U256 {
        U256::from(self.gas_used).saturating_mul(gas_price)
    }
}
