// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Value transfers and generic submit-and-confirm

use std::sync::Arc;

use alloy_primitives::{Address, TxHash, U256};
use tracing::{info, warn, Instrument};

use crate::accounts::{AccountRef, AccountRegistry};
use crate::errors::TransactionError;
use crate::rpc::RpcTransport;
use crate::tracing::spans;
use crate::types::transaction::{GasSettings, TransactionReceipt, TransactionRequest};

use super::confirm::{await_receipt, ConfirmationPolicy};

/// Submits transactions signed by the node and waits for their receipts
///
/// Senders must be registered in the [`AccountRegistry`]; the node is expected
/// to hold their keys unlocked.
///
/// # Example
///
/// ```rust,ignore
/// use alloy_primitives::U256;
/// use evmprobe::{GasSettings, TransactionSubmitter};
///
/// let submitter = TransactionSubmitter::new(transport, accounts, Default::default());
/// let receipt = submitter
///     .send_value("account1", "account2", U256::from(10u64).pow(U256::from(18u64)), GasSettings::transfer())
///     .await?;
/// println!("included in block {}", receipt.block_number);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionSubmitter<T> {
    transport: T,
    accounts: Arc<AccountRegistry>,
    confirmation: ConfirmationPolicy,
}

impl<T: RpcTransport> TransactionSubmitter<T> {
    /// Create a submitter over `transport`
    pub fn new(
        transport: T,
        accounts: Arc<AccountRegistry>,
        confirmation: ConfirmationPolicy,
    ) -> Self {
        Self {
            transport,
            accounts,
            confirmation,
        }
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Registered accounts that may send transactions
    pub fn accounts(&self) -> &AccountRegistry {
        &self.accounts
    }

    /// Receipt polling policy
    pub fn confirmation(&self) -> &ConfirmationPolicy {
        &self.confirmation
    }

    /// Transfer `amount` wei from a registered account to `to` and wait for
    /// the receipt.
    ///
    /// `to` may be a registry name or any address. A transfer that is included
    /// but reverts still returns its receipt, with `status == false`.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::UnknownAccount`] if `from` is not registered or
    ///   `to` names an unknown account
    /// - [`TransactionError::Submission`] if the node refuses the transaction
    /// - [`TransactionError::ConfirmationTimeout`] if no receipt appears in time
    pub async fn send_value(
        &self,
        from: impl Into<AccountRef>,
        to: impl Into<AccountRef>,
        amount: U256,
        gas: GasSettings,
    ) -> Result<TransactionReceipt, TransactionError> {
        let from = self.resolve_sender(&from.into())?;
        let to = to.into();
        let to = self
            .accounts
            .resolve(&to)
            .ok_or_else(|| TransactionError::unknown_account(to.to_string()))?;

        let request = TransactionRequest::transfer(from, to, amount, gas);
        async move {
            let receipt = self.submit_and_confirm(&request).await?;
            if receipt.succeeded() {
                info!(
                    tx_hash = %receipt.hash,
                    block_number = receipt.block_number,
                    gas_used = receipt.gas_used,
                    "transfer confirmed"
                );
            } else {
                warn!(tx_hash = %receipt.hash, "transfer reverted");
            }
            Ok(receipt)
        }
        .instrument(spans::send_value(from, to, amount))
        .await
    }

    /// Submit `request` and wait for its receipt under the configured policy.
    ///
    /// # Errors
    ///
    /// See [`TransactionSubmitter::submit`] and
    /// [`TransactionSubmitter::wait_for_receipt`].
    pub async fn submit_and_confirm(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionReceipt, TransactionError> {
        let tx_hash = self.submit(request).await?;
        self.wait_for_receipt(tx_hash).await
    }

    /// Submit `request` via `eth_sendTransaction` without waiting.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::UnknownAccount`] if `request.from` is not registered
    /// - [`TransactionError::InvalidRequest`] for a zero gas limit or a gas price
    ///   that does not fit the wire format
    /// - [`TransactionError::Submission`] if the node refuses the transaction
    pub async fn submit(&self, request: &TransactionRequest) -> Result<TxHash, TransactionError> {
        self.validate(request)?;

        let tx_hash = self
            .transport
            .send_transaction(request)
            .await
            .map_err(TransactionError::Submission)?;
        info!(
            tx_hash = %tx_hash,
            from = %request.from,
            create = request.is_create(),
            "transaction submitted"
        );
        Ok(tx_hash)
    }

    /// Poll for the receipt of an already submitted transaction.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::ConfirmationTimeout`] if no receipt appears in time
    /// - [`TransactionError::ReceiptLookup`] if a lookup itself fails
    pub async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<TransactionReceipt, TransactionError> {
        await_receipt(&self.transport, tx_hash, &self.confirmation).await
    }

    /// Ask the node how much gas `request` would consume.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::Rpc`] if the node cannot estimate, for
    /// example because execution would revert.
    pub async fn estimate_gas(&self, request: &TransactionRequest) -> Result<u64, TransactionError> {
        Ok(self.transport.estimate_gas(request).await?)
    }

    /// Number of transactions sent so far by `account`.
    ///
    /// # Errors
    ///
    /// [`TransactionError::UnknownAccount`] for an unknown name, otherwise
    /// [`TransactionError::Rpc`].
    pub async fn nonce(&self, account: impl Into<AccountRef>) -> Result<u64, TransactionError> {
        let account = account.into();
        let address = self
            .accounts
            .resolve(&account)
            .ok_or_else(|| TransactionError::unknown_account(account.to_string()))?;
        Ok(self.transport.transaction_count(address).await?)
    }

    /// Resolve a sender, which must be registered
    pub(crate) fn resolve_sender(&self, from: &AccountRef) -> Result<Address, TransactionError> {
        self.accounts
            .resolve_known(from)
            .ok_or_else(|| TransactionError::unknown_account(from.to_string()))
    }

    fn validate(&self, request: &TransactionRequest) -> Result<(), TransactionError> {
        if !self.accounts.contains_address(&request.from) {
            return Err(TransactionError::unknown_account(request.from.to_string()));
        }
        if request.gas_limit == 0 {
            return Err(TransactionError::invalid_request("gas limit must be non-zero"));
        }
        if request.gas_price > U256::from(u128::MAX) {
            return Err(TransactionError::invalid_request(
                "gas price exceeds 128 bits",
            ));
        }
        Ok(())
    }
}
