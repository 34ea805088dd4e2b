// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Read-only and state-changing contract calls

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes};
use tracing::{debug, info, warn, Instrument};

use crate::accounts::AccountRef;
use crate::errors::ContractError;
use crate::rpc::RpcTransport;
use crate::tracing::spans;
use crate::transaction::TransactionSubmitter;
use crate::types::transaction::{GasSettings, TransactionReceipt, TransactionRequest};

use super::interface::ContractInterface;

/// Calls functions of deployed contracts described by a [`ContractInterface`]
///
/// Function lookup and argument checks happen before anything is sent to the
/// node.
///
/// # Example
///
/// ```rust,ignore
/// use alloy_dyn_abi::DynSolValue;
/// use alloy_primitives::U256;
///
/// let values = caller.call_view(contract, &interface, "retrieve", &[]).await?;
/// let receipt = caller
///     .call_mutating(contract, &interface, "store", &[DynSolValue::from(U256::from(42))], "account1", gas)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ContractCaller<T> {
    submitter: TransactionSubmitter<T>,
}

impl<T: RpcTransport> ContractCaller<T> {
    /// Create a caller that submits through `submitter`
    pub fn new(submitter: TransactionSubmitter<T>) -> Self {
        Self { submitter }
    }

    /// Runtime code deployed at `address`; empty if there is none
    pub async fn code_at(&self, address: Address) -> Result<Bytes, ContractError> {
        Ok(self.submitter.transport().get_code(address).await?)
    }

    /// Returns true if a contract is deployed at `address`.
    ///
    /// A call to an address without code succeeds with empty output, so
    /// check this first when the address comes from outside.
    pub async fn has_code(&self, address: Address) -> Result<bool, ContractError> {
        let code = self.code_at(address).await?;
        debug!(%address, code_len = code.len(), "code lookup");
        Ok(!code.is_empty())
    }

    /// Execute `function` with `eth_call` and decode its return values.
    ///
    /// # Errors
    ///
    /// - [`ContractError::UnknownFunction`] if the interface has no such
    ///   function (nothing is sent)
    /// - [`ContractError::ArgumentMismatch`] if `args` do not fit (nothing is sent)
    /// - [`ContractError::Rpc`] if the node fails the call, e.g. on revert
    /// - [`ContractError::AbiDecode`] if the return data does not match the
    ///   declared outputs
    pub async fn call_view(
        &self,
        address: Address,
        interface: &ContractInterface,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>, ContractError> {
        let descriptor = interface.resolve(function, args)?;
        let input = descriptor.encode_call(args)?;
        let request = TransactionRequest::query(Address::ZERO, address, input);

        async move {
            let output = self.submitter.transport().call(&request).await?;
            debug!(output_len = output.len(), "call returned");
            descriptor.decode_output(&output)
        }
        .instrument(spans::call_view(address, function))
        .await
    }

    /// Send `function` as a transaction from a registered account and wait for
    /// the receipt.
    ///
    /// A call that is included but reverts still returns its receipt, with
    /// `status == false`.
    ///
    /// # Errors
    ///
    /// - [`ContractError::UnknownFunction`] or [`ContractError::ArgumentMismatch`]
    ///   as for [`ContractCaller::call_view`]
    /// - [`ContractError::NotMutating`] for `view` and `pure` functions
    /// - [`ContractError::Transaction`] for an unknown sender, a refused
    ///   submission or a confirmation timeout
    pub async fn call_mutating(
        &self,
        address: Address,
        interface: &ContractInterface,
        function: &str,
        args: &[DynSolValue],
        from: impl Into<AccountRef>,
        gas: GasSettings,
    ) -> Result<TransactionReceipt, ContractError> {
        let descriptor = interface.resolve(function, args)?;
        if descriptor.mutability.is_read_only() {
            return Err(ContractError::NotMutating {
                function: descriptor.name.clone(),
            });
        }
        let from = self.submitter.resolve_sender(&from.into())?;
        let input = descriptor.encode_call(args)?;
        let request = TransactionRequest::call(from, address, input, gas);

        async move {
            let receipt = self.submitter.submit_and_confirm(&request).await?;
            if receipt.succeeded() {
                info!(
                    tx_hash = %receipt.hash,
                    block_number = receipt.block_number,
                    "contract call confirmed"
                );
            } else {
                warn!(tx_hash = %receipt.hash, "contract call reverted");
            }
            Ok(receipt)
        }
        .instrument(spans::call_mutating(address, function, from))
        .await
    }
}
