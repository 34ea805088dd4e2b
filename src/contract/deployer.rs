// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Contract deployment

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes};
use tracing::{info, warn, Instrument};

use crate::accounts::AccountRef;
use crate::errors::{ContractError, DeploymentFailure, TransactionError};
use crate::rpc::RpcTransport;
use crate::tracing::spans;
use crate::transaction::TransactionSubmitter;
use crate::types::transaction::{GasSettings, TransactionRequest};

use super::interface::ContractInterface;

/// Deploys contracts from init code and waits for the created address
#[derive(Debug, Clone)]
pub struct ContractDeployer<T> {
    submitter: TransactionSubmitter<T>,
}

impl<T: RpcTransport> ContractDeployer<T> {
    /// Create a deployer that submits through `submitter`
    pub fn new(submitter: TransactionSubmitter<T>) -> Self {
        Self { submitter }
    }

    /// Deploy `bytecode` from a registered account.
    ///
    /// The interface must not declare constructor parameters; use
    /// [`ContractDeployer::deploy_with_args`] otherwise.
    ///
    /// # Errors
    ///
    /// See [`ContractDeployer::deploy_with_args`].
    pub async fn deploy(
        &self,
        bytecode: Bytes,
        interface: &ContractInterface,
        from: impl Into<AccountRef>,
        gas: GasSettings,
    ) -> Result<Address, ContractError> {
        self.deploy_with_args(bytecode, interface, &[], from, gas)
            .await
    }

    /// Deploy `bytecode` with ABI-encoded constructor arguments appended.
    ///
    /// Returns the address of the new contract, never the zero address.
    ///
    /// # Errors
    ///
    /// - [`ContractError::ArgumentMismatch`] if `args` do not fit the constructor
    /// - [`ContractError::Transaction`] if the sender is unknown, the init code
    ///   is empty or the node refuses the transaction
    /// - [`ContractError::DeploymentFailed`] if the constructor reverts, the
    ///   receipt carries no contract address or no receipt arrives in time
    pub async fn deploy_with_args(
        &self,
        bytecode: Bytes,
        interface: &ContractInterface,
        args: &[DynSolValue],
        from: impl Into<AccountRef>,
        gas: GasSettings,
    ) -> Result<Address, ContractError> {
        let from = self.submitter.resolve_sender(&from.into())?;
        if bytecode.is_empty() {
            return Err(TransactionError::invalid_request("empty init code").into());
        }

        let mut init_code = bytecode.to_vec();
        init_code.extend_from_slice(&interface.encode_constructor(args)?);
        let request = TransactionRequest::create(from, init_code.into(), gas);
        let span = spans::deploy(from, request.input.len());

        async move {
            let tx_hash = self.submitter.submit(&request).await?;
            let receipt = self
                .submitter
                .wait_for_receipt(tx_hash)
                .await
                .map_err(|e| ContractError::DeploymentFailed(DeploymentFailure::Unconfirmed(e)))?;

            if !receipt.succeeded() {
                warn!(tx_hash = %tx_hash, "constructor reverted");
                return Err(ContractError::DeploymentFailed(
                    DeploymentFailure::Reverted { tx_hash },
                ));
            }

            let address = receipt
                .contract_address
                .filter(|address| !address.is_zero())
                .ok_or(ContractError::DeploymentFailed(
                    DeploymentFailure::MissingAddress { tx_hash },
                ))?;

            info!(
                contract = %address,
                tx_hash = %tx_hash,
                gas_used = receipt.gas_used,
                "contract deployed"
            );
            Ok(address)
        }
        .instrument(span)
        .await
    }
}
