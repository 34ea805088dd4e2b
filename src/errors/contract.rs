//! Error types for contract deployment and calls.

use alloy_primitives::TxHash;

use super::{RpcError, TransactionError};

/// Why a deployment did not produce a contract.
#[derive(Debug, thiserror::Error)]
pub enum DeploymentFailure {
    /// The creation transaction was mined with a failure status.
    #[error("constructor reverted in transaction {tx_hash}")]
    Reverted {
        /// Hash of the creation transaction
        tx_hash: TxHash,
    },

    /// The receipt carries no contract address (or the zero address).
    #[error("receipt for {tx_hash} has no contract address")]
    MissingAddress {
        /// Hash of the creation transaction
        tx_hash: TxHash,
    },

    /// The creation transaction was not confirmed in time.
    #[error("creation transaction was not confirmed")]
    Unconfirmed(#[source] TransactionError),
}

/// Errors that can occur while deploying or calling a contract.
///
/// # Examples
///
/// ```rust,ignore
/// use evmprobe::ContractError;
///
/// match caller.call_view(address, &interface, "get", &[]).await {
///     Ok(values) => println!("{values:?}"),
///     Err(ContractError::UnknownFunction { name }) => eprintln!("no function {name}"),
///     Err(ContractError::AbiDecode { function, .. }) => eprintln!("bad output from {function}"),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// The function name is not part of the supplied interface.
    #[error("Unknown function: {name}")]
    UnknownFunction {
        /// The requested function name
        name: String,
    },

    /// The supplied arguments do not match the function's declared inputs.
    #[error("Argument mismatch for {function}: {reason}")]
    ArgumentMismatch {
        /// Function signature
        function: String,
        /// Description of the mismatch
        reason: String,
    },

    /// A state-changing call was requested for a view or pure function.
    #[error("Function {function} is read-only and cannot be sent as a transaction")]
    NotMutating {
        /// Function signature
        function: String,
    },

    /// The interface description could not be parsed.
    #[error("Invalid contract interface: {reason}")]
    InvalidInterface {
        /// Description of the problem
        reason: String,
    },

    /// The return data does not decode as the declared output types.
    #[error("Failed to decode output of {function}")]
    AbiDecode {
        /// Function signature
        function: String,
        /// The underlying ABI error
        #[source]
        source: alloy_dyn_abi::Error,
    },

    /// The deployment did not yield a usable contract address.
    #[error("Contract deployment failed: {0}")]
    DeploymentFailed(#[source] DeploymentFailure),

    /// Submitting or confirming the transaction failed.
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    /// The read-only `eth_call` failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

impl ContractError {
    /// Create an `UnknownFunction` error.
    pub fn unknown_function(name: impl Into<String>) -> Self {
        ContractError::UnknownFunction { name: name.into() }
    }

    /// Create an `ArgumentMismatch` error.
    pub fn argument_mismatch(function: impl Into<String>, reason: impl Into<String>) -> Self {
        ContractError::ArgumentMismatch {
            function: function.into(),
            reason: reason.into(),
        }
    }

    /// Create an `InvalidInterface` error.
    pub fn invalid_interface(reason: impl Into<String>) -> Self {
        ContractError::InvalidInterface {
            reason: reason.into(),
        }
    }
}
