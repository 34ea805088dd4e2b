//! Error types for transaction submission and confirmation.

use std::time::Duration;

use alloy_primitives::TxHash;

use super::RpcError;

/// Errors that can occur while submitting a transaction and waiting for its
/// receipt.
///
/// # Examples
///
/// ```rust,ignore
/// use evmprobe::{TransactionError, TransactionSubmitter};
///
/// match submitter.send_value("alice", "bob", amount, gas).await {
///     Ok(receipt) => println!("included in block {}", receipt.block_number),
///     Err(TransactionError::ConfirmationTimeout { tx_hash, .. }) => {
///         eprintln!("{tx_hash} still pending, check again later");
///     }
///     Err(TransactionError::Submission(e)) => eprintln!("node refused: {e}"),
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The sender (or a named recipient) is not in the account registry.
    #[error("Unknown account: {account}")]
    UnknownAccount {
        /// The name or address that failed to resolve
        account: String,
    },

    /// The request cannot be expressed on the wire (e.g. a gas price wider
    /// than 128 bits).
    #[error("Invalid transaction request: {reason}")]
    InvalidRequest {
        /// Description of the problem
        reason: String,
    },

    /// The transport refused the transaction.
    ///
    /// Wraps the node's answer to `eth_sendTransaction`: malformed fields,
    /// insufficient balance, locked account, and so on.
    #[error("Transaction submission failed: {0}")]
    Submission(#[source] RpcError),

    /// No receipt was observed within the configured wait.
    #[error("Transaction {tx_hash} not confirmed after {waited:?}")]
    ConfirmationTimeout {
        /// Hash of the submitted transaction
        tx_hash: TxHash,
        /// How long the poller waited
        waited: Duration,
    },

    /// Polling for the receipt failed at the transport level.
    #[error("Receipt lookup failed for {tx_hash}")]
    ReceiptLookup {
        /// Hash of the submitted transaction
        tx_hash: TxHash,
        /// The underlying RPC error
        #[source]
        source: RpcError,
    },

    /// A read-only query that supports submission (nonce, gas estimate) failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

impl TransactionError {
    /// Create an `UnknownAccount` error.
    pub fn unknown_account(account: impl Into<String>) -> Self {
        TransactionError::UnknownAccount {
            account: account.into(),
        }
    }

    /// Create an `InvalidRequest` error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        TransactionError::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Returns true if the transaction was submitted but never confirmed.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransactionError::ConfirmationTimeout { .. })
    }
}
