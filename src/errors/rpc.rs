//! Shared RPC error types for node transport operations.
//!
//! Every [`RpcTransport`](crate::rpc::RpcTransport) method reports failures
//! through [`RpcError`]. The variants separate "the node could not be reached"
//! from "the node answered and refused the request", which lets callers tell a
//! connectivity problem apart from a malformed or unfunded transaction.

use crate::types::block::BlockSelector;

/// Errors that can occur while talking to an EVM node.
///
/// # Examples
///
/// ```rust
/// use evmprobe::RpcError;
///
/// let error = RpcError::rejected("eth_sendTransaction", -32000, "insufficient funds");
/// assert!(error.is_rejection());
/// println!("Error: {}", error);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The transport could not reach the node or the exchange broke down.
    ///
    /// Covers refused connections, HTTP failures, timeouts and responses that
    /// could not be read at all.
    #[error("Node unreachable during {operation}")]
    Unreachable {
        /// RPC method or logical operation that failed
        operation: String,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The node answered with a JSON-RPC error object.
    ///
    /// Typical causes are insufficient balance, a locked sender account, a
    /// nonce conflict or an execution revert during `eth_call`.
    #[error("Node rejected {operation} (code {code}): {message}")]
    Rejected {
        /// RPC method that was rejected
        operation: String,
        /// JSON-RPC error code
        code: i64,
        /// Error message reported by the node
        message: String,
    },

    /// The node has no block for the requested selector.
    #[error("Block not found: {block}")]
    BlockNotFound {
        /// The block that was requested
        block: BlockSelector,
    },

    /// The node answered, but the payload cannot be represented locally.
    #[error("Invalid response to {operation}: {reason}")]
    InvalidResponse {
        /// RPC method whose response was unusable
        operation: String,
        /// Description of what was wrong
        reason: String,
    },

    /// The configured endpoint URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),
}

impl RpcError {
    /// Helper to create an `Unreachable` error from any error type.
    pub fn unreachable(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::Unreachable {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `Rejected` error.
    pub fn rejected(operation: impl Into<String>, code: i64, message: impl Into<String>) -> Self {
        RpcError::Rejected {
            operation: operation.into(),
            code,
            message: message.into(),
        }
    }

    /// Helper to create an `InvalidResponse` error.
    pub fn invalid_response(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        RpcError::InvalidResponse {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the node was not reachable.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, RpcError::Unreachable { .. })
    }

    /// Returns true if the node answered with an error response.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, RpcError::Rejected { .. })
    }
}
