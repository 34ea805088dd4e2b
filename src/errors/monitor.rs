//! Error types for block monitoring.

use super::RpcError;

/// Errors yielded by a [`BlockWatch`](crate::BlockWatch) stream.
///
/// A watch yields at most one error and then ends.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Reading the starting chain height failed.
    #[error("Failed to read starting block height")]
    Start(#[source] RpcError),

    /// Polling the chain height failed.
    #[error("Failed to poll block height")]
    Poll(#[source] RpcError),

    /// Fetching a newly observed block failed.
    #[error("Failed to fetch block {block_number}")]
    Fetch {
        /// The block that could not be fetched
        block_number: u64,
        /// The underlying RPC error
        #[source]
        source: RpcError,
    },
}
