//! Error types for network statistics.

use super::RpcError;

/// Errors that can occur while aggregating network statistics.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// One of the underlying queries failed, so no statistics are reported.
    #[error("Network stats unavailable: {query} failed")]
    Unavailable {
        /// The query that failed (`latest_block`, `gas_price` or `chain_id`)
        query: &'static str,
        /// The underlying RPC error
        #[source]
        source: RpcError,
    },
}

impl StatsError {
    /// Create an `Unavailable` error for the named query.
    pub fn unavailable(query: &'static str, source: RpcError) -> Self {
        StatsError::Unavailable { query, source }
    }
}
