// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for evmprobe operations.
//!
//! Telemetry is kept out of the business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a matching helper here and
//! attaches the span to its future.
//!
//! Usage pattern:
//! ```rust,ignore
//! use tracing::Instrument;
//!
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(param_value))
//!     .await
//! }
//! ```

use std::time::Duration;

use alloy_primitives::{Address, TxHash, U256};
use tracing::{Level, Span};

/// Create span for reading balances of several addresses.
///
/// Parent: None (root span for this operation)
/// Children: `evm_rpc` spans, one `eth_getBalance` per address
#[inline]
pub(crate) fn get_balances(address_count: usize) -> Span {
    tracing::span!(
        Level::INFO,
        "evmprobe.get_balances",
        address_count = address_count,
    )
}

/// Create span for a value transfer from submission to receipt.
///
/// Parent: None (root span for this operation)
/// Children: await_receipt span
#[inline]
pub(crate) fn send_value(from: Address, to: Address, value: U256) -> Span {
    tracing::span!(
        Level::INFO,
        "evmprobe.send_value",
        from = %from,
        to = %to,
        value = %value,
    )
}

/// Create span for polling a receipt until inclusion or timeout.
///
/// Parent: send_value, deploy or call_mutating span
/// Children: `evm_rpc` spans for `eth_getTransactionReceipt`
#[inline]
pub(crate) fn await_receipt(tx_hash: TxHash, timeout: Duration) -> Span {
    tracing::debug_span!(
        "evmprobe.await_receipt",
        tx_hash = %tx_hash,
        timeout_ms = timeout.as_millis() as u64,
        polls = tracing::field::Empty,
    )
}

/// Create span for a contract deployment.
///
/// Parent: None (root span for this operation)
/// Children: await_receipt span
#[inline]
pub(crate) fn deploy(from: Address, init_code_len: usize) -> Span {
    tracing::span!(
        Level::INFO,
        "evmprobe.deploy",
        from = %from,
        init_code_len = init_code_len,
    )
}

/// Create span for a read-only contract call.
///
/// Parent: None (root span for this operation)
#[inline]
pub(crate) fn call_view(contract: Address, function: &str) -> Span {
    tracing::span!(
        Level::INFO,
        "evmprobe.call_view",
        contract = %contract,
        function = function,
    )
}

/// Create span for a state-changing contract call.
///
/// Parent: None (root span for this operation)
/// Children: await_receipt span
#[inline]
pub(crate) fn call_mutating(contract: Address, function: &str, from: Address) -> Span {
    tracing::span!(
        Level::INFO,
        "evmprobe.call_mutating",
        contract = %contract,
        function = function,
        from = %from,
    )
}

/// Create span covering a whole block watch.
///
/// The span lives as long as the stream and is entered on every poll.
#[inline]
pub(crate) fn watch_blocks(duration_limit: Duration, poll_interval: Duration) -> Span {
    tracing::span!(
        Level::INFO,
        "evmprobe.watch_blocks",
        duration_limit_ms = duration_limit.as_millis() as u64,
        poll_interval_ms = poll_interval.as_millis() as u64,
        last_seen = tracing::field::Empty,
    )
}

/// Create span for reading network statistics.
///
/// Parent: None (root span for this operation)
#[inline]
pub(crate) fn get_stats() -> Span {
    tracing::span!(Level::INFO, "evmprobe.get_stats")
}

/// Create span for a node health check.
///
/// Parent: None (root span for this operation)
#[inline]
pub(crate) fn health_check() -> Span {
    tracing::span!(Level::INFO, "evmprobe.health_check")
}
