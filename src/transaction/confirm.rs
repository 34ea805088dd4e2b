// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded receipt polling

use std::time::Duration;

use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, Instrument};

use crate::config::constants::{MIN_POLL_INTERVAL, RECEIPT_POLL_INTERVAL, RECEIPT_TIMEOUT};
use crate::errors::TransactionError;
use crate::rpc::RpcTransport;
use crate::tracing::spans;
use crate::types::transaction::TransactionReceipt;

/// How often and for how long to look for a transaction receipt
///
/// # Example
///
/// ```rust
/// use evmprobe::ConfirmationPolicy;
/// use std::time::Duration;
///
/// let policy = ConfirmationPolicy::default().with_timeout(Duration::from_secs(30));
/// assert_eq!(policy.poll_interval, Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationPolicy {
    /// Spacing between receipt lookups, never less than
    /// [`MIN_POLL_INTERVAL`] when polling
    /// Default: 2 seconds
    pub poll_interval: Duration,
    /// Total time to wait before giving up
    /// Default: 120 seconds
    pub timeout: Duration,
}

impl ConfirmationPolicy {
    /// Create a policy from explicit values.
    ///
    /// A `poll_interval` below [`MIN_POLL_INTERVAL`] is raised to it.
    pub const fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval: clamp_interval(poll_interval),
            timeout,
        }
    }

    /// Replace the poll interval, raising it to at least [`MIN_POLL_INTERVAL`]
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = clamp_interval(poll_interval);
        self
    }

    /// Replace the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub(crate) const fn clamp_interval(interval: Duration) -> Duration {
    if interval.as_nanos() < MIN_POLL_INTERVAL.as_nanos() {
        MIN_POLL_INTERVAL
    } else {
        interval
    }
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self::new(RECEIPT_POLL_INTERVAL, RECEIPT_TIMEOUT)
    }
}

/// Poll for the receipt of `tx_hash` until it appears or the policy's
/// deadline passes.
///
/// The receipt is looked up immediately, then after every
/// `min(poll_interval, time left)`; one final lookup happens at the deadline.
pub(crate) async fn await_receipt<T>(
    transport: &T,
    tx_hash: TxHash,
    policy: &ConfirmationPolicy,
) -> Result<TransactionReceipt, TransactionError>
where
    T: RpcTransport + ?Sized,
{
    let span = spans::await_receipt(tx_hash, policy.timeout);
    async move {
        let started = Instant::now();
        let deadline = started + policy.timeout;
        // The field is public, so it may have been set below the floor
        let poll_interval = clamp_interval(policy.poll_interval);
        let mut polls: u64 = 0;

        loop {
            polls += 1;
            let lookup = transport
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|source| TransactionError::ReceiptLookup { tx_hash, source })?;

            if let Some(receipt) = lookup {
                tracing::Span::current().record("polls", polls);
                debug!(block_number = receipt.block_number, "receipt found");
                return Ok(receipt);
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::Span::current().record("polls", polls);
                return Err(TransactionError::ConfirmationTimeout {
                    tx_hash,
                    waited: now - started,
                });
            }

            let pause = poll_interval.min(deadline - now);
            debug!(pause_ms = pause.as_millis() as u64, "receipt pending");
            tokio::time::sleep(pause).await;
        }
    }
    .instrument(span)
    .await
}
