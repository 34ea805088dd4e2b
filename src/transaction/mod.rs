// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transaction submission and receipt tracking
//!
//! [`TransactionSubmitter`] resolves accounts, builds the request, hands it to
//! the node via `eth_sendTransaction` and polls for the receipt under a
//! [`ConfirmationPolicy`]. Contract deployment and mutating calls reuse the
//! same submit-and-confirm path.

pub(crate) mod confirm;
mod submitter;

pub use confirm::ConfirmationPolicy;
pub use submitter::TransactionSubmitter;
