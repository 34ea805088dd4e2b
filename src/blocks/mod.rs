// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Watching the chain for new blocks.
//!
//! [`BlockMonitor`] polls `eth_blockNumber` at a fixed interval for a bounded
//! period and yields every block it has not seen before as a [`BlockWatch`]
//! stream.

mod monitor;

pub use monitor::{BlockMonitor, BlockWatch, MonitorState};
