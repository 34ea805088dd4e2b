// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across evmprobe.
//!
//! This module provides the data model shared by every component:
//! - Denominations and base-unit conversions
//! - Block snapshots and block selectors
//! - Transaction requests, receipts and gas settings

pub mod block;
pub mod transaction;
pub mod units;

// Note: Public types are re-exported from lib.rs, not here
