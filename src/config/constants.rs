//! Well-known defaults
//!
//! This module centralizes magic constants used throughout the evmprobe crate,
//! improving discoverability and maintainability.

use std::time::Duration;

use alloy_primitives::U256;

/// Endpoint of a node running on the local machine
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Default gas price: 20 gwei
pub const DEFAULT_GAS_PRICE_WEI: U256 = U256::from_limbs([20_000_000_000, 0, 0, 0]);

/// Intrinsic gas of a plain value transfer
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Gas limit used for contract creation when none is given
pub const DEPLOY_GAS_LIMIT: u64 = 1_500_000;

/// Gas limit used for state-changing contract calls when none is given
pub const CALL_GAS_LIMIT: u64 = 100_000;

/// Spacing between receipt lookups
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// How long to wait for a receipt before giving up
pub const RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

/// Spacing between chain height checks while watching blocks
pub const BLOCK_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Shortest spacing used between polls; shorter intervals, zero included,
/// are raised to this
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);
