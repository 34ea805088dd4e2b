// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for network statistics and node health

mod helpers;

use std::sync::Arc;

use alloy_chains::NamedChain;
use alloy_primitives::U256;
use evmprobe::{NetworkStatsReader, NodeHealth, RpcError, StatsError, SyncState};
use helpers::MockTransport;

#[tokio::test]
async fn test_stats_snapshot() {
    let mock = Arc::new(
        MockTransport::new()
            .with_height(19_000_000)
            .with_chain_id(1)
            .with_gas_price(U256::from(12_500_000_000u64)),
    );
    let reader = NetworkStatsReader::new(mock.clone());

    let stats = reader.get_stats().await.unwrap();

    assert_eq!(stats.latest_block.number, 19_000_000);
    assert_eq!(stats.gas_price, U256::from(12_500_000_000u64));
    assert_eq!(stats.chain_id, 1);
    assert_eq!(stats.chain(), Some(NamedChain::Mainnet));
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test]
async fn test_stats_are_not_cached() {
    let mock = Arc::new(MockTransport::new());
    let reader = NetworkStatsReader::new(mock.clone());

    reader.get_stats().await.unwrap();
    reader.get_stats().await.unwrap();

    assert_eq!(mock.call_count(), 6);
}

#[tokio::test]
async fn test_failed_query_makes_stats_unavailable() {
    let mock = Arc::new(MockTransport::new().failing("eth_gasPrice"));
    let reader = NetworkStatsReader::new(mock.clone());

    let err = reader.get_stats().await.unwrap_err();

    match err {
        StatsError::Unavailable { query, source } => {
            assert_eq!(query, "gas_price");
            assert!(source.is_unreachable());
        }
    }
    assert_eq!(mock.calls_to("eth_chainId"), 0);
}

#[tokio::test]
async fn test_missing_latest_block_is_reported() {
    let reader = NetworkStatsReader::new(MockTransport::new().failing("eth_getBlockByNumber"));

    let err = reader.get_stats().await.unwrap_err();

    assert!(matches!(
        err,
        StatsError::Unavailable {
            query: "latest_block",
            ..
        }
    ));
}

#[tokio::test]
async fn test_health_check_of_dev_node() {
    let health = NodeHealth::new(MockTransport::new().with_height(12));

    let status = health.check().await.unwrap();

    assert_eq!(status.chain_id, 31337);
    assert_eq!(status.network_id, 31337);
    assert_eq!(status.latest_block, 12);
    assert_eq!(status.sync, SyncState::Synced);
    assert_eq!(status.client_version, "anvil/v1.0.0");
    assert!(status.is_healthy());
}

#[tokio::test]
async fn test_health_check_of_syncing_node() {
    let syncing = SyncState::Syncing {
        starting_block: 0,
        current_block: 18_000_000,
        highest_block: 19_000_000,
    };
    let health = NodeHealth::new(
        MockTransport::new()
            .with_chain_id(1)
            .with_peers(12)
            .with_sync(syncing),
    );

    let status = health.check().await.unwrap();

    assert_eq!(status.peer_count, 12);
    assert_eq!(status.sync.blocks_behind(), 1_000_000);
    assert!(!status.is_healthy());
}

#[tokio::test]
async fn test_unreachable_node() {
    let health = NodeHealth::new(MockTransport::new().unreachable());

    assert!(!health.is_connected().await);
    let err = health.check().await.unwrap_err();
    assert!(matches!(err, RpcError::Unreachable { .. }));
}
