// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for block polling
//!
//! All tests run on a paused tokio clock; the mock chain produces a block
//! every four seconds.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use evmprobe::{BlockMonitor, MonitorError, MonitorState};
use futures::StreamExt;
use helpers::MockTransport;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

const BLOCK_TIME: Duration = Duration::from_secs(4);
const POLL: Duration = Duration::from_secs(2);

fn chain() -> Arc<MockTransport> {
    Arc::new(MockTransport::new().with_block_time(BLOCK_TIME))
}

#[tokio::test(start_paused = true)]
async fn test_watch_yields_new_blocks_in_order() {
    let mock = chain();
    let monitor = BlockMonitor::new(mock.clone());
    let started = Instant::now();

    let (blocks, error) = monitor
        .watch(Duration::from_secs(10), POLL)
        .collect_blocks()
        .await;

    assert!(error.is_none());
    assert!((1..=3).contains(&blocks.len()), "got {} blocks", blocks.len());
    assert!(blocks.iter().all(|block| block.number > 100));
    assert!(blocks.windows(2).all(|pair| pair[0].number < pair[1].number));
    assert!(started.elapsed() <= Duration::from_secs(12));
}

#[tokio::test(start_paused = true)]
async fn test_watch_reports_every_height_once() {
    let mock = Arc::new(MockTransport::new().with_block_time(Duration::from_secs(1)));
    let monitor = BlockMonitor::new(mock.clone());

    let (blocks, error) = monitor
        .watch(Duration::from_secs(6), Duration::from_secs(3))
        .collect_blocks()
        .await;

    assert!(error.is_none());
    let numbers: Vec<u64> = blocks.iter().map(|block| block.number).collect();
    assert_eq!(numbers, (101..=106).collect::<Vec<_>>());
}

#[tokio::test(start_paused = true)]
async fn test_state_transitions() {
    let monitor = BlockMonitor::new(chain());
    let mut watch = monitor.watch(Duration::from_secs(5), POLL);
    assert_eq!(watch.state(), MonitorState::Idle);

    let first = watch.next().await;
    assert!(matches!(first, Some(Ok(_))));
    assert_eq!(watch.state(), MonitorState::Watching);

    while watch.next().await.is_some() {}
    assert_eq!(watch.state(), MonitorState::Done);
    assert!(watch.next().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_zero_duration_reads_height_only() {
    let mock = chain();
    let monitor = BlockMonitor::new(mock.clone());

    let (blocks, error) = monitor.watch(Duration::ZERO, POLL).collect_blocks().await;

    assert!(blocks.is_empty());
    assert!(error.is_none());
    assert_eq!(mock.calls_to("eth_blockNumber"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_zero_poll_interval_is_raised_to_the_floor() {
    let mock = chain();
    let monitor = BlockMonitor::new(mock.clone());
    let started = Instant::now();

    let (blocks, error) = monitor
        .watch(Duration::from_secs(1), Duration::ZERO)
        .collect_blocks()
        .await;

    assert!(blocks.is_empty());
    assert!(error.is_none());
    assert_eq!(started.elapsed(), Duration::from_secs(1));
    // start, then one height check every 100ms
    assert_eq!(mock.calls_to("eth_blockNumber"), 11);
}

#[tokio::test(start_paused = true)]
async fn test_start_failure_is_yielded_once() {
    let monitor = BlockMonitor::new(MockTransport::new().failing("eth_blockNumber"));
    let mut watch = monitor.watch(Duration::from_secs(10), POLL);

    assert!(matches!(
        watch.next().await,
        Some(Err(MonitorError::Start(_)))
    ));
    assert!(watch.next().await.is_none());
    assert_eq!(watch.state(), MonitorState::Done);
}

#[tokio::test(start_paused = true)]
async fn test_poll_failure_ends_the_watch() {
    // start and the first poll succeed, the poll at t = 4 s fails
    let mock = Arc::new(
        MockTransport::new()
            .with_block_time(BLOCK_TIME)
            .failing_block_number_after(2),
    );
    let monitor = BlockMonitor::new(mock.clone());

    let (blocks, error) = monitor
        .watch(Duration::from_secs(30), POLL)
        .collect_blocks()
        .await;

    assert!(blocks.is_empty());
    assert!(matches!(error, Some(MonitorError::Poll(_))));
    assert_eq!(mock.calls_to("eth_blockNumber"), 3);
}

#[tokio::test(start_paused = true)]
async fn test_fetch_failure_names_the_block() {
    let mock = Arc::new(
        MockTransport::new()
            .with_block_time(BLOCK_TIME)
            .with_failing_block(102),
    );
    let monitor = BlockMonitor::new(mock.clone());

    let (blocks, error) = monitor
        .watch(Duration::from_secs(30), POLL)
        .collect_blocks()
        .await;

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].number, 101);
    assert!(matches!(
        error,
        Some(MonitorError::Fetch {
            block_number: 102,
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_start_yields_nothing() {
    let mock = chain();
    let monitor = BlockMonitor::new(mock.clone());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut watch = monitor.watch_with_cancel(Duration::from_secs(10), POLL, cancel);

    assert!(watch.next().await.is_none());
    assert_eq!(watch.state(), MonitorState::Done);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_interrupts_sleep() {
    let mock = chain();
    let monitor = BlockMonitor::new(mock.clone());
    let cancel = CancellationToken::new();
    let started = Instant::now();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        trigger.cancel();
    });

    let (blocks, error) = monitor
        .watch_with_cancel(Duration::from_secs(60), POLL, cancel)
        .collect_blocks()
        .await;

    assert!(error.is_none());
    let numbers: Vec<u64> = blocks.iter().map(|block| block.number).collect();
    assert_eq!(numbers, [101]);
    assert_eq!(started.elapsed(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_block_fetched_during_cancellation_is_dropped() {
    // block 102 is requested at t = 9 s and would arrive at t = 12 s
    let mock = Arc::new(
        MockTransport::new()
            .with_block_time(BLOCK_TIME)
            .with_block_fetch_delay(Duration::from_secs(3)),
    );
    let monitor = BlockMonitor::new(mock.clone());
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(10)).await;
        trigger.cancel();
    });

    let (blocks, error) = monitor
        .watch_with_cancel(Duration::from_secs(60), POLL, cancel)
        .collect_blocks()
        .await;

    assert!(error.is_none());
    let numbers: Vec<u64> = blocks.iter().map(|block| block.number).collect();
    assert_eq!(numbers, [101]);
    assert_eq!(mock.calls_to("eth_getBlockByNumber"), 2);
}
