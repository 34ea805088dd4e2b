// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded block polling

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, Span};

use crate::errors::MonitorError;
use crate::transaction::confirm::clamp_interval;
use crate::rpc::RpcTransport;
use crate::tracing::spans;
use crate::types::block::{Block, BlockSelector};

/// Lifecycle of a [`BlockWatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Created but not polled yet
    Idle,
    /// Polling the node for new blocks
    Watching,
    /// Finished: time is up, the watch was cancelled or a request failed
    Done,
}

/// Polls the node for new blocks over a bounded period
///
/// # Example
///
/// ```rust,ignore
/// use evmprobe::BlockMonitor;
/// use futures::StreamExt;
/// use std::time::Duration;
///
/// let monitor = BlockMonitor::new(transport);
/// let mut watch = monitor.watch(Duration::from_secs(30), Duration::from_secs(2));
/// while let Some(block) = watch.next().await {
///     let block = block?;
///     println!("block {} with {} transactions", block.number, block.transaction_count);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BlockMonitor<T> {
    transport: T,
}

impl<T: RpcTransport> BlockMonitor<T> {
    /// Create a monitor over `transport`
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Watch for new blocks for `duration_limit`, checking the chain height
    /// every `poll_interval`.
    ///
    /// Nothing happens until the returned stream is polled; the clock starts
    /// with the first poll. A `poll_interval` below
    /// [`MIN_POLL_INTERVAL`](crate::config::constants::MIN_POLL_INTERVAL) is
    /// raised to it.
    pub fn watch(&self, duration_limit: Duration, poll_interval: Duration) -> BlockWatch<'_> {
        self.watch_with_cancel(duration_limit, poll_interval, CancellationToken::new())
    }

    /// Like [`BlockMonitor::watch`], ending early once `cancel` fires.
    ///
    /// Cancellation interrupts a pending sleep or request. A block whose fetch
    /// was in flight at that moment is dropped, never yielded.
    pub fn watch_with_cancel(
        &self,
        duration_limit: Duration,
        poll_interval: Duration,
        cancel: CancellationToken,
    ) -> BlockWatch<'_> {
        let poll_interval = clamp_interval(poll_interval);
        let span = spans::watch_blocks(duration_limit, poll_interval);
        let state = WatchLoop {
            transport: &self.transport,
            duration_limit,
            poll_interval,
            cancel,
            phase: Phase::Start,
            deadline: None,
            last_seen: 0,
            pending: VecDeque::new(),
            span: span.clone(),
        };

        BlockWatch {
            inner: stream::unfold(state, WatchLoop::step).boxed(),
            state: MonitorState::Idle,
            span,
        }
    }
}

/// Finite stream of new blocks produced by [`BlockMonitor::watch`]
///
/// Blocks come out in strictly increasing height order. A failed request is
/// yielded once as an error and ends the stream.
pub struct BlockWatch<'a> {
    inner: Pin<Box<dyn Stream<Item = Result<Block, MonitorError>> + Send + 'a>>,
    state: MonitorState,
    span: Span,
}

impl BlockWatch<'_> {
    /// Where this watch is in its lifecycle
    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Drive the watch to completion.
    ///
    /// Returns the blocks seen, plus the error that ended the watch early, if
    /// any.
    pub async fn collect_blocks(mut self) -> (Vec<Block>, Option<MonitorError>) {
        let mut blocks = Vec::new();
        while let Some(item) = self.next().await {
            match item {
                Ok(block) => blocks.push(block),
                Err(e) => return (blocks, Some(e)),
            }
        }
        (blocks, None)
    }
}

impl std::fmt::Debug for BlockWatch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockWatch")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Stream for BlockWatch<'_> {
    type Item = Result<Block, MonitorError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.state == MonitorState::Done {
            return Poll::Ready(None);
        }
        self.state = MonitorState::Watching;

        let span = self.span.clone();
        let _enter = span.enter();
        let polled = self.inner.as_mut().poll_next(cx);
        if let Poll::Ready(None) = polled {
            self.state = MonitorState::Done;
            info!("block watch finished");
        }
        polled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Running,
    Finished,
}

struct WatchLoop<'a, T> {
    transport: &'a T,
    duration_limit: Duration,
    poll_interval: Duration,
    cancel: CancellationToken,
    phase: Phase,
    deadline: Option<Instant>,
    last_seen: u64,
    pending: VecDeque<u64>,
    span: Span,
}

impl<'a, T: RpcTransport> WatchLoop<'a, T> {
    async fn step(mut self) -> Option<(Result<Block, MonitorError>, Self)> {
        loop {
            if self.cancel.is_cancelled() {
                self.phase = Phase::Finished;
            }

            match self.phase {
                Phase::Finished => return None,
                Phase::Start => {
                    self.deadline = Some(Instant::now() + self.duration_limit);
                    let height = tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => {
                            self.phase = Phase::Finished;
                            continue;
                        }
                        height = self.transport.block_number() => height,
                    };
                    match height {
                        Ok(height) => {
                            debug!(height, "watch started");
                            self.remember(height);
                            self.phase = Phase::Running;
                        }
                        Err(e) => {
                            self.phase = Phase::Finished;
                            return Some((Err(MonitorError::Start(e)), self));
                        }
                    }
                }
                Phase::Running => {
                    if let Some(number) = self.pending.pop_front() {
                        let fetched = tokio::select! {
                            biased;
                            _ = self.cancel.cancelled() => {
                                debug!(number, "cancelled while fetching, dropping block");
                                self.phase = Phase::Finished;
                                continue;
                            }
                            block = self.transport.get_block(BlockSelector::Number(number)) => block,
                        };
                        return match fetched {
                            Ok(block) => {
                                self.remember(number);
                                Some((Ok(block), self))
                            }
                            Err(source) => {
                                self.phase = Phase::Finished;
                                Some((
                                    Err(MonitorError::Fetch {
                                        block_number: number,
                                        source,
                                    }),
                                    self,
                                ))
                            }
                        };
                    }

                    let now = Instant::now();
                    let deadline = self.deadline.unwrap_or(now);
                    if now >= deadline {
                        self.phase = Phase::Finished;
                        continue;
                    }

                    let pause = self.poll_interval.min(deadline - now);
                    tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => {
                            self.phase = Phase::Finished;
                            continue;
                        }
                        _ = tokio::time::sleep(pause) => {}
                    }

                    let height = tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => {
                            self.phase = Phase::Finished;
                            continue;
                        }
                        height = self.transport.block_number() => height,
                    };
                    match height {
                        Ok(height) if height > self.last_seen => {
                            debug!(from = self.last_seen + 1, to = height, "new blocks");
                            self.pending.extend(self.last_seen + 1..=height);
                        }
                        Ok(_) => {}
                        Err(e) => {
                            self.phase = Phase::Finished;
                            return Some((Err(MonitorError::Poll(e)), self));
                        }
                    }
                }
            }
        }
    }

    fn remember(&mut self, height: u64) {
        self.last_seen = height;
        self.span.record("last_seen", height);
    }
}
