// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based logging layer for the node's JSON-RPC traffic.
//!
//! Every request is wrapped in an `evm_rpc` span carrying the method name and
//! the round-trip time. Transport failures are logged at WARN; JSON-RPC error
//! objects returned by the node are logged at DEBUG because callers usually
//! handle them (reverts, locked accounts).

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::TransportError;
use tower::Layer;
use tracing::{debug, trace, warn, Instrument};

/// A Tower layer that adds logging/tracing to RPC requests.
///
/// # Example
///
/// ```rust,ignore
/// use evmprobe::transport::LoggingLayer;
/// use alloy_rpc_client::ClientBuilder;
///
/// let client = ClientBuilder::default()
///     .layer(LoggingLayer::new())
///     .http(rpc_url);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoggingLayer {
    payloads: bool,
}

impl LoggingLayer {
    /// Log method names, timing and errors only
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log full request and response payloads at TRACE level
    ///
    /// Deployment requests carry the whole init code, so this gets noisy.
    pub fn verbose(mut self) -> Self {
        self.payloads = true;
        self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            payloads: self.payloads,
        }
    }
}

/// A Tower service that logs RPC requests and responses.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    payloads: bool,
}

impl<S> tower::Service<RequestPacket> for LoggingService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let payloads = self.payloads;
        let mut service = self.service.clone();
        let method = describe(&request);

        let span = tracing::debug_span!(
            "evm_rpc",
            method = %method,
            duration_ms = tracing::field::Empty,
        );

        Box::pin(
            async move {
                if payloads {
                    trace!(request = ?request, "RPC request");
                }

                let start = Instant::now();
                let result = service.call(request).await;
                let elapsed_ms = start.elapsed().as_millis() as u64;
                tracing::Span::current().record("duration_ms", elapsed_ms);

                match &result {
                    Ok(response) if response.is_error() => {
                        debug!(elapsed_ms, "node returned an error object");
                        if payloads {
                            trace!(response = ?response, "RPC response");
                        }
                    }
                    Ok(response) => {
                        debug!(elapsed_ms, "RPC ok");
                        if payloads {
                            trace!(response = ?response, "RPC response");
                        }
                    }
                    Err(e) => warn!(error = %e, elapsed_ms, "RPC transport failure"),
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Method name for a single request, or a summary for a batch
fn describe(request: &RequestPacket) -> String {
    match request {
        RequestPacket::Single(req) => req.method().to_string(),
        RequestPacket::Batch(reqs) => match reqs.as_slice() {
            [] => "batch(empty)".to_string(),
            [only] => only.method().to_string(),
            many => format!("batch({} calls)", many.len()),
        },
    }
}
