// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory functions

use alloy_network::Ethereum;
use alloy_provider::ProviderBuilder;
use alloy_rpc_client::ClientBuilder;

use crate::errors::RpcError;
use crate::rpc::AlloyTransport;
use crate::transport::LoggingLayer;

use super::config::ProviderConfig;
use super::HttpProvider;

/// Create an HTTP provider with the given configuration
///
/// Recommended fillers are disabled: the node fills nonce and chain id for
/// `eth_sendTransaction`, and gas is always set explicitly by the caller.
///
/// # Examples
///
/// ```rust,ignore
/// use evmprobe::provider::{create_http_provider, ProviderConfig};
///
/// let provider = create_http_provider(&ProviderConfig::local_node("http://localhost:8545"))?;
/// let block_number = provider.get_block_number().await?;
/// ```
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_provider(config: &ProviderConfig) -> Result<HttpProvider, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{}: {e}", config.url)))?;

    if !config.logging_enabled {
        return Ok(ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<Ethereum>()
            .connect_http(url));
    }

    let layer = if config.verbose_logging {
        LoggingLayer::new().verbose()
    } else {
        LoggingLayer::new()
    };
    let client = ClientBuilder::default().layer(layer).http(url);

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .network::<Ethereum>()
        .connect_client(client))
}

/// Create an HTTP provider and wrap it as an [`RpcTransport`](crate::RpcTransport)
///
/// The configured timeout is enforced per request by the returned transport.
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn connect_http(config: &ProviderConfig) -> Result<AlloyTransport<HttpProvider>, RpcError> {
    let provider = create_http_provider(config)?;
    let transport = AlloyTransport::new(provider);
    Ok(match config.timeout {
        Some(timeout) => transport.with_timeout(timeout),
        None => transport,
    })
}
