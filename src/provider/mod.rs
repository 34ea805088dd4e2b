// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP provider construction
//!
//! evmprobe components talk to the node through the
//! [`RpcTransport`](crate::RpcTransport) trait. This module builds the alloy
//! provider behind the production implementation of that trait.
//!
//! - [`create_http_provider`] - Create an alloy HTTP provider with optional RPC logging
//! - [`connect_http`] - Same, wrapped as an [`AlloyTransport`](crate::AlloyTransport)
//!
//! # Examples
//!
//! ```rust,ignore
//! use evmprobe::provider::{connect_http, ProviderConfig};
//! use evmprobe::RpcTransport;
//!
//! let transport = connect_http(&ProviderConfig::local_node("http://localhost:8545"))?;
//! let height = transport.block_number().await?;
//! ```

mod config;
mod factory;

pub use config::ProviderConfig;
pub use factory::{connect_http, create_http_provider};

use alloy_network::Ethereum;

/// HTTP provider for Ethereum-style JSON-RPC endpoints
pub type HttpProvider = alloy_provider::RootProvider<Ethereum>;
