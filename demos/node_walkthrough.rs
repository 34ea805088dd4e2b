// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Walk through every evmprobe component against a local development node
//!
//! Start a node with unlocked accounts first, e.g. `anvil`, then run:
//!
//! ```bash
//! RPC_URL=http://localhost:8545 cargo run --example node_walkthrough
//! ```
//!
//! Environment (a `.env` file works too):
//! - `RPC_URL` - node endpoint, default `http://localhost:8545`
//! - `ACCOUNT1` / `ACCOUNT2` - sender and recipient, default the first two anvil accounts
//! - `WATCH_SECS` - how long to watch for blocks, default 10
//! - `RUST_LOG` - log filter, default `info`

use std::env;
use std::time::Duration;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{address, bytes, Address, Bytes, U256};
use anyhow::{Context, Result};
use evmprobe::{
    format_units, parse_units, ClientConfigBuilder, ContractInterface, Denomination, EvmClient,
};
use futures::StreamExt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const ANVIL_ACCOUNT1: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
const ANVIL_ACCOUNT2: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

/// Simple storage contract exposing `retrieve()` and `store(uint256)`
const STORAGE_BYTECODE: Bytes = bytes!("608060405234801561001057600080fd5b50610150806100206000396000f3fe608060405234801561001057600080fd5b50600436106100365760003560e01c80632e64cec11461003b5780636057361d14610059575b600080fd5b610043610075565b60405161005091906100a1565b60405180910390f35b610073600480360381019061006e91906100ed565b61007e565b005b60008054905090565b8060008190555050565b6000819050919050565b61009b81610088565b82525050565b60006020820190506100b66000830184610092565b92915050565b600080fd5b6100ca81610088565b81146100d557600080fd5b50565b6000813590506100e7816100c1565b92915050565b600060208284031215610103576101026100bc565b5b6000610111848285016100d8565b9150509291505056fea26469706673582212207f6d9a1c8a5c4d2e8b9f6a3c1e8f7d6b9c2a5e8f1d4b7a9c6e3f2d5c8b0a1e4f64736f6c634300080f0033");

const STORAGE_ABI: &str = r#"[
  {"type":"function","name":"retrieve","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
  {"type":"function","name":"store","inputs":[{"name":"num","type":"uint256"}],"outputs":[],"stateMutability":"nonpayable"}
]"#;

fn account_from_env(key: &str, default: Address) -> Result<Address> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{key} is not an address")),
        Err(_) => Ok(default),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    dotenvy::dotenv().ok();

    let rpc_url = env::var("RPC_URL").unwrap_or_else(|_| "http://localhost:8545".to_string());
    let watch_secs: u64 = env::var("WATCH_SECS")
        .ok()
        .map(|s| s.parse())
        .transpose()
        .context("WATCH_SECS must be a number of seconds")?
        .unwrap_or(10);

    let config = ClientConfigBuilder::new()
        .rpc_url(&rpc_url)
        .account("account1", account_from_env("ACCOUNT1", ANVIL_ACCOUNT1)?)
        .account("account2", account_from_env("ACCOUNT2", ANVIL_ACCOUNT2)?)
        .build()?;
    let client = EvmClient::connect(config)?;

    // Connection
    if !client.health().is_connected().await {
        anyhow::bail!("no node answering at {rpc_url}");
    }
    let status = client.node_status().await?;
    println!(
        "Connected to {} (chain {}, block {}, {} peers, synced: {})",
        status.client_version,
        status.chain_id,
        status.latest_block,
        status.peer_count,
        status.sync.is_synced()
    );

    // Balances
    println!("\nBalances:");
    for row in client.get_account_balances().await {
        match row.lookup.display_in(Denomination::Ether) {
            Some(ether) => println!("  {} ({}): {ether} ETH", row.name, row.address),
            None => println!("  {} ({}): unavailable", row.name, row.address),
        }
    }

    // Value transfer
    let amount = parse_units("1", Denomination::Ether)?;
    let receipt = client.send_value("account1", "account2", amount).await?;
    println!(
        "\nSent 1 ETH in {} (block {}, {} gas, status {})",
        receipt.hash,
        receipt.block_number,
        receipt.gas_used,
        if receipt.succeeded() { "ok" } else { "reverted" }
    );

    // Contract deployment and calls
    let interface = ContractInterface::from_json_abi(STORAGE_ABI)?;
    let contract = client
        .deploy(STORAGE_BYTECODE, &interface, "account1")
        .await?;
    println!("\nStorage contract deployed at {contract}");
    if !client.has_code(contract).await? {
        anyhow::bail!("no code at {contract} after deployment");
    }

    let stored = client
        .call_mutating(
            contract,
            &interface,
            "store",
            &[DynSolValue::Uint(U256::from(42), 256)],
            "account1",
        )
        .await?;
    println!("store(42) included in block {}", stored.block_number);

    let values = client
        .call_view(contract, &interface, "retrieve", &[])
        .await?;
    if let Some((value, _)) = values.first().and_then(DynSolValue::as_uint) {
        println!("retrieve() = {value}");
    }

    // Network stats
    let stats = client.get_stats().await?;
    println!(
        "\nLatest block {} with {} transactions, gas price {} gwei, chain {}",
        stats.latest_block.number,
        stats.latest_block.transaction_count,
        format_units(stats.gas_price, Denomination::Gwei),
        stats
            .chain()
            .map(|chain| chain.to_string())
            .unwrap_or_else(|| stats.chain_id.to_string())
    );

    // Block monitor
    println!("\nWatching for new blocks for {watch_secs}s...");
    let mut watch = client.watch(Duration::from_secs(watch_secs), Duration::from_secs(2));
    while let Some(block) = watch.next().await {
        let block = block?;
        println!(
            "  block {} at {}: {} transactions, {:.1}% gas used",
            block.number,
            block
                .timestamp_utc()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| block.timestamp.to_string()),
            block.transaction_count,
            block.gas_utilization() * 100.0
        );
    }

    Ok(())
}
