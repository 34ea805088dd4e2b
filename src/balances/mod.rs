// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Native balance reads
//!
//! [`BalanceReader`] queries `eth_getBalance` for several addresses, one at a
//! time and in the order given. A failed lookup does not abort the batch: the
//! address is reported with a zero amount and the error, and the remaining
//! lookups continue.
//!
//! # Example
//!
//! ```rust,ignore
//! use evmprobe::{BalanceReader, Denomination, format_units};
//!
//! let reader = BalanceReader::new(transport);
//! for (address, lookup) in reader.get_balances([alice, bob]).await {
//!     match &lookup.error {
//!         None => println!("{address}: {} ETH", format_units(lookup.amount, Denomination::Ether)),
//!         Some(e) => eprintln!("{address}: {e}"),
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use tracing::{info, warn, Instrument};

use crate::accounts::AccountRegistry;
use crate::errors::RpcError;
use crate::rpc::RpcTransport;
use crate::tracing::spans;
use crate::types::units::{format_units, Denomination};

/// Outcome of one balance lookup
///
/// `amount` is zero whenever `error` is set.
#[derive(Debug)]
pub struct BalanceLookup {
    /// Balance in wei
    pub amount: U256,
    /// Why the lookup failed, if it did
    pub error: Option<RpcError>,
}

impl BalanceLookup {
    fn found(amount: U256) -> Self {
        Self {
            amount,
            error: None,
        }
    }

    fn failed(error: RpcError) -> Self {
        Self {
            amount: U256::ZERO,
            error: Some(error),
        }
    }

    /// Returns true if the balance was read
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Amount rendered in `unit`, or `None` if the lookup failed
    pub fn display_in(&self, unit: Denomination) -> Option<String> {
        self.is_ok().then(|| format_units(self.amount, unit))
    }
}

/// Balance of a registered account
#[derive(Debug)]
pub struct NamedBalance {
    /// Registry name
    pub name: String,
    /// Account address
    pub address: Address,
    /// Lookup outcome
    pub lookup: BalanceLookup,
}

/// Reads native balances through an [`RpcTransport`]
#[derive(Debug, Clone)]
pub struct BalanceReader<T> {
    transport: T,
}

impl<T: RpcTransport> BalanceReader<T> {
    /// Create a reader over `transport`
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Look up the balance of every address, keyed by address.
    ///
    /// Each distinct address is queried exactly once, in first-seen order.
    pub async fn get_balances<I>(&self, addresses: I) -> BTreeMap<Address, BalanceLookup>
    where
        I: IntoIterator<Item = Address>,
    {
        let addresses: Vec<Address> = addresses.into_iter().collect();
        let span = spans::get_balances(addresses.len());

        async move {
            let mut balances = BTreeMap::new();
            for address in addresses {
                if balances.contains_key(&address) {
                    continue;
                }
                let lookup = self.lookup(address).await;
                balances.insert(address, lookup);
            }

            let failed = balances.values().filter(|l| !l.is_ok()).count();
            info!(
                count = balances.len(),
                failed, "balance lookups finished"
            );
            balances
        }
        .instrument(span)
        .await
    }

    /// Look up the balance of every registered account, in registry order.
    pub async fn get_named_balances(&self, accounts: &AccountRegistry) -> Vec<NamedBalance> {
        let span = spans::get_balances(accounts.len());

        async move {
            let mut rows = Vec::with_capacity(accounts.len());
            for account in accounts.iter() {
                rows.push(NamedBalance {
                    name: account.name.clone(),
                    address: account.address,
                    lookup: self.lookup(account.address).await,
                });
            }
            rows
        }
        .instrument(span)
        .await
    }

    async fn lookup(&self, address: Address) -> BalanceLookup {
        match self.transport.get_balance(address).await {
            Ok(amount) => BalanceLookup::found(amount),
            Err(e) => {
                warn!(
                    ?address,
                    error = %e,
                    "Failed to fetch balance"
                );
                BalanceLookup::failed(e)
            }
        }
    }
}
