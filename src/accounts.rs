// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Named account registry
//!
//! The registry maps human-readable names to addresses. It is built once from
//! configuration and exposes no mutating API afterwards.

use std::str::FromStr;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// A named on-chain account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Human-readable name
    pub name: String,
    /// On-chain address
    pub address: Address,
}

/// Refers to an account either by registry name or by raw address.
///
/// Parsing tries an address first and falls back to a name, so
/// `"0x742d…f44e".parse()` yields [`AccountRef::Address`] and `"alice".parse()`
/// yields [`AccountRef::Name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccountRef {
    /// Look the account up by name
    Name(String),
    /// Use this address directly
    Address(Address),
}

impl FromStr for AccountRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<Address>() {
            Ok(address) => Self::Address(address),
            Err(_) => Self::Name(s.to_string()),
        })
    }
}

impl From<&str> for AccountRef {
    fn from(value: &str) -> Self {
        match value.parse::<Address>() {
            Ok(address) => Self::Address(address),
            Err(_) => Self::Name(value.to_string()),
        }
    }
}

impl From<String> for AccountRef {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Address> for AccountRef {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl std::fmt::Display for AccountRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Address(address) => write!(f, "{address}"),
        }
    }
}

/// Read-only mapping from account name to address.
///
/// Insertion order is preserved, so listings come out in the order the
/// accounts were configured.
///
/// # Examples
///
/// ```
/// use alloy_primitives::address;
/// use evmprobe::{AccountRef, AccountRegistry};
///
/// let registry = AccountRegistry::new([
///     ("account1", address!("742d35Cc6634C0532925a3b844Bc454e4438f44e")),
///     ("account2", address!("70997970C51812dc3A010C7d01b50e0d17dc79C8")),
/// ])
/// .unwrap();
///
/// assert_eq!(registry.len(), 2);
/// assert!(registry.resolve_known(&AccountRef::from("account1")).is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    /// Build a registry from `(name, address)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateAccount`] if a name appears twice.
    pub fn new<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, Address)>,
        S: Into<String>,
    {
        let mut accounts: Vec<Account> = Vec::new();
        for (name, address) in entries {
            let name = name.into();
            if accounts.iter().any(|a| a.name == name) {
                return Err(ConfigError::DuplicateAccount { name });
            }
            accounts.push(Account { name, address });
        }
        Ok(Self { accounts })
    }

    /// An empty registry
    pub fn empty() -> Self {
        Self::default()
    }

    /// Address registered under `name`
    pub fn get(&self, name: &str) -> Option<Address> {
        self.accounts
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.address)
    }

    /// Name registered for `address`, if any
    pub fn name_of(&self, address: &Address) -> Option<&str> {
        self.accounts
            .iter()
            .find(|a| &a.address == address)
            .map(|a| a.name.as_str())
    }

    /// Returns true if `address` is registered under any name
    pub fn contains_address(&self, address: &Address) -> bool {
        self.accounts.iter().any(|a| &a.address == address)
    }

    /// Resolve a reference that must belong to the registry.
    ///
    /// Names are looked up; raw addresses must be registered too.
    pub fn resolve_known(&self, account: &AccountRef) -> Option<Address> {
        match account {
            AccountRef::Name(name) => self.get(name),
            AccountRef::Address(address) => {
                self.contains_address(address).then_some(*address)
            }
        }
    }

    /// Resolve a reference that may point outside the registry.
    ///
    /// Names must be registered; raw addresses are accepted as-is.
    pub fn resolve(&self, account: &AccountRef) -> Option<Address> {
        match account {
            AccountRef::Name(name) => self.get(name),
            AccountRef::Address(address) => Some(*address),
        }
    }

    /// Registered accounts in configuration order
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    /// Registered addresses in configuration order
    pub fn addresses(&self) -> Vec<Address> {
        self.accounts.iter().map(|a| a.address).collect()
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if no accounts are registered
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Serialize for AccountRegistry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.accounts.len()))?;
        for account in &self.accounts {
            map.serialize_entry(&account.name, &account.address)?;
        }
        map.end()
    }
}

/// Reads a JSON object of `name -> address` in document order, e.g.
/// `{"account1": "0x742d35Cc6634C0532925a3b844Bc454e4438f44e"}`.
impl<'de> Deserialize<'de> for AccountRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(RegistryVisitor)
    }
}

struct RegistryVisitor;

impl<'de> serde::de::Visitor<'de> for RegistryVisitor {
    type Value = AccountRegistry;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a map of account name to address")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut pairs = Vec::new();
        while let Some((name, address)) = map.next_entry::<String, Address>()? {
            pairs.push((name, address));
        }
        AccountRegistry::new(pairs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const ACCOUNT1: Address = address!("742d35Cc6634C0532925a3b844Bc454e4438f44e");
    const ACCOUNT2: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
    const STRANGER: Address = address!("90F79bf6EB2c4f870365E785982E1f101E93b906");

    fn registry() -> AccountRegistry {
        AccountRegistry::new([("account1", ACCOUNT1), ("account2", ACCOUNT2)]).unwrap()
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = registry();
        assert_eq!(registry.get("account1"), Some(ACCOUNT1));
        assert_eq!(registry.get("missing"), None);
        assert_eq!(registry.name_of(&ACCOUNT2), Some("account2"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = AccountRegistry::new([("a", ACCOUNT1), ("a", ACCOUNT2)]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateAccount { name } if name == "a"));
    }

    #[test]
    fn test_resolve_known_requires_membership() {
        let registry = registry();
        assert_eq!(
            registry.resolve_known(&AccountRef::Address(ACCOUNT1)),
            Some(ACCOUNT1)
        );
        assert_eq!(registry.resolve_known(&AccountRef::Address(STRANGER)), None);
        assert_eq!(registry.resolve_known(&"nobody".into()), None);
    }

    #[test]
    fn test_resolve_accepts_any_address() {
        let registry = registry();
        assert_eq!(
            registry.resolve(&AccountRef::Address(STRANGER)),
            Some(STRANGER)
        );
        assert_eq!(registry.resolve(&"account2".into()), Some(ACCOUNT2));
        assert_eq!(registry.resolve(&"nobody".into()), None);
    }

    #[test]
    fn test_account_ref_parsing() {
        let by_address: AccountRef = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e".into();
        assert_eq!(by_address, AccountRef::Address(ACCOUNT1));

        let by_name: AccountRef = "account1".parse().unwrap();
        assert_eq!(by_name, AccountRef::Name("account1".to_string()));
    }

    #[test]
    fn test_preserves_order() {
        let names: Vec<_> = registry().iter().map(|a| a.name.clone()).collect();
        assert_eq!(names, vec!["account1", "account2"]);
        assert_eq!(registry().addresses(), vec![ACCOUNT1, ACCOUNT2]);
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let json = r#"{
            "account1": "0x742d35Cc6634C0532925a3b844Bc454e4438f44e",
            "account2": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
        }"#;
        let registry: AccountRegistry = serde_json::from_str(json).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("account2"), Some(ACCOUNT2));
    }

    #[test]
    fn test_json_round_trip_keeps_document_order() {
        let json = r#"{"zeta":"0x742d35cc6634c0532925a3b844bc454e4438f44e","alpha":"0x70997970c51812dc3a010c7d01b50e0d17dc79c8"}"#;
        let registry: AccountRegistry = serde_json::from_str(json).unwrap();
        let names: Vec<_> = registry.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);

        let back: AccountRegistry =
            serde_json::from_str(&serde_json::to_string(&registry).unwrap()).unwrap();
        assert_eq!(back, registry);
    }

    #[test]
    fn test_deserialize_rejects_duplicate_names() {
        let json = r#"{"a":"0x742d35cc6634c0532925a3b844bc454e4438f44e","a":"0x70997970c51812dc3a010c7d01b50e0d17dc79c8"}"#;
        assert!(serde_json::from_str::<AccountRegistry>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_bad_address() {
        let json = r#"{"account1": "0x1234"}"#;
        assert!(serde_json::from_str::<AccountRegistry>(json).is_err());
    }
}
