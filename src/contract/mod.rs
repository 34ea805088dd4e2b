// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Contract deployment and calls
//!
//! - [`ContractInterface`] - functions and constructor parsed from a JSON ABI
//! - [`ContractDeployer`] - creation transactions, resolving the new address
//! - [`ContractCaller`] - `eth_call` for reads, transactions for writes
//!
//! Arguments and return values are [`DynSolValue`](alloy_dyn_abi::DynSolValue)s.

mod caller;
mod deployer;
mod interface;

pub use caller::ContractCaller;
pub use deployer::ContractDeployer;
pub use interface::{Constructor, ContractInterface, FunctionDescriptor, Mutability};
