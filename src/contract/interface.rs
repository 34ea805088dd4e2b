// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Runtime contract interfaces
//!
//! A [`ContractInterface`] is an ordered list of [`FunctionDescriptor`]s and an
//! optional constructor, loaded from a standard JSON ABI or built by hand.
//! Parameter types are [`DynSolType`]s, so any contract can be described
//! without code generation.

use std::fmt;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{keccak256, Bytes, Selector};
use serde::{Deserialize, Serialize};

use crate::errors::ContractError;

/// Solidity state mutability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    /// Reads neither state nor environment
    Pure,
    /// Reads but does not modify state
    View,
    /// Modifies state, rejects value
    NonPayable,
    /// Modifies state, accepts value
    Payable,
}

impl Mutability {
    /// Returns true for `view` and `pure` functions, which are served by
    /// `eth_call` and never need a transaction
    pub fn is_read_only(self) -> bool {
        matches!(self, Self::Pure | Self::View)
    }
}

/// One callable function of a contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    /// Function name
    pub name: String,
    /// Parameter types, in order
    pub inputs: Vec<DynSolType>,
    /// Return types, in order
    pub outputs: Vec<DynSolType>,
    /// State mutability
    pub mutability: Mutability,
}

impl FunctionDescriptor {
    /// Describe a function
    pub fn new(
        name: impl Into<String>,
        inputs: Vec<DynSolType>,
        outputs: Vec<DynSolType>,
        mutability: Mutability,
    ) -> Self {
        Self {
            name: name.into(),
            inputs,
            outputs,
            mutability,
        }
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, type_list(&self.inputs))
    }

    /// First four bytes of the Keccak-256 hash of the signature
    ///
    /// # Examples
    ///
    /// ```
    /// use alloy_dyn_abi::DynSolType;
    /// use evmprobe::{FunctionDescriptor, Mutability};
    ///
    /// let set = FunctionDescriptor::new("set", vec![DynSolType::Uint(256)], vec![], Mutability::NonPayable);
    /// assert_eq!(set.selector().to_string(), "0x60fe47b1");
    /// ```
    pub fn selector(&self) -> Selector {
        Selector::from_slice(&keccak256(self.signature().as_bytes())[..4])
    }

    /// Returns true if `args` have the count and types this function expects
    pub fn accepts(&self, args: &[DynSolValue]) -> bool {
        self.check_args(args).is_ok()
    }

    /// ABI-encode a call: selector followed by the encoded arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ArgumentMismatch`] when the argument count or
    /// any argument type does not match the declaration.
    pub fn encode_call(&self, args: &[DynSolValue]) -> Result<Bytes, ContractError> {
        self.check_args(args)?;
        let mut calldata = self.selector().to_vec();
        calldata.extend(encode_params(args));
        Ok(calldata.into())
    }

    /// Decode return data into one value per declared output.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::AbiDecode`] when the data does not match the
    /// declared output types, including empty data from an address without
    /// code.
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<DynSolValue>, ContractError> {
        if self.outputs.is_empty() {
            return Ok(Vec::new());
        }
        let decoded = DynSolType::Tuple(self.outputs.clone())
            .abi_decode_params(data)
            .map_err(|source| ContractError::AbiDecode {
                function: self.name.clone(),
                source,
            })?;
        Ok(match decoded {
            DynSolValue::Tuple(values) => values,
            single => vec![single],
        })
    }

    fn check_args(&self, args: &[DynSolValue]) -> Result<(), ContractError> {
        check_params(&self.name, &self.inputs, args)
    }
}

impl fmt::Display for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())?;
        if !self.outputs.is_empty() {
            write!(f, " returns ({})", type_list(&self.outputs))?;
        }
        Ok(())
    }
}

/// Constructor of a contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    /// Parameter types, in order
    pub inputs: Vec<DynSolType>,
    /// Whether the constructor accepts value
    pub payable: bool,
}

/// Functions and constructor of a contract, immutable once built
///
/// # Examples
///
/// ```
/// use evmprobe::ContractInterface;
///
/// let abi = r#"[
///   {"type":"function","name":"get","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
///   {"type":"function","name":"set","inputs":[{"name":"_value","type":"uint256"}],"outputs":[],"stateMutability":"nonpayable"}
/// ]"#;
/// let interface = ContractInterface::from_json_abi(abi).unwrap();
/// assert!(interface.function("get").unwrap().mutability.is_read_only());
/// assert!(interface.function("missing").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractInterface {
    functions: Vec<FunctionDescriptor>,
    constructor: Option<Constructor>,
}

impl ContractInterface {
    /// Build an interface from function descriptors
    pub fn new(functions: Vec<FunctionDescriptor>) -> Self {
        Self {
            functions,
            constructor: None,
        }
    }

    /// Attach a constructor
    #[must_use]
    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Parse a standard JSON ABI array.
    ///
    /// Functions and the constructor are kept; events, errors, `fallback` and
    /// `receive` entries are skipped. Legacy `constant`/`payable` flags are
    /// honoured when `stateMutability` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidInterface`] for malformed JSON or
    /// unknown parameter types.
    pub fn from_json_abi(json: &str) -> Result<Self, ContractError> {
        let entries: Vec<AbiEntry> = serde_json::from_str(json)
            .map_err(|e| ContractError::invalid_interface(e.to_string()))?;

        let mut interface = Self::default();
        for entry in entries {
            match entry.kind.as_str() {
                "function" => {
                    if entry.name.is_empty() {
                        return Err(ContractError::invalid_interface("function without a name"));
                    }
                    let mutability = entry.mutability();
                    interface.functions.push(FunctionDescriptor {
                        inputs: parse_params(&entry.inputs)?,
                        outputs: parse_params(&entry.outputs)?,
                        name: entry.name,
                        mutability,
                    });
                }
                "constructor" => {
                    let payable = entry.mutability() == Mutability::Payable;
                    interface.constructor = Some(Constructor {
                        inputs: parse_params(&entry.inputs)?,
                        payable,
                    });
                }
                "event" | "error" | "fallback" | "receive" => {}
                other => {
                    return Err(ContractError::invalid_interface(format!(
                        "unknown ABI entry type `{other}`"
                    )))
                }
            }
        }
        Ok(interface)
    }

    /// First function named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::UnknownFunction`] if there is none.
    pub fn function(&self, name: &str) -> Result<&FunctionDescriptor, ContractError> {
        self.functions
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| ContractError::unknown_function(name))
    }

    /// The overload of `name` that accepts `args`.
    ///
    /// # Errors
    ///
    /// [`ContractError::UnknownFunction`] if no function has that name,
    /// [`ContractError::ArgumentMismatch`] if none of the overloads accepts
    /// `args` (reported against the first overload).
    pub fn resolve(
        &self,
        name: &str,
        args: &[DynSolValue],
    ) -> Result<&FunctionDescriptor, ContractError> {
        let first = self.function(name)?;
        if let Some(matching) = self
            .functions
            .iter()
            .find(|f| f.name == name && f.accepts(args))
        {
            return Ok(matching);
        }
        first.check_args(args)?;
        Ok(first)
    }

    /// All functions in declaration order
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.functions.iter()
    }

    /// The constructor, if declared
    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    /// ABI-encode constructor arguments, to be appended to the init code.
    ///
    /// An interface without a constructor accepts only an empty argument list.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ArgumentMismatch`] on a count or type mismatch.
    pub fn encode_constructor(&self, args: &[DynSolValue]) -> Result<Bytes, ContractError> {
        let inputs = self
            .constructor
            .as_ref()
            .map(|c| c.inputs.as_slice())
            .unwrap_or_default();
        check_params("constructor", inputs, args)?;
        Ok(encode_params(args).into())
    }
}

fn check_params(
    function: &str,
    inputs: &[DynSolType],
    args: &[DynSolValue],
) -> Result<(), ContractError> {
    if inputs.len() != args.len() {
        return Err(ContractError::argument_mismatch(
            function,
            format!("expected {} arguments, got {}", inputs.len(), args.len()),
        ));
    }
    for (index, (ty, value)) in inputs.iter().zip(args).enumerate() {
        if !ty.matches(value) {
            let found = value
                .sol_type_name()
                .map(|name| name.into_owned())
                .unwrap_or_else(|| "unknown".to_string());
            return Err(ContractError::argument_mismatch(
                function,
                format!("argument {index} should be {}, got {found}", ty.sol_type_name()),
            ));
        }
    }
    Ok(())
}

fn encode_params(args: &[DynSolValue]) -> Vec<u8> {
    if args.is_empty() {
        return Vec::new();
    }
    DynSolValue::Tuple(args.to_vec()).abi_encode_params()
}

fn type_list(types: &[DynSolType]) -> String {
    types
        .iter()
        .map(|t| t.sol_type_name().into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

/// One entry of a JSON ABI array
#[derive(Debug, Deserialize)]
struct AbiEntry {
    #[serde(rename = "type", default = "default_entry_kind")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParam>,
    #[serde(default)]
    outputs: Vec<AbiParam>,
    #[serde(rename = "stateMutability")]
    state_mutability: Option<Mutability>,
    #[serde(default)]
    constant: bool,
    #[serde(default)]
    payable: bool,
}

impl AbiEntry {
    fn mutability(&self) -> Mutability {
        match self.state_mutability {
            Some(mutability) => mutability,
            None if self.constant => Mutability::View,
            None if self.payable => Mutability::Payable,
            None => Mutability::NonPayable,
        }
    }
}

fn default_entry_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Deserialize)]
struct AbiParam {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    components: Vec<AbiParam>,
}

impl AbiParam {
    /// Type string with `tuple` expanded from the components, e.g.
    /// `tuple[]` becomes `(address,uint256)[]`
    fn type_string(&self) -> String {
        match self.ty.strip_prefix("tuple") {
            Some(suffix) => {
                let inner: Vec<String> = self.components.iter().map(Self::type_string).collect();
                format!("({}){suffix}", inner.join(","))
            }
            None => self.ty.clone(),
        }
    }
}

fn parse_params(params: &[AbiParam]) -> Result<Vec<DynSolType>, ContractError> {
    params
        .iter()
        .map(|param| {
            let ty = param.type_string();
            DynSolType::parse(&ty).map_err(|e| {
                ContractError::invalid_interface(format!("bad parameter type `{ty}`: {e}"))
            })
        })
        .collect()
}
