//! Error types for denomination conversions.

/// Errors that can occur while converting between base units and
/// decimal-denominated amounts.
///
/// # Examples
///
/// ```rust
/// use evmprobe::{Denomination, UnitError};
///
/// let err = "dogecoin".parse::<Denomination>().unwrap_err();
/// assert!(matches!(err, UnitError::InvalidUnit { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    /// The unit name is not a known denomination.
    #[error("Invalid unit: {unit}")]
    InvalidUnit {
        /// The unrecognized unit name
        unit: String,
    },

    /// The amount is negative; base-unit amounts are unsigned.
    #[error("Negative amount: {amount}")]
    Negative {
        /// The rejected amount, as written
        amount: String,
    },

    /// The amount has more fractional digits than the denomination allows,
    /// so it does not correspond to a whole number of base units.
    #[error("Amount {amount} is finer than one base unit of {unit}")]
    PrecisionLoss {
        /// The rejected amount, as written
        amount: String,
        /// Denomination the amount was expressed in
        unit: String,
    },

    /// The amount does not fit in 256 bits once scaled to base units.
    #[error("Amount {amount} {unit} overflows 256-bit base units")]
    Overflow {
        /// The rejected amount, as written
        amount: String,
        /// Denomination the amount was expressed in
        unit: String,
    },

    /// The input string is not a decimal number.
    #[error("Malformed amount: {input}")]
    Malformed {
        /// The rejected input
        input: String,
    },
}

impl UnitError {
    /// Create an `InvalidUnit` error.
    pub fn invalid_unit(unit: impl Into<String>) -> Self {
        UnitError::InvalidUnit { unit: unit.into() }
    }
}
