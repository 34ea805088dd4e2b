// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Conversions between base units (wei) and decimal denominations
//!
//! All arithmetic is done on [`U256`] and [`BigDecimal`]; floating point only
//! appears in display helpers and is documented as lossy there.

use std::str::FromStr;

use alloy_primitives::U256;
use bigdecimal::num_bigint::Sign;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::errors::UnitError;

/// Decimal digits in `U256::MAX`
const U256_MAX_DIGITS: i128 = 78;

/// A named power-of-ten scale over wei.
///
/// # Examples
///
/// ```
/// use evmprobe::Denomination;
///
/// let unit: Denomination = "Gwei".parse().unwrap();
/// assert_eq!(unit, Denomination::Gwei);
/// assert_eq!(unit.decimals(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    /// 1 wei, the base unit
    Wei,
    /// 10^3 wei
    Kwei,
    /// 10^6 wei
    Mwei,
    /// 10^9 wei
    Gwei,
    /// 10^12 wei
    Szabo,
    /// 10^15 wei
    Finney,
    /// 10^18 wei
    Ether,
}

impl Denomination {
    /// Number of decimal places between this denomination and wei
    pub const fn decimals(self) -> u8 {
        match self {
            Self::Wei => 0,
            Self::Kwei => 3,
            Self::Mwei => 6,
            Self::Gwei => 9,
            Self::Szabo => 12,
            Self::Finney => 15,
            Self::Ether => 18,
        }
    }

    /// Number of wei in one unit of this denomination
    pub fn scale(self) -> U256 {
        U256::from(10u64).pow(U256::from(self.decimals()))
    }

    /// Canonical lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wei => "wei",
            Self::Kwei => "kwei",
            Self::Mwei => "mwei",
            Self::Gwei => "gwei",
            Self::Szabo => "szabo",
            Self::Finney => "finney",
            Self::Ether => "ether",
        }
    }
}

impl FromStr for Denomination {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wei" => Ok(Self::Wei),
            "kwei" | "babbage" => Ok(Self::Kwei),
            "mwei" | "lovelace" => Ok(Self::Mwei),
            "gwei" | "nano" | "shannon" => Ok(Self::Gwei),
            "szabo" | "micro" => Ok(Self::Szabo),
            "finney" | "milli" => Ok(Self::Finney),
            "ether" | "eth" => Ok(Self::Ether),
            _ => Err(UnitError::invalid_unit(s)),
        }
    }
}

impl std::fmt::Display for Denomination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert a base-unit amount into a decimal amount of `unit`.
///
/// Exact for every `U256`; the result carries no more fractional digits than
/// the denomination has.
///
/// # Errors
///
/// Returns [`UnitError::Malformed`] if the decimal rendering of `amount`
/// cannot be read back as a [`BigDecimal`]; this indicates invalid data that
/// should not be silently masked.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use bigdecimal::BigDecimal;
/// use evmprobe::{from_base_units, Denomination};
/// use std::str::FromStr;
///
/// let wei = U256::from(1_500_000_000_000_000_000u128);
/// assert_eq!(from_base_units(wei, Denomination::Ether).unwrap(), BigDecimal::from_str("1.5").unwrap());
/// ```
pub fn from_base_units(amount: U256, unit: Denomination) -> Result<BigDecimal, UnitError> {
    let rendered = amount.to_string();
    let digits = BigDecimal::from_str(&rendered).map_err(|_| UnitError::Malformed {
        input: rendered.clone(),
    })?;
    // Shifting the decimal point is exact, unlike a division
    let (mantissa, scale) = digits.into_bigint_and_exponent();
    Ok(BigDecimal::new(mantissa, scale + i64::from(unit.decimals())))
}

/// Convert a decimal amount of `unit` into base units.
///
/// # Errors
///
/// - [`UnitError::Negative`] for amounts below zero
/// - [`UnitError::PrecisionLoss`] when the amount is not a whole number of wei
/// - [`UnitError::Overflow`] when the result exceeds `U256::MAX`
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use bigdecimal::BigDecimal;
/// use evmprobe::{to_base_units, Denomination};
/// use std::str::FromStr;
///
/// let gwei = BigDecimal::from_str("20").unwrap();
/// assert_eq!(to_base_units(&gwei, Denomination::Gwei).unwrap(), U256::from(20_000_000_000u64));
/// ```
pub fn to_base_units(amount: &BigDecimal, unit: Denomination) -> Result<U256, UnitError> {
    let rendered = || amount.to_string();
    let overflow = || UnitError::Overflow {
        amount: rendered(),
        unit: unit.to_string(),
    };
    let precision_loss = || UnitError::PrecisionLoss {
        amount: rendered(),
        unit: unit.to_string(),
    };

    let (mantissa, scale) = amount.as_bigint_and_exponent();
    match mantissa.sign() {
        Sign::Minus => return Err(UnitError::Negative { amount: rendered() }),
        Sign::NoSign => return Ok(U256::ZERO),
        Sign::Plus => {}
    }

    // Bound the magnitude before materializing anything: the value in wei is
    // mantissa * 10^shift, so its integer part has `digits + shift` digits
    let digits = i128::try_from(mantissa.magnitude().to_string().len()).map_err(|_| overflow())?;
    let shift = i128::from(unit.decimals()) - i128::from(scale);
    let integer_digits = digits + shift;
    if integer_digits > U256_MAX_DIGITS {
        return Err(overflow());
    }
    if integer_digits <= 0 {
        return Err(precision_loss());
    }

    let exponent = i64::try_from(-shift).map_err(|_| overflow())?;
    let shifted = BigDecimal::new(mantissa, exponent);
    let whole = shifted.with_scale(0);
    if whole != shifted {
        return Err(precision_loss());
    }

    let (digits, _) = whole.into_bigint_and_exponent();
    U256::from_str(&digits.to_string()).map_err(|_| overflow())
}

/// Parse a decimal string in `unit` into base units.
///
/// # Errors
///
/// [`UnitError::Malformed`] if the string is not a decimal number, otherwise
/// the errors of [`to_base_units`].
pub fn parse_units(input: &str, unit: Denomination) -> Result<U256, UnitError> {
    let amount = BigDecimal::from_str(input.trim()).map_err(|_| UnitError::Malformed {
        input: input.to_string(),
    })?;
    to_base_units(&amount, unit)
}

/// Render a base-unit amount in `unit` with trailing zeros removed.
///
/// Always uses plain decimal notation, never scientific notation.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use evmprobe::{format_units, Denomination};
///
/// assert_eq!(format_units(U256::from(20_000_000_000u64), Denomination::Gwei), "20");
/// assert_eq!(format_units(U256::from(1u64), Denomination::Ether), "0.000000000000000001");
/// ```
pub fn format_units(amount: U256, unit: Denomination) -> String {
    let decimals = usize::from(unit.decimals());
    if decimals == 0 {
        return amount.to_string();
    }

    let divisor = unit.scale();
    let whole = amount / divisor;
    let fractional = amount % divisor;

    let digits = fractional.to_string();
    let fractional_str = format!("{}{digits}", "0".repeat(decimals.saturating_sub(digits.len())));
    let trimmed = fractional_str.trim_end_matches('0');

    if trimmed.is_empty() {
        format!("{whole}")
    } else {
        format!("{whole}.{trimmed}")
    }
}

/// Convert a base-unit amount to `f64` in `unit`.
///
/// Returns f64 for display purposes. This is a lossy conversion.
pub fn to_f64_lossy(amount: U256, unit: Denomination) -> f64 {
    format_units(amount, unit).parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_denomination_parsing() {
        assert_eq!("ether".parse::<Denomination>().unwrap(), Denomination::Ether);
        assert_eq!("ETH".parse::<Denomination>().unwrap(), Denomination::Ether);
        assert_eq!(" gwei ".parse::<Denomination>().unwrap(), Denomination::Gwei);
        assert_eq!("wei".parse::<Denomination>().unwrap(), Denomination::Wei);
        assert_eq!("finney".parse::<Denomination>().unwrap(), Denomination::Finney);
    }

    #[test]
    fn test_invalid_unit() {
        let err = "lamports".parse::<Denomination>().unwrap_err();
        assert_eq!(err, UnitError::invalid_unit("lamports"));
    }

    #[test]
    fn test_scale() {
        assert_eq!(Denomination::Wei.scale(), U256::from(1u64));
        assert_eq!(Denomination::Gwei.scale(), U256::from(1_000_000_000u64));
        assert_eq!(
            Denomination::Ether.scale(),
            U256::from(1_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_to_base_units_ether() {
        assert_eq!(
            to_base_units(&dec("0.5"), Denomination::Ether).unwrap(),
            U256::from(500_000_000_000_000_000u128)
        );
        assert_eq!(
            to_base_units(&dec("100"), Denomination::Ether).unwrap(),
            U256::from(100_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_to_base_units_accepts_trailing_zeros() {
        assert_eq!(
            to_base_units(&dec("1.000000000000000000000"), Denomination::Ether).unwrap(),
            U256::from(1_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_to_base_units_rejects_sub_wei() {
        let err = to_base_units(&dec("0.0000000001"), Denomination::Gwei).unwrap_err();
        assert!(matches!(err, UnitError::PrecisionLoss { .. }));
    }

    #[test]
    fn test_to_base_units_rejects_negative() {
        let err = to_base_units(&dec("-1"), Denomination::Ether).unwrap_err();
        assert!(matches!(err, UnitError::Negative { .. }));
    }

    #[test]
    fn test_to_base_units_overflow() {
        // U256::MAX is ~1.16e77 wei, so 1e60 ether overflows
        let err = to_base_units(&dec("1e60"), Denomination::Ether).unwrap_err();
        assert!(matches!(err, UnitError::Overflow { .. }));
    }

    #[test]
    fn test_huge_exponent_overflows_without_expanding() {
        let err = parse_units("1e1000000000", Denomination::Ether).unwrap_err();
        assert!(matches!(err, UnitError::Overflow { .. }));

        let err = parse_units("1e78", Denomination::Wei).unwrap_err();
        assert!(matches!(err, UnitError::Overflow { .. }));
    }

    #[test]
    fn test_tiny_exponent_loses_precision_without_expanding() {
        let err = parse_units("1e-1000000000", Denomination::Ether).unwrap_err();
        assert!(matches!(err, UnitError::PrecisionLoss { .. }));
    }

    #[test]
    fn test_zero_with_any_exponent() {
        assert_eq!(parse_units("0e1000000000", Denomination::Ether).unwrap(), U256::ZERO);
        assert_eq!(parse_units("-0", Denomination::Ether).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_seventy_eight_digit_bound() {
        let max = U256::MAX.to_string();
        assert_eq!(max.len() as i128, U256_MAX_DIGITS);
        assert_eq!(parse_units(&max, Denomination::Wei).unwrap(), U256::MAX);

        let err = parse_units("2e77", Denomination::Wei).unwrap_err();
        assert!(matches!(err, UnitError::Overflow { .. }));
    }

    #[test]
    fn test_from_base_units() {
        assert_eq!(
            from_base_units(U256::from(20_000_000_000u64), Denomination::Gwei).unwrap(),
            dec("20")
        );
        assert_eq!(
            from_base_units(U256::from(123_456_789_012_345_678u128), Denomination::Ether).unwrap(),
            dec("0.123456789012345678")
        );
        assert_eq!(from_base_units(U256::ZERO, Denomination::Ether).unwrap(), dec("0"));
    }

    #[test]
    fn test_round_trip_max() {
        let back = to_base_units(
            &from_base_units(U256::MAX, Denomination::Ether).unwrap(),
            Denomination::Ether,
        )
        .unwrap();
        assert_eq!(back, U256::MAX);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(
            parse_units("1.5", Denomination::Ether).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert!(matches!(
            parse_units("one", Denomination::Ether).unwrap_err(),
            UnitError::Malformed { .. }
        ));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::ZERO, Denomination::Ether), "0");
        assert_eq!(
            format_units(U256::from(1_500_000_000_000_000_000u128), Denomination::Ether),
            "1.5"
        );
        assert_eq!(format_units(U256::from(42u64), Denomination::Wei), "42");
        assert_eq!(
            format_units(U256::from(1_234_567_891u64), Denomination::Gwei),
            "1.234567891"
        );
    }

    #[test]
    fn test_to_f64_lossy() {
        let eth = to_f64_lossy(U256::from(1_500_000_000_000_000_000u128), Denomination::Ether);
        assert!((eth - 1.5).abs() < 1e-12);
    }
}
