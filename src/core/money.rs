//! Currency arithmetic for Colombian pesos.
//!
//! All amounts are `rust_decimal::Decimal`. Withheld amounts are rounded half-up to the
//! peso's minor unit, which has zero decimal places. Parsing and display follow the
//! es-CO convention (`.` for thousands, `,` for decimals).

use crate::errors::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Decimal places of the Colombian peso's minor unit.
pub const COP_DECIMAL_PLACES: u32 = 0;

/// Rounds a non-negative amount half-up to whole pesos.
///
/// `MidpointAwayFromZero` is half-up for every value this crate produces, since
/// negative amounts are rejected before any arithmetic happens.
#[must_use]
pub fn round_half_up(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(COP_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes `base * rate / 100` without rounding.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] if the product overflows `Decimal`.
pub fn percentage_of(base: Decimal, rate: Decimal) -> Result<Decimal> {
    base.checked_mul(rate)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| Error::InvalidAmount {
            amount: format!("{base} * {rate}%"),
        })
}

/// Rejects negative base amounts.
///
/// # Errors
/// Returns [`Error::InvalidInput`] when `amount` is below zero.
pub fn ensure_non_negative(amount: Decimal) -> Result<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::invalid_input(format!(
            "base amount must not be negative, got {amount}"
        )));
    }
    Ok(amount)
}

/// Parses a currency-formatted base amount such as `"$ 1.250.000"` or `"1.250.000,50"`.
///
/// A `$` sign, a `COP` suffix and whitespace are ignored. When a `,` is present it is the
/// decimal separator and every `.` is a thousands separator. Without a `,`, dots are
/// thousands separators if every group after the first has exactly three digits;
/// otherwise a single dot is read as the decimal point.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for empty, negative or non-numeric input.
pub fn parse_base_amount(raw: &str) -> Result<Decimal> {
    let invalid = || Error::invalid_input(format!("'{raw}' is not a valid base amount"));

    let cleaned: String = raw
        .trim()
        .trim_end_matches("COP")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$')
        .collect();

    if cleaned.is_empty() || cleaned.starts_with('-') {
        return Err(invalid());
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replacen(',', ".", 1)
    } else if is_thousands_grouped(&cleaned) {
        cleaned.replace('.', "")
    } else {
        cleaned
    };

    let amount = Decimal::from_str(&normalized).map_err(|_| invalid())?;
    ensure_non_negative(amount)
}

fn is_thousands_grouped(value: &str) -> bool {
    let mut groups = value.split('.');
    let first = groups.next().unwrap_or_default();
    let rest: Vec<&str> = groups.collect();

    !rest.is_empty()
        && (1..=3).contains(&first.len())
        && rest
            .iter()
            .all(|group| group.len() == 3 && group.chars().all(|c| c.is_ascii_digit()))
}

/// Formats an amount as whole pesos, e.g. `$ 1.250.000`.
#[must_use]
pub fn format_cop(amount: Decimal) -> String {
    let rounded = round_half_up(amount.abs());
    let grouped = group_thousands(&rounded.trunc().to_string(), '.');
    if amount.is_sign_negative() && !rounded.is_zero() {
        format!("-$ {grouped}")
    } else {
        format!("$ {grouped}")
    }
}

/// Inserts `separator` every three characters counting from the right.
pub(crate) fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, c) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(dec!(25000.025)), dec!(25000));
        assert_eq!(round_half_up(dec!(25000.5)), dec!(25001));
        assert_eq!(round_half_up(dec!(25000.49)), dec!(25000));
        assert_eq!(round_half_up(dec!(2.5)), dec!(3));
        assert_eq!(round_half_up(dec!(3.5)), dec!(4));
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(dec!(1000001), dec!(2.5)).unwrap(), dec!(25000.025));
        assert_eq!(percentage_of(dec!(1000000), dec!(4)).unwrap(), dec!(40000));
        assert!(percentage_of(Decimal::MAX, dec!(50)).is_err());
    }

    #[test]
    fn test_parse_base_amount() {
        assert_eq!(parse_base_amount("$ 1.250.000").unwrap(), dec!(1250000));
        assert_eq!(parse_base_amount("1250000").unwrap(), dec!(1250000));
        assert_eq!(parse_base_amount("1.250.000,50").unwrap(), dec!(1250000.50));
        assert_eq!(parse_base_amount("999999 COP").unwrap(), dec!(999999));
        assert_eq!(parse_base_amount("1000.5").unwrap(), dec!(1000.5));
        for bad in ["", "-5", "abc", "NaN", "$ -1.000"] {
            assert!(matches!(
                parse_base_amount(bad),
                Err(Error::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_format_cop() {
        assert_eq!(format_cop(dec!(1250000)), "$ 1.250.000");
        assert_eq!(format_cop(dec!(999)), "$ 999");
        assert_eq!(format_cop(dec!(0)), "$ 0");
        assert_eq!(format_cop(dec!(25000.5)), "$ 25.001");
    }

    #[test]
    fn test_ensure_non_negative() {
        assert!(ensure_non_negative(dec!(0)).is_ok());
        assert!(matches!(
            ensure_non_negative(dec!(-0.01)),
            Err(Error::InvalidInput { .. })
        ));
    }
}
