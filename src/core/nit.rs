//! NIT (Número de Identificación Tributaria) handling.
//!
//! Computes the DIAN modulo-11 verification digit, parses and validates NITs written as
//! `digits` or `digits-dv`, and formats them with thousands separators for display.

use crate::{
    core::money::group_thousands,
    errors::{Error, Result},
};
use std::{fmt, str::FromStr};

/// Weights applied to the NIT digits, starting from the rightmost digit.
const WEIGHTS: [u32; 15] = [3, 7, 13, 17, 19, 23, 29, 37, 41, 43, 47, 53, 59, 67, 71];

/// Longest NIT body (without check digit) the algorithm is defined for.
pub const MAX_NIT_DIGITS: usize = WEIGHTS.len();

/// Computes the verification digit for a tax id.
///
/// Every character that is not an ASCII digit is ignored, so `"900.123.456"` and
/// `"900123456"` give the same result. Digits past the fifteenth (counting from the
/// right) carry weight zero. An empty or all-punctuation input yields `'0'`.
#[must_use]
pub fn compute_check_digit(tax_id: &str) -> char {
    let sum: u32 = tax_id
        .chars()
        .filter_map(|c| c.to_digit(10))
        .rev()
        .enumerate()
        .map(|(position, digit)| digit * WEIGHTS.get(position).copied().unwrap_or(0))
        .sum();

    let remainder = sum % 11;
    let check_digit = if remainder < 2 {
        remainder
    } else {
        11 - remainder
    };

    // check_digit is in 0..=9 by construction
    char::from_digit(check_digit, 10).unwrap_or('0')
}

/// Returns `true` when `raw` parses as a NIT and, if a check digit is present, it matches.
#[must_use]
pub fn is_valid_nit(raw: &str) -> bool {
    Nit::parse(raw).is_ok()
}

/// Formats a tax id with `.` thousands separators, optionally appending `-dv`.
///
/// Non-digit characters are dropped before grouping; an input without digits formats
/// to an empty string.
///
/// ```
/// use supplier_retentions::core::nit::format_nit;
///
/// assert_eq!(format_nit("800197268", true), "800.197.268-4");
/// assert_eq!(format_nit("800197268", false), "800.197.268");
/// ```
#[must_use]
pub fn format_nit(tax_id: &str, with_check_digit: bool) -> String {
    let digits: String = tax_id.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }

    let grouped = group_thousands(&digits, '.');
    if with_check_digit {
        format!("{grouped}-{}", compute_check_digit(&digits))
    } else {
        grouped
    }
}

/// Parses a NIT as a user typed it and renders it with `.` thousands separators.
///
/// Unlike [`format_nit`], a supplied check digit is validated and never mistaken for
/// part of the body.
///
/// # Errors
/// Returns [`Error::InvalidTaxId`] when `raw` does not parse (see [`Nit::parse`]).
pub fn reformat_nit(raw: &str, with_check_digit: bool) -> Result<String> {
    let nit = Nit::parse(raw)?;
    Ok(format_nit(nit.digits(), with_check_digit))
}

/// A validated NIT: its digit body and the matching verification digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nit {
    digits: String,
    check_digit: char,
}

impl Nit {
    /// Parses `digits` or `digits-dv`, allowing `.` and space separators in the body.
    ///
    /// # Errors
    /// Returns [`Error::InvalidTaxId`] when the body is empty, longer than
    /// [`MAX_NIT_DIGITS`], contains anything other than digits and separators, or when a
    /// supplied check digit does not match the computed one.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let (body, supplied_dv) = match trimmed.rsplit_once('-') {
            Some((body, dv)) => (body, Some(dv.trim())),
            None => (trimmed, None),
        };

        let mut digits = String::with_capacity(body.len());
        for c in body.chars() {
            match c {
                '0'..='9' => digits.push(c),
                '.' | ' ' => {}
                other => {
                    return Err(invalid(raw, format!("unexpected character '{other}'")));
                }
            }
        }

        if digits.is_empty() {
            return Err(invalid(raw, "no digits before the check digit"));
        }
        if digits.len() > MAX_NIT_DIGITS {
            return Err(invalid(
                raw,
                format!("more than {MAX_NIT_DIGITS} digits"),
            ));
        }

        let check_digit = compute_check_digit(&digits);
        if let Some(dv) = supplied_dv {
            let mut chars = dv.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c == check_digit => {}
                (Some(c), None) if c.is_ascii_digit() => {
                    return Err(invalid(
                        raw,
                        format!("check digit {c} does not match expected {check_digit}"),
                    ));
                }
                _ => return Err(invalid(raw, "check digit must be a single digit")),
            }
        }

        Ok(Self {
            digits,
            check_digit,
        })
    }

    /// The NIT body without separators or check digit.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// The verification digit.
    #[must_use]
    pub const fn check_digit(&self) -> char {
        self.check_digit
    }

    /// Display form with thousands separators, e.g. `800.197.268-4`.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!("{}-{}", group_thousands(&self.digits, '.'), self.check_digit)
    }
}

impl fmt::Display for Nit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.digits, self.check_digit)
    }
}

impl FromStr for Nit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn invalid(raw: &str, reason: impl Into<String>) -> Error {
    Error::InvalidTaxId {
        tax_id: raw.to_string(),
        reason: reason.into(),
    }
}
