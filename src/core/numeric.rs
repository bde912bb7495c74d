//! Tolerant parsing of numeric form input.
//!
//! Users type prices the way their locale writes them: `7,5`, `12.00`, `1 200 Kč`,
//! `21 %`. Parsing removes whitespace, treats `,` as the decimal point, and drops stray
//! trailing symbols. Whatever remains must be plain digits with at most one decimal
//! point, otherwise the input is rejected rather than guessed at (`7,5,3` is invalid).
//!
//! Values are handed to [`rust_decimal`] once the input is known to be plain digits, so
//! no float rounding error can creep into minor-unit amounts.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Minor units per major currency unit
pub const MINOR_UNITS: u64 = 100;

/// Parses a price into minor units (cents), rounding half-up at the third decimal.
///
/// Returns `None` for blank input, negative values, and anything ambiguous.
#[must_use]
pub fn parse_minor_units(input: &str) -> Option<u64> {
    let amount = parse_decimal(input)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.checked_mul(Decimal::from(MINOR_UNITS))?.to_u64()
}

/// Parses a whole, non-negative number such as a tax rate (`21`, `21%`, `21.0`).
///
/// A non-zero fractional part is rejected.
#[must_use]
pub fn parse_whole_number(input: &str) -> Option<u32> {
    let value = parse_decimal(input)?;
    if !value.fract().is_zero() {
        return None;
    }
    value.to_u32()
}

/// Renders minor units back into the decimal form the parser accepts (`750` -> `7.50`).
#[must_use]
pub fn format_minor_units(amount: u64) -> String {
    format!("{}.{:02}", amount / MINOR_UNITS, amount % MINOR_UNITS)
}

/// Cleans tolerant input and parses what remains as a non-negative decimal.
fn parse_decimal(input: &str) -> Option<Decimal> {
    let cleaned = clean(input);
    let (whole, fraction) = split_decimal(&cleaned)?;
    let whole = if whole.is_empty() { "0" } else { whole };
    let fraction = if fraction.is_empty() { "0" } else { fraction };
    Decimal::from_str(&format!("{whole}.{fraction}")).ok()
}

fn clean(input: &str) -> String {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    compact
        .trim_end_matches(|c: char| !c.is_ascii_digit())
        .to_string()
}

/// Splits cleaned input into whole and fractional digit runs.
fn split_decimal(cleaned: &str) -> Option<(&str, &str)> {
    let (whole, fraction) = cleaned.split_once('.').unwrap_or((cleaned, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !all_digits(whole) || !all_digits(fraction) {
        return None;
    }
    Some((whole, fraction))
}
