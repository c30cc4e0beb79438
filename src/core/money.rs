//! Brazilian real formatting and parsing.
//!
//! Amounts stay exact `Decimal`s everywhere in the crate; rounding to
//! cents only happens here, on the way to text.

use crate::core::error::{LedgerError, LedgerResult};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const PREFIX: &str = "R$";

/// Round to whole centavos, half away from zero.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount the way pt-BR currency formatting does.
///
/// # Examples
///
/// ```
/// use fair_settlement::core::money::format_brl;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_brl(dec!(70)), "R$ 70,00");
/// assert_eq!(format_brl(dec!(1234567.891)), "R$ 1.234.567,89");
/// assert_eq!(format_brl(dec!(-30)), "-R$ 30,00");
/// ```
pub fn format_brl(amount: Decimal) -> String {
    let cents = round_to_cents(amount);
    let sign = if cents < Decimal::ZERO { "-" } else { "" };
    let digits = format!("{:.2}", cents.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{}{} {},{}", sign, PREFIX, group_thousands(integer), fraction)
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Parse text produced by [`format_brl`] (or typed by a person in the
/// same convention) back into a decimal.
///
/// Dots are thousands separators and the comma is the decimal mark.
pub fn parse_brl(text: &str) -> LedgerResult<Decimal> {
    let invalid = || LedgerError::InvalidMoney(text.to_string());

    let mut rest = text.trim();
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped.trim_start();
    }
    if let Some(stripped) = rest.strip_prefix(PREFIX) {
        rest = stripped.trim_start();
    }
    if let Some(stripped) = rest.strip_prefix('-') {
        if negative {
            return Err(invalid());
        }
        negative = true;
        rest = stripped.trim_start();
    }

    let (integer, fraction) = match rest.split_once(',') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rest, None),
    };
    if !valid_integer_part(integer) {
        return Err(invalid());
    }
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
    }

    let mut plain: String = integer.chars().filter(|c| *c != '.').collect();
    if let Some(fraction) = fraction {
        plain.push('.');
        plain.push_str(fraction);
    }
    let value = Decimal::from_str(&plain).map_err(|_| invalid())?;

    Ok(if negative { -value } else { value })
}

/// Digits, optionally grouped as `1.234.567`: a leading group of one to
/// three digits, then groups of exactly three.
fn valid_integer_part(integer: &str) -> bool {
    let mut groups = integer.split('.');
    let leading = groups.next().unwrap_or("");
    let all_digits = |g: &str| !g.is_empty() && g.chars().all(|c| c.is_ascii_digit());

    if !integer.contains('.') {
        return all_digits(leading);
    }
    all_digits(leading) && leading.len() <= 3 && groups.all(|g| g.len() == 3 && all_digits(g))
}

/// Parse an amount as it appears in import files: a plain decimal
/// (`"1234.50"`) or a BRL string (`"R$ 1.234,50"`).
///
/// Only text containing `R$` or a comma is read as BRL. `"1.234"` is
/// therefore the plain decimal 1.234.
pub fn parse_amount(text: &str) -> LedgerResult<Decimal> {
    let trimmed = text.trim();
    if trimmed.contains(PREFIX) || trimmed.contains(',') {
        return parse_brl(trimmed);
    }
    Decimal::from_str(trimmed).map_err(|_| LedgerError::InvalidMoney(text.to_string()))
}
