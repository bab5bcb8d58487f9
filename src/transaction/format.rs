//! Conversions between record values and the text displayed in table rows.
//!
//! Amounts are displayed as `{sign}{symbol} {digits}`, e.g. `+₹ 1,00,000` or
//! `-₹ 400.5`, and dates as `Jun 01, 2025`. The parse functions accept what the
//! format functions produce so that pre-rendered rows can be read back into
//! records.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::config::{CurrencyFormat, DigitGrouping};

use super::{bootstrap::ParseError, core::TransactionType, core::canonical_date};

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:short] [day], [year]");

/// Format a transaction amount with its sign, currency symbol and digit grouping.
///
/// Amounts are shown to the cent, with trailing zero cents omitted.
pub fn format_amount(
    amount: f64,
    transaction_type: TransactionType,
    currency: &CurrencyFormat,
) -> String {
    format!(
        "{}{} {}",
        transaction_type.sign(),
        currency.symbol,
        format_magnitude(amount, currency.grouping)
    )
}

/// Format the magnitude of `amount` with digit grouping and no sign or symbol.
pub fn format_magnitude(amount: f64, grouping: DigitGrouping) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let whole = match grouping {
        DigitGrouping::Indian => group_indian(whole),
        DigitGrouping::Western => group_western(whole),
    };

    match fraction {
        0 => whole,
        fraction if fraction % 10 == 0 => format!("{whole}.{}", fraction / 10),
        fraction => format!("{whole}.{fraction:02}"),
    }
}

fn group_western(whole: u64) -> String {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    let formatter = FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    if whole == 0 {
        // Zero is hardcoded as "0" by numfmt
        return "0".to_owned();
    }

    formatter.fmt_string(whole as f64)
}

fn group_indian(whole: u64) -> String {
    let digits = whole.to_string();

    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();

    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }

    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Parse an amount as displayed in a table row.
///
/// Strips the sign, currency symbol, whitespace and thousands separators.
/// Returns the magnitude and the transaction type implied by the sign, if
/// the text had one.
///
/// # Errors
/// Returns [ParseError::InvalidAmount] if no number can be read from `text`.
pub fn parse_amount(text: &str) -> Result<(f64, Option<TransactionType>), ParseError> {
    let invalid = || ParseError::InvalidAmount(text.trim().to_owned());
    let trimmed = text.trim();

    let (transaction_type, rest) = match trimmed.chars().next() {
        Some('+') => (Some(TransactionType::Income), &trimmed[1..]),
        Some('-') => (Some(TransactionType::Expense), &trimmed[1..]),
        _ => (None, trimmed),
    };

    // Everything before the first digit is the currency symbol.
    let digits_start = rest
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let symbol = &rest[..digits_start];

    if symbol.chars().any(|c| c.is_ascii_digit() || c == '-' || c == '+') {
        return Err(invalid());
    }

    let digits: String = rest[digits_start..]
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    if !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(invalid());
    }

    let amount: f64 = digits.parse().map_err(|_| invalid())?;

    Ok((amount, transaction_type))
}

/// Format a date in the short display form used in table rows, e.g. `Jun 01, 2025`.
pub fn format_display_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Parse a date in either the display form (`Jun 01, 2025`) or the canonical
/// form (`2025-06-01`).
///
/// # Errors
/// Returns [ParseError::InvalidDate] if `text` is in neither form.
pub fn parse_display_date(text: &str) -> Result<Date, ParseError> {
    let text = text.trim();

    Date::parse(text, DISPLAY_DATE_FORMAT)
        .or_else(|_| Date::parse(text, canonical_date::FORMAT))
        .map_err(|_| ParseError::InvalidDate(text.to_owned()))
}
