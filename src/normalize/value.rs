//! Locale-tolerant parsing of raw values into canonical amounts, dates and text.
//!
//! Bank exports disagree on almost everything: currency markers, thousands
//! grouping, decimal separators, and how negatives are written. Everything in
//! this module degrades to `None` on unparseable input; parse failures are
//! expected data conditions, not errors.

use bigdecimal::rounding::RoundingMode;
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;

/// Currency symbols stripped before numeric parsing, alongside all letters
const CURRENCY_SYMBOLS: &str = "$€£¥₱₡₲₵₴₦₹";

/// Unicode minus and dash variants normalized to ASCII '-' before sign detection
const MINUS_VARIANTS: [char; 4] = ['\u{2212}', '\u{2012}', '\u{2013}', '\u{2014}'];

/// Date formats tried in order. Day-before-month formats come first so an
/// ambiguous numeric date like 05/04/2024 reads as 5 April; month-first is
/// only reached when day-first cannot parse (e.g. 01/13/2024).
const DATE_FORMATS: [&str; 7] = [
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
];

const DATETIME_FORMATS: [&str; 4] = [
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Parse an arbitrary textual amount into a signed decimal rounded to
/// `decimals` fractional digits.
///
/// Tolerated, in any combination: currency symbols or letters, spaces and
/// non-breaking spaces, thousands separators as either `.` or `,`, leading
/// `+`, leading `-`, trailing `-`, interior `-`, full parenthesization as
/// accounting negative, and Unicode minus/dash variants. The separator that
/// occurs last in the string is the decimal point; every earlier occurrence
/// of either separator is grouping and is stripped.
///
/// Returns `None` on empty, digit-free or structurally malformed input.
/// With `force_absolute` the final sign is discarded after rounding.
pub fn parse_amount(raw: &str, decimals: u32, force_absolute: bool) -> Option<BigDecimal> {
    let mut s: String = raw
        .chars()
        .map(|c| if MINUS_VARIANTS.contains(&c) { '-' } else { c })
        .collect::<String>()
        .replace('\u{a0}', " ")
        .trim()
        .to_string();
    if s.is_empty() {
        return None;
    }

    let paren_negative = s.starts_with('(') && s.ends_with(')');
    if paren_negative {
        s = s[1..s.len() - 1].trim().to_string();
    }

    // Currency markers and letters carry no numeric information
    s.retain(|c| !c.is_alphabetic() && !CURRENCY_SYMBOLS.contains(c) && c != ' ');

    let suffix_negative = s.ends_with('-');
    if suffix_negative {
        s.pop();
    }

    // Any interior '-' belongs at the front
    if s.contains('-') && !s.starts_with('-') {
        s = format!("-{}", s.replace('-', ""));
    }
    if let Some(rest) = s.strip_prefix('+') {
        s = rest.to_string();
    }

    s = resolve_separators(&s);

    let parsed = BigDecimal::from_str(&s).ok()?;
    let mut value = parsed.with_scale_round(decimals as i64, RoundingMode::HalfUp);
    if paren_negative || suffix_negative {
        value = -value;
    }
    if force_absolute {
        value = value.abs();
    }
    Some(value)
}

/// The last `,` or `.` in the string is the decimal point; all earlier
/// occurrences of either separator are thousands grouping and are dropped.
fn resolve_separators(s: &str) -> String {
    let last = s
        .char_indices()
        .rev()
        .find(|(_, c)| *c == ',' || *c == '.')
        .map(|(i, _)| i);
    let Some(decimal_at) = last else {
        return s.to_string();
    };

    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            ',' | '.' if i == decimal_at => out.push('.'),
            ',' | '.' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Parse a textual date with day-before-month precedence.
///
/// Returns `None` when no known format matches.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Trim surrounding whitespace and upper-case. Embedded punctuation and
/// signs are untouched so exclusion configuration and data stay comparable.
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Scale a decimal amount to an exact integer key: `round(amount × 10^decimals)`.
///
/// This key is the only value ever used for amount equality, which keeps
/// matching immune to binary floating-point drift. `None` when the scaled
/// value does not fit an `i64`.
pub fn to_amount_key(amount: &BigDecimal, decimals: u32) -> Option<i64> {
    let scaled = amount.with_scale_round(decimals as i64, RoundingMode::HalfUp);
    (scaled * BigDecimal::from(10i64.pow(decimals))).to_i64()
}
