//! Lenient conversion of stored financial values into `Decimal`.
//!
//! Source tables mix integer, real and free-text amount columns (the indirect
//! management amount is text with thousands separators). Anything that is not
//! a plain number reads as absent; callers decide whether absent means zero.

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::ValueRef;
use rust_decimal::Decimal;
use std::str::FromStr;

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(\d{1,3}(,\d{3})+|\d+)(\.\d+)?$").expect("valid amount regex")
});

/// Parses `1234.5`, `1,234.5` or `-12`. Whitespace is trimmed; anything else
/// (currency symbols, words, misplaced separators) returns `None`.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if !AMOUNT_RE.is_match(trimmed) {
        return None;
    }
    Decimal::from_str(&trimmed.replace(',', "")).ok()
}

/// Reads any SQLite value as an amount.
pub fn amount_from_sql(value: ValueRef<'_>) -> Option<Decimal> {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(value) => Some(Decimal::from(value)),
        ValueRef::Real(value) => Decimal::try_from(value).ok(),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_amount),
    }
}

/// Amount used in aggregation: missing, malformed and negative values count as 0.
pub fn contributing_amount(value: Option<Decimal>) -> Decimal {
    match value {
        Some(amount) if amount > Decimal::ZERO => amount,
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::{amount_from_sql, contributing_amount, parse_amount};
    use rusqlite::types::ValueRef;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_plain_and_grouped_numbers() {
        assert_eq!(parse_amount("1500"), Some(dec!(1500)));
        assert_eq!(parse_amount(" 1,250,000.50 "), Some(dec!(1250000.50)));
        assert_eq!(parse_amount("-42"), Some(dec!(-42)));
    }

    #[test]
    fn rejects_text_and_bad_grouping() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("EUR 100"), None);
        assert_eq!(parse_amount("12,34"), None);
        assert_eq!(parse_amount("n/a"), None);
    }

    #[test]
    fn reads_every_sqlite_storage_class() {
        assert_eq!(amount_from_sql(ValueRef::Integer(7)), Some(dec!(7)));
        assert_eq!(amount_from_sql(ValueRef::Real(2.5)), Some(dec!(2.5)));
        assert_eq!(amount_from_sql(ValueRef::Text(b"3,000")), Some(dec!(3000)));
        assert_eq!(amount_from_sql(ValueRef::Null), None);
        assert_eq!(amount_from_sql(ValueRef::Blob(b"00")), None);
    }

    #[test]
    fn contributing_amount_never_goes_negative() {
        assert_eq!(contributing_amount(None), dec!(0));
        assert_eq!(contributing_amount(Some(dec!(-5))), dec!(0));
        assert_eq!(contributing_amount(Some(dec!(5))), dec!(5));
    }
}
