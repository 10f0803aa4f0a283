//! Currency amount parsing.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT_PATTERN;

/// A currency amount found in a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    /// Parsed value; negative for `-$x.xx` adjustments.
    pub value: Decimal,
    /// Whether the source carried a `$` sign.
    pub dollar: bool,
    /// Byte range of the amount in the searched text.
    pub start: usize,
    pub end: usize,
}

impl Amount {
    pub fn is_negative(&self) -> bool {
        self.value.is_sign_negative()
    }
}

/// Find every two-decimal amount in `text`, `$` optional.
/// Amounts directly followed by `%` are rates, not money, and are skipped.
pub fn scan_amounts(text: &str) -> Vec<Amount> {
    AMOUNT_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let m = caps.get(1)?;
            if text[m.end()..].starts_with('%') {
                return None;
            }
            Some(Amount {
                value: parse_amount(m.as_str())?,
                dollar: m.as_str().contains('$'),
                start: m.start(),
                end: m.end(),
            })
        })
        .collect()
}

/// Find the currency amounts of a line-item row.
///
/// `$`-prefixed amounts are preferred; when a row carries none (OCR often
/// drops the sign) every bare two-decimal amount counts instead.
pub fn currency_amounts(text: &str) -> Vec<Amount> {
    let all = scan_amounts(text);
    if all.iter().any(|a| a.dollar) {
        all.into_iter().filter(|a| a.dollar).collect()
    } else {
        all
    }
}

/// First amount in `text` (the nearest trailing amount after a label).
pub fn first_amount(text: &str) -> Option<Decimal> {
    scan_amounts(text).first().map(|a| a.value)
}

/// Parse an amount such as `$1,234.56`, `-$2.00` or `12.50`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    Decimal::from_str(&cleaned).ok()
}
