//! Document totals: subtotal, tax and order total.

use regex::Regex;
use rust_decimal::Decimal;

use super::amounts::first_amount;
use super::patterns::{
    GRAND_TOTAL_LABEL, NOT_ORDER_TOTAL, NOT_TAX, ORDER_TOTAL_LABEL, SALES_TAX_LABEL,
    SUBTOTAL_LABEL, TAX_LABEL, TOTAL_LABEL,
};
use crate::models::notes::Notes;
use crate::models::record::Totals;

/// Extract the three totals independently from normalized text.
///
/// Each value is the first amount following its label on the same line;
/// a label occurrence without a trailing amount is skipped.
pub fn extract_totals(text: &str) -> (Totals, Notes) {
    let mut notes = Notes::new();

    let subtotal = labeled_amount(text, &SUBTOTAL_LABEL, None);

    let tax = labeled_amount(text, &SALES_TAX_LABEL, None)
        .or_else(|| labeled_amount(text, &TAX_LABEL, Some(&NOT_TAX)));

    let mut total = labeled_amount(text, &ORDER_TOTAL_LABEL, None)
        .or_else(|| labeled_amount(text, &GRAND_TOTAL_LABEL, None));
    if total.is_none() {
        total = labeled_amount(text, &TOTAL_LABEL, Some(&NOT_ORDER_TOTAL));
        if total.is_some() {
            notes.assume("order total taken from a plain 'Total' line.");
        }
    }
    if total.is_none() {
        notes.ask("Could not extract an order total.");
    }

    (Totals { subtotal, tax, total }, notes)
}

fn labeled_amount(text: &str, label: &Regex, skip: Option<&Regex>) -> Option<Decimal> {
    text.lines()
        .filter(|line| skip.is_none_or(|re| !re.is_match(line)))
        .find_map(|line| {
            label
                .find_iter(line)
                .find_map(|m| first_amount(&line[m.end()..]))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Option<Decimal> {
        Some(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn test_subtotal_and_grand_total_without_tax() {
        let (totals, notes) = extract_totals("Subtotal: $10.00\nGrand Total: $12.50");
        assert_eq!(
            totals,
            Totals {
                subtotal: dec("10.00"),
                tax: None,
                total: dec("12.50"),
            }
        );
        assert!(notes.is_empty());
    }

    #[test]
    fn test_sales_tax_skips_rate() {
        let (totals, _) = extract_totals("Sales Tax 7.25% $1.45\nOrder Total $21.45");
        assert_eq!(totals.tax, dec("1.45"));
        assert_eq!(totals.total, dec("21.45"));
    }

    #[test]
    fn test_plain_total_fallback() {
        let text = "Sub-total $8.00\nTotal Savings $2.00\nTax $0.48\nTotal $6.48";
        let (totals, notes) = extract_totals(text);
        assert_eq!(totals.subtotal, dec("8.00"));
        assert_eq!(totals.tax, dec("0.48"));
        assert_eq!(totals.total, dec("6.48"));
        assert_eq!(notes.assumptions.len(), 1);
    }

    #[test]
    fn test_pre_tax_and_exempt_lines_are_not_tax() {
        let (totals, _) = extract_totals("Pre-Tax Amount $10.00\nTax Exempt\nTotal $10.00");
        assert_eq!(totals.tax, None);
        assert_eq!(totals.total, dec("10.00"));

        let (totals, _) = extract_totals("Taxable $10.00\nTax ID 12-3456789 $0.00\nTax $0.80");
        assert_eq!(totals.tax, dec("0.80"));
    }

    #[test]
    fn test_label_without_amount_is_skipped() {
        let (totals, _) = extract_totals("ORDER TOTAL\nsee below\nORDER TOTAL: 1,049.80");
        assert_eq!(totals.total, dec("1049.80"));
    }

    #[test]
    fn test_missing_total_asks() {
        let (totals, notes) = extract_totals("SUBTOTAL $3.00");
        assert_eq!(totals.total, None);
        assert_eq!(notes.questions, vec!["Could not extract an order total."]);
    }
}
