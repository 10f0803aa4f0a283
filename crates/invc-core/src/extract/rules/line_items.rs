//! Line-item table: segmentation into row groups and per-row parsing.
//!
//! The table region runs from the column-header row (a line naming an item,
//! a price and a quantity column) to the first totals line after it. Inside
//! the region every line starting with a row number opens a new row group;
//! other lines continue the current group.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use super::amounts::{currency_amounts, scan_amounts};
use super::patterns::{
    DISCOUNT_MARKER, HEADER_ITEM_COLUMN, HEADER_PRICE_COLUMN, HEADER_QTY_COLUMN, ITEMS_END,
    MODEL_LABEL, ROW_START, SKU_PATTERN, STANDALONE_NUMBER, TRAILING_NA,
};
use crate::models::notes::Notes;
use crate::models::record::LineItem;

/// One logical line item, possibly spanning several source lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGroup {
    /// Row number printed at the start of the group.
    pub ordinal: u32,
    /// Source lines, first line included.
    pub lines: Vec<String>,
}

impl RowGroup {
    /// Join the group's lines with single spaces.
    pub fn flatten(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Split normalized text into row groups.
///
/// A missing header row or a missing end boundary is not an error: it yields
/// no rows and an assumption naming the missing boundary.
pub fn segment_rows(text: &str) -> (Vec<RowGroup>, Notes) {
    let mut notes = Notes::new();

    let region = match item_region(text) {
        Ok(region) => region,
        Err(missing) => {
            notes.assume(missing);
            return (Vec::new(), notes);
        }
    };

    let mut rows: Vec<RowGroup> = Vec::new();
    for line in region {
        if let Some(caps) = ROW_START.captures(line) {
            rows.push(RowGroup {
                ordinal: caps[1].parse().unwrap_or_default(),
                lines: vec![line.to_string()],
            });
        } else if let Some(row) = rows.last_mut() {
            row.lines.push(line.to_string());
        }
    }

    (rows, notes)
}

fn item_region(text: &str) -> Result<Vec<&str>, &'static str> {
    let lines: Vec<&str> = text.lines().collect();

    let header = lines.iter().position(|line| is_header(line)).ok_or(
        "no line-item header row (item, price and qty columns) found; line items not extracted.",
    )?;

    let body = &lines[header + 1..];
    let end = body.iter().position(|line| ITEMS_END.is_match(line)).ok_or(
        "line-item table has no closing subtotal or total line; line items not extracted.",
    )?;

    Ok(body[..end].to_vec())
}

fn is_header(line: &str) -> bool {
    HEADER_ITEM_COLUMN.is_match(line)
        && HEADER_PRICE_COLUMN.is_match(line)
        && HEADER_QTY_COLUMN.is_match(line)
}

/// Parse one row group into a line item.
///
/// Fields are extracted independently; a field that cannot be found is left
/// `None` without affecting the others. The description is never empty.
pub fn parse_row(row: &RowGroup) -> (LineItem, Notes) {
    let mut notes = Notes::new();
    let flat = row.flatten();
    let body = strip_row_number(&flat);

    let amounts = currency_amounts(body);

    // Digit runs inside amounts and the model value never count as sku or qty.
    let mut masked: Vec<(usize, usize)> = scan_amounts(body).iter().map(|a| (a.start, a.end)).collect();

    let model_caps = MODEL_LABEL.captures(body);
    let model_label_start = model_caps.as_ref().and_then(|c| c.get(0)).map(|m| m.start());
    let model_value = model_caps.as_ref().and_then(|c| c.get(1).or(c.get(2)));
    if let Some(m) = model_value {
        masked.push((m.start(), m.end()));
    }
    let model = model_value
        .map(|m| m.as_str())
        .filter(|value| !value.eq_ignore_ascii_case("N/A"))
        .map(str::to_string);

    let sku_span = SKU_PATTERN
        .captures(&mask(body, &masked))
        .and_then(|c| c.get(1))
        .map(|m| (m.start(), m.end()));
    let sku = sku_span.map(|(start, end)| body[start..end].to_string());

    if let Some(span) = sku_span {
        masked.push(span);
    }
    // Quantity columns usually follow the sku; some layouts print it first.
    let masked_body = mask(body, &masked);
    let qty = match sku_span {
        Some((start, end)) => {
            first_quantity(&masked_body[end..]).or_else(|| first_quantity(&masked_body[..start]))
        }
        None => first_quantity(&masked_body),
    };

    let marker = DISCOUNT_MARKER.find(body);
    let discounted = marker.and_then(|m| {
        amounts
            .iter()
            .position(|a| a.start >= m.end() && !a.is_negative())
    });
    let unit_price = discounted
        .or(if amounts.is_empty() { None } else { Some(0) })
        .map(|i| amounts[i].value);

    let subtotal = amounts
        .iter()
        .enumerate()
        .rev()
        .find(|(i, a)| Some(*i) != discounted && !a.is_negative())
        .or_else(|| amounts.iter().enumerate().rev().find(|(_, a)| !a.is_negative()))
        .map(|(_, a)| a.value);

    match (marker, discounted) {
        (Some(m), Some(_)) => notes.assume(format!(
            "line item {}: unit price taken from the amount after '{}'.",
            row.ordinal,
            m.as_str()
        )),
        (Some(m), None) if unit_price.is_some() => notes.assume(format!(
            "line item {}: no amount follows '{}'; unit price taken as the first amount.",
            row.ordinal,
            m.as_str()
        )),
        (None, _) if amounts.len() > 2 => notes.assume(format!(
            "line item {}: {} amounts on the row; unit price taken as the first, subtotal as the last.",
            row.ordinal,
            amounts.len()
        )),
        _ => {}
    }

    let cut = sku_span
        .map(|(start, _)| start)
        .or_else(|| amounts.first().map(|a| a.start))
        .unwrap_or(body.len());

    let description = model_label_start
        .filter(|&start| start < cut)
        .and_then(|start| clean_description(&body[..start]))
        .or_else(|| clean_description(&body[..cut]))
        .or_else(|| clean_description(body))
        .unwrap_or_else(|| flat.clone());

    let item = LineItem {
        description,
        sku,
        model,
        unit_price,
        qty,
        subtotal,
    };

    (item, notes)
}

/// Segment and parse every line item of a document.
pub fn extract_line_items(text: &str) -> (Vec<LineItem>, Notes) {
    let (rows, mut notes) = segment_rows(text);

    let items: Vec<LineItem> = rows
        .iter()
        .map(|row| {
            let (item, row_notes) = parse_row(row);
            notes.extend(row_notes);
            item
        })
        .collect();

    debug!(rows = items.len(), "parsed line items");
    (items, notes)
}

fn first_quantity(text: &str) -> Option<Decimal> {
    STANDALONE_NUMBER
        .captures_iter(text)
        .filter_map(|c| Decimal::from_str(c.get(1)?.as_str()).ok())
        .find(|q| *q > Decimal::ZERO)
}

fn strip_row_number(flat: &str) -> &str {
    match ROW_START.captures(flat).and_then(|c| c.get(1)) {
        Some(number) => flat[number.end()..].trim_start(),
        None => flat,
    }
}

/// Blank out byte ranges. Ranges only ever cover ASCII text, so byte
/// offsets stay valid in the result.
fn mask(text: &str, ranges: &[(usize, usize)]) -> String {
    let mut bytes = text.as_bytes().to_vec();
    for &(start, end) in ranges {
        for b in &mut bytes[start..end] {
            *b = b' ';
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn clean_description(text: &str) -> Option<String> {
    let text = TRAILING_NA.replace(text.trim(), "");
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!cleaned.is_empty()).then_some(cleaned)
}
