//! Date extraction and normalization to `YYYY-MM-DD`.

use chrono::NaiveDate;
use regex::Captures;

use super::patterns::{DATE_ISO, DATE_LONG, DATE_MDY};
use super::{first_match, whole, FieldExtractor, FieldMatch, FieldTable, Rule};
use crate::models::record::Field;

/// Two-digit years up to this value belong to the 2000s, later ones to the 1900s.
const CENTURY_PIVOT: i32 = 68;

/// Invoice date extractor.
///
/// Patterns are tried in a fixed priority order (MM/DD/YYYY, ISO, then
/// "Month DD, YYYY"); the first pattern that matches anywhere wins, even if a
/// lower-priority format appears earlier in the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    fn rules() -> [Rule; 3] {
        [
            Rule { name: "month/day/year", pattern: &DATE_MDY, transform: whole },
            Rule { name: "iso", pattern: &DATE_ISO, transform: whole },
            Rule { name: "month name", pattern: &DATE_LONG, transform: whole },
        ]
    }
}

impl FieldExtractor for DateExtractor {
    fn field(&self) -> Field {
        Field::InvoiceDate
    }

    fn extract(&self, text: &str, _prior: &FieldTable) -> FieldMatch {
        let Some(m) = first_match(&Self::rules(), text) else {
            return FieldMatch::missing().with_question("Could not extract an invoice date.");
        };

        match normalize_date(&m.value) {
            Some(date) => {
                let iso = date.format("%Y-%m-%d").to_string();
                match two_digit_year(&m.value) {
                    Some(yy) => FieldMatch::found(iso.clone()).with_assumption(format!(
                        "two-digit year '{yy}' in date '{}' read as {}.",
                        m.value,
                        &iso[..4]
                    )),
                    None => FieldMatch::found(iso),
                }
            }
            None => FieldMatch::found(m.value.clone()).with_assumption(format!(
                "invoice date '{}' is not a valid calendar date; kept as written.",
                m.value
            )),
        }
    }
}

/// Parse a date written as MM/DD/YYYY, MM/DD/YY, YYYY-MM-DD or
/// "Month DD, YYYY". Returns `None` when the text is not one of these
/// formats or is not a valid calendar date.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Some(caps) = anchored(&DATE_MDY, raw) {
        let month = caps[1].parse().ok()?;
        let day = caps[2].parse().ok()?;
        let year = parse_year(&caps[3])?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = anchored(&DATE_ISO, raw) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = anchored(&DATE_LONG, raw) {
        let month = month_to_number(&caps[1])?;
        let day = caps[2].parse().ok()?;
        let year = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

fn anchored<'t>(re: &regex::Regex, raw: &'t str) -> Option<Captures<'t>> {
    re.captures(raw)
        .filter(|caps| caps.get(0).is_some_and(|m| m.start() == 0 && m.end() == raw.len()))
}

/// The two-digit year of an MM/DD/YY date, if that is what `raw` is.
fn two_digit_year(raw: &str) -> Option<String> {
    anchored(&DATE_MDY, raw.trim())
        .map(|caps| caps[3].to_string())
        .filter(|year| year.len() == 2)
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() == 2 {
        // Two-digit year: 00-68 → 2000s, 69-99 → 1900s
        if year <= CENTURY_PIVOT {
            Some(2000 + year)
        } else {
            Some(1900 + year)
        }
    } else {
        Some(year)
    }
}

fn month_to_number(month: &str) -> Option<u32> {
    let prefix: String = month.to_lowercase().chars().take(3).collect();
    match prefix.as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}
