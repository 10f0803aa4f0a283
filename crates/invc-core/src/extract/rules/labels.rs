//! Label-anchored fields: job name, PO number, sales person, store number
//! and store phone.

use regex::Regex;

use super::patterns::{
    ANY_LABEL, JOB_NAME_LABEL, LABEL_SEPARATOR, PHONE_VALUE, PO_NUMBER_LABEL, PO_VALUE,
    SALES_PERSON_LABEL, STORE_NUMBER_LABEL, STORE_NUMBER_VALUE, STORE_PHONE_LABEL,
    VALUE_DELIMITER,
};
use super::{FieldExtractor, FieldMatch, FieldTable};
use crate::models::record::Field;

/// Extractor for one label-anchored field.
///
/// The value is the rest of the label's line, up to the next `|`, `;` or
/// known label, restricted to the field's value shape. An occurrence whose
/// value comes out empty is skipped and the next occurrence is tried.
#[derive(Debug, Clone, Copy)]
pub struct LabelExtractor {
    field: Field,
}

impl LabelExtractor {
    /// Returns `None` for fields that are not label-anchored.
    pub fn new(field: Field) -> Option<Self> {
        label_for(field).map(|_| Self { field })
    }

    /// All label-anchored extractors, in extraction order.
    pub fn all() -> Vec<Self> {
        Field::ALL.into_iter().filter_map(Self::new).collect()
    }

    fn value_at(&self, rest: &str) -> Option<String> {
        let rest = LABEL_SEPARATOR.replace(rest, "");
        let end = [VALUE_DELIMITER.find(&rest), ANY_LABEL.find(&rest)]
            .into_iter()
            .flatten()
            .map(|m| m.start())
            .min()
            .unwrap_or(rest.len());
        let value = rest[..end].trim();

        let value = match shape_for(self.field) {
            Some(shape) => shape.find(value)?.as_str().trim(),
            None => value,
        };

        (!value.is_empty()).then(|| value.to_string())
    }
}

impl FieldExtractor for LabelExtractor {
    fn field(&self) -> Field {
        self.field
    }

    fn extract(&self, text: &str, prior: &FieldTable) -> FieldMatch {
        let Some(label) = label_for(self.field) else {
            return FieldMatch::missing();
        };

        let found = label.find_iter(text).find_map(|m| {
            let rest = &text[m.end()..];
            let line = rest.split('\n').next().unwrap_or_default();
            self.value_at(line)
        });

        match found {
            Some(value) => FieldMatch::found(value),
            None if self.field == Field::StoreNumber => match prior.get(Field::VendorName) {
                Some(vendor) => FieldMatch::missing().with_question(format!(
                    "No {} found on a {vendor} document; which store issued it?",
                    self.field.label()
                )),
                None => FieldMatch::missing(),
            },
            None => FieldMatch::missing(),
        }
    }
}

fn label_for(field: Field) -> Option<&'static Regex> {
    match field {
        Field::JobName => Some(&JOB_NAME_LABEL),
        Field::PoNumber => Some(&PO_NUMBER_LABEL),
        Field::SalesPerson => Some(&SALES_PERSON_LABEL),
        Field::StoreNumber => Some(&STORE_NUMBER_LABEL),
        Field::StorePhone => Some(&STORE_PHONE_LABEL),
        _ => None,
    }
}

// Job name and sales person are free text.
fn shape_for(field: Field) -> Option<&'static Regex> {
    match field {
        Field::PoNumber => Some(&PO_VALUE),
        Field::StoreNumber => Some(&STORE_NUMBER_VALUE),
        Field::StorePhone => Some(&PHONE_VALUE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use pretty_assertions::assert_eq;

    fn extract(field: Field, text: &str) -> Option<String> {
        LabelExtractor::new(field)
            .unwrap()
            .extract(&normalize(text), &FieldTable::new())
            .value
    }

    #[test]
    fn test_po_number() {
        assert_eq!(extract(Field::PoNumber, "Order # H1234-56789").as_deref(), Some("H1234-56789"));
        assert_eq!(extract(Field::PoNumber, "PO Number: 778 REV").as_deref(), Some("778"));
    }

    #[test]
    fn test_ocr_corrupted_order_label() {
        assert_eq!(extract(Field::PoNumber, "Ofdler # W123456789").as_deref(), Some("W123456789"));
        assert_eq!(extract(Field::PoNumber, "0rder  # 42").as_deref(), Some("42"));
    }

    #[test]
    fn test_value_stops_at_delimiter_or_label() {
        let text = "PO/JOB NAME: DECK REMODEL | ORDER # H55\nSALES PERSON: JANE D STORE # 0123";
        assert_eq!(extract(Field::JobName, text).as_deref(), Some("DECK REMODEL"));
        assert_eq!(extract(Field::PoNumber, text).as_deref(), Some("H55"));
        assert_eq!(extract(Field::SalesPerson, text).as_deref(), Some("JANE D"));
        assert_eq!(extract(Field::StoreNumber, text).as_deref(), Some("0123"));
    }

    #[test]
    fn test_location_word_inside_value() {
        assert_eq!(
            extract(Field::JobName, "JOB NAME: NEW LOCATION BUILDOUT").as_deref(),
            Some("NEW LOCATION BUILDOUT")
        );
        assert_eq!(
            extract(Field::SalesPerson, "SALES PERSON: JANE D Location: 0604").as_deref(),
            Some("JANE D")
        );
    }

    #[test]
    fn test_empty_value_tries_next_occurrence() {
        let text = "JOB NAME:\nsomething\nJOB NAME: GARAGE";
        assert_eq!(extract(Field::JobName, text).as_deref(), Some("GARAGE"));
    }

    #[test]
    fn test_store_phone() {
        let text = "STORE # 0123 | STORE PHONE # (555) 123-4567";
        assert_eq!(extract(Field::StorePhone, text).as_deref(), Some("(555) 123-4567"));
        assert_eq!(extract(Field::StoreNumber, text).as_deref(), Some("0123"));
        assert_eq!(extract(Field::StorePhone, "STORE PHONE # call us"), None);
    }

    #[test]
    fn test_missing_store_number_for_known_vendor() {
        let extractor = LabelExtractor::new(Field::StoreNumber).unwrap();
        let mut prior = FieldTable::new();
        assert!(extractor.extract("no store here", &prior).notes.is_empty());

        prior.insert(Field::VendorName, "Menards".to_string());
        let m = extractor.extract("no store here", &prior);
        assert_eq!(m.value, None);
        assert_eq!(
            m.notes.questions,
            vec!["No store number found on a Menards document; which store issued it?"]
        );
    }

    #[test]
    fn test_only_label_fields() {
        assert!(LabelExtractor::new(Field::VendorName).is_none());
        let fields: Vec<Field> = LabelExtractor::all().iter().map(|e| e.field()).collect();
        assert_eq!(
            fields,
            vec![
                Field::JobName,
                Field::PoNumber,
                Field::SalesPerson,
                Field::StoreNumber,
                Field::StorePhone
            ]
        );
    }
}
