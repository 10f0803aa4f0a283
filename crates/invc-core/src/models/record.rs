//! Invoice record models.
//!
//! The serialized shape of [`InvoiceRecord`] is the output contract of the
//! extractor: every key is always present and unresolved scalars are `null`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One input document: decoded text plus the name it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Identifying source name (usually the file name).
    pub source_name: String,
    /// Raw decoded text, before any normalization.
    pub text: String,
}

impl Document {
    pub fn new(source_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            text: text.into(),
        }
    }
}

/// Scalar fields of an invoice record, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    VendorName,
    VendorLocation,
    InvoiceType,
    InvoiceDate,
    InvoiceTime,
    JobName,
    PoNumber,
    SalesPerson,
    StoreNumber,
    StorePhone,
}

impl Field {
    /// All scalar fields, in the order they are extracted and serialized.
    pub const ALL: [Field; 10] = [
        Field::VendorName,
        Field::VendorLocation,
        Field::InvoiceType,
        Field::InvoiceDate,
        Field::InvoiceTime,
        Field::JobName,
        Field::PoNumber,
        Field::SalesPerson,
        Field::StoreNumber,
        Field::StorePhone,
    ];

    /// JSON key of the field.
    pub fn key(&self) -> &'static str {
        match self {
            Field::VendorName => "vendor_name",
            Field::VendorLocation => "vendor_location",
            Field::InvoiceType => "invoice_type",
            Field::InvoiceDate => "invoice_date",
            Field::InvoiceTime => "invoice_time",
            Field::JobName => "job_name",
            Field::PoNumber => "po_number",
            Field::SalesPerson => "sales_person",
            Field::StoreNumber => "store_number",
            Field::StorePhone => "store_phone",
        }
    }

    /// Human readable label used in notes.
    pub fn label(&self) -> &'static str {
        match self {
            Field::VendorName => "vendor",
            Field::VendorLocation => "vendor location",
            Field::InvoiceType => "invoice type",
            Field::InvoiceDate => "invoice date",
            Field::InvoiceTime => "invoice time",
            Field::JobName => "job name",
            Field::PoNumber => "PO number",
            Field::SalesPerson => "sales person",
            Field::StoreNumber => "store number",
            Field::StorePhone => "store phone",
        }
    }
}

/// The structured record extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Source name of the document.
    pub source_file: String,

    /// Canonical vendor name from the known-vendor table.
    pub vendor_name: Option<String>,

    /// Store location (labeled or inferred from an address block).
    pub vendor_location: Option<String>,

    /// Document type, e.g. `receipt` or `purchase_order`.
    pub invoice_type: Option<String>,

    /// Invoice date, `YYYY-MM-DD` when reconstructable.
    pub invoice_date: Option<String>,

    /// Invoice time as written.
    pub invoice_time: Option<String>,

    pub job_name: Option<String>,
    pub po_number: Option<String>,
    pub sales_person: Option<String>,
    pub store_number: Option<String>,
    pub store_phone: Option<String>,

    /// Parsed line items (possibly empty).
    pub line_items: Vec<LineItem>,

    /// Document totals.
    pub totals: Totals,

    /// Prefix of the original, non-normalized text.
    pub raw_text_excerpt: String,
}

impl InvoiceRecord {
    /// Create an empty record for a source.
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            ..Self::default()
        }
    }

    /// Get a scalar field.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Set a scalar field. Blank values are stored as `None`.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        *self.slot_mut(field) = value.and_then(clean_scalar);
    }

    /// Fields that are still unresolved.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::VendorName => &self.vendor_name,
            Field::VendorLocation => &self.vendor_location,
            Field::InvoiceType => &self.invoice_type,
            Field::InvoiceDate => &self.invoice_date,
            Field::InvoiceTime => &self.invoice_time,
            Field::JobName => &self.job_name,
            Field::PoNumber => &self.po_number,
            Field::SalesPerson => &self.sales_person,
            Field::StoreNumber => &self.store_number,
            Field::StorePhone => &self.store_phone,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::VendorName => &mut self.vendor_name,
            Field::VendorLocation => &mut self.vendor_location,
            Field::InvoiceType => &mut self.invoice_type,
            Field::InvoiceDate => &mut self.invoice_date,
            Field::InvoiceTime => &mut self.invoice_time,
            Field::JobName => &mut self.job_name,
            Field::PoNumber => &mut self.po_number,
            Field::SalesPerson => &mut self.sales_person,
            Field::StoreNumber => &mut self.store_number,
            Field::StorePhone => &mut self.store_phone,
        }
    }
}

/// A single line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description, never empty.
    pub description: String,

    /// Numeric SKU (6+ digits).
    pub sku: Option<String>,

    /// Model number; `None` when the source marks it `N/A`.
    pub model: Option<String>,

    /// Unit price, post-discount when a discount marker is present.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub unit_price: Option<Decimal>,

    /// Quantity.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub qty: Option<Decimal>,

    /// Extended price (last amount on the row).
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub subtotal: Option<Decimal>,
}

/// Document totals, each matched independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub subtotal: Option<Decimal>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub tax: Option<Decimal>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,
}

impl Totals {
    /// Number of totals that were found (0-3).
    pub fn found(&self) -> usize {
        [self.subtotal, self.tax, self.total]
            .iter()
            .filter(|v| v.is_some())
            .count()
    }
}

/// Trim a candidate scalar value; blank becomes `None`.
pub fn clean_scalar(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_set_blank_is_none() {
        let mut record = InvoiceRecord::new("a.txt");
        record.set(Field::JobName, Some("   ".to_string()));
        assert_eq!(record.job_name, None);

        record.set(Field::JobName, Some("  KITCHEN REMODEL ".to_string()));
        assert_eq!(record.get(Field::JobName), Some("KITCHEN REMODEL"));
    }

    #[test]
    fn test_record_serializes_nulls_in_order() {
        let record = InvoiceRecord::new("a.txt");
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.starts_with(r#"{"source_file":"a.txt","vendor_name":null,"vendor_location":null"#));
        assert!(json.contains(r#""totals":{"subtotal":null,"tax":null,"total":null}"#));
        assert!(json.ends_with(r#""raw_text_excerpt":""}"#));
    }

    #[test]
    fn test_amounts_serialize_as_numbers() {
        let item = LineItem {
            description: "2X4 STUD".to_string(),
            sku: Some("1001234567".to_string()),
            model: None,
            unit_price: Some(Decimal::from_str("4.98").unwrap()),
            qty: Some(Decimal::from(10)),
            subtotal: Some(Decimal::from_str("49.80").unwrap()),
        };
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["unit_price"], serde_json::json!(4.98));
        assert_eq!(value["qty"], serde_json::json!(10.0));
        assert_eq!(value["model"], serde_json::Value::Null);
    }

    #[test]
    fn test_totals_found() {
        let totals = Totals {
            subtotal: Some(Decimal::from(10)),
            tax: None,
            total: Some(Decimal::from(12)),
        };
        assert_eq!(totals.found(), 2);
        assert_eq!(Totals::default().found(), 0);
    }

    #[test]
    fn test_missing_fields() {
        let mut record = InvoiceRecord::new("a.txt");
        record.set(Field::VendorName, Some("Menards".to_string()));
        let missing = record.missing_fields();
        assert_eq!(missing.len(), 9);
        assert!(!missing.contains(&Field::VendorName));
    }

    #[test]
    fn test_field_keys_are_record_keys() {
        let value = serde_json::to_value(InvoiceRecord::new("a.txt")).unwrap();
        for field in Field::ALL {
            assert_eq!(value.get(field.key()), Some(&serde_json::Value::Null), "{}", field.label());
        }
    }
}
