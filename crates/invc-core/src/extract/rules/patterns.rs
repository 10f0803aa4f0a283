//! Common regex patterns for invoice/receipt extraction.
//!
//! All patterns run against normalized text: one space between tokens,
//! trimmed lines, canonical label spellings.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Amounts: optional sign and `$`, thousands commas, exactly two decimals.
    // The leading class keeps matches from starting mid-token.
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"(?:^|[^\w.,$-])(-?\$? ?(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2})\b"
    ).unwrap();

    // Dates, in extraction priority order
    pub static ref DATE_MDY: Regex = Regex::new(
        r"\b(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})\b"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"\b(\d{4})-(\d{2})-(\d{2})\b"
    ).unwrap();

    pub static ref DATE_LONG: Regex = Regex::new(
        r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.? (\d{1,2}),? ?(\d{4})\b"
    ).unwrap();

    // Time of day, with an optional US timezone suffix
    pub static ref TIME_PATTERN: Regex = Regex::new(
        r"\b\d{1,2}:\d{2}(?::\d{2})? ?(?i:[ap]m)\b(?: ?(?:[ECMP][SD]?T|AK[SD]T|HST|UTC|GMT)\b)?"
    ).unwrap();

    // Document type vocabulary
    pub static ref INVOICE_TYPE: Regex = Regex::new(
        r"(?i)\b(receipt|invoice|estimate|quote|purchase order|delivery ticket|work order)\b"
    ).unwrap();

    // Location
    pub static ref LOCATION_LABEL: Regex = Regex::new(
        r"(?im)\blocation ?[§#@:»] ?(.+)$"
    ).unwrap();

    pub static ref ADDRESS_BLOCK: Regex = Regex::new(
        r"(?i)\b(\d+ [A-Z][A-Z ]*?\b(?:STREET|ST|AVENUE|AVE|ROAD|RD|BOULEVARD|BLVD|DRIVE|DR|WAY|LANE|LN|COURT|CT|PARKWAY|PKWY|HIGHWAY|HWY)\b[^\n]*)\n([^\n]*?\b(?-i:[A-Z]{2}),? \d{5}(?:-\d{4})?)\b"
    ).unwrap();

    // Labels for label-anchored fields
    pub static ref JOB_NAME_LABEL: Regex = Regex::new(
        r"(?i)\b(?:po ?/ ?job name|job name|job ?#)"
    ).unwrap();

    pub static ref PO_NUMBER_LABEL: Regex = Regex::new(
        r"(?i)\b(?:order ?#|po ?#|po number\b|order no\b\.?)"
    ).unwrap();

    pub static ref SALES_PERSON_LABEL: Regex = Regex::new(
        r"(?i)\bsales ?person\b"
    ).unwrap();

    pub static ref STORE_NUMBER_LABEL: Regex = Regex::new(
        r"(?i)\bstore ?(?:#|no\b\.?|number\b)"
    ).unwrap();

    pub static ref STORE_PHONE_LABEL: Regex = Regex::new(
        r"(?i)\bstore phone\b ?#?"
    ).unwrap();

    /// Any label that ends the value of another label on the same line.
    pub static ref ANY_LABEL: Regex = Regex::new(
        r"(?i)\b(?:po ?/ ?job name|job name|job ?#|order ?#|po ?#|po number\b|order no\b|sales ?person\b|store ?(?:#|no\b|number\b)|store phone\b|location ?[§#@:»])"
    ).unwrap();

    pub static ref VALUE_DELIMITER: Regex = Regex::new(r"[|;]").unwrap();

    pub static ref LABEL_SEPARATOR: Regex = Regex::new(r"^[\s:#§»@-]+").unwrap();

    // Value shapes for label-anchored fields
    pub static ref PO_VALUE: Regex = Regex::new(r"(?i)^[A-Z0-9][A-Z0-9-]*").unwrap();

    pub static ref STORE_NUMBER_VALUE: Regex = Regex::new(r"^\w+").unwrap();

    pub static ref PHONE_VALUE: Regex = Regex::new(r"^[(\d][\d .()-]{7,}").unwrap();

    // Line-item table
    pub static ref HEADER_ITEM_COLUMN: Regex = Regex::new(
        r"(?i)\b(?:description|item|model|sku)\b"
    ).unwrap();

    pub static ref HEADER_PRICE_COLUMN: Regex = Regex::new(r"(?i)\bprice\b").unwrap();

    pub static ref HEADER_QTY_COLUMN: Regex = Regex::new(r"(?i)\b(?:qty|quantity)\b").unwrap();

    pub static ref ITEMS_END: Regex = Regex::new(
        r"(?i)\b(?:sub[ -]?total|order total|grand total)\b"
    ).unwrap();

    pub static ref ROW_START: Regex = Regex::new(r"^(\d{1,3}) +\S").unwrap();

    pub static ref DISCOUNT_MARKER: Regex = Regex::new(
        r"(?i)\b(?:preferred pricing|instant savings|discount|sale price|markdown|you pay)\b"
    ).unwrap();

    // `Model #`, `Model No.`, `Model:` take any value; a bare `Model` only
    // counts when the value holds a digit or is `N/A`.
    pub static ref MODEL_LABEL: Regex = Regex::new(
        r"(?i)\bmodel(?: ?(?:#|no\b\.?|number\b) ?:?| ?:) ?([A-Z0-9][A-Z0-9/.-]*)|\bmodel ((?:N/A|[A-Z0-9/.-]*\d[A-Z0-9/.-]*)\b)"
    ).unwrap();

    pub static ref TRAILING_NA: Regex = Regex::new(r"(?i) ?\bN/A$").unwrap();

    pub static ref SKU_PATTERN: Regex = Regex::new(r"\b(\d{6,})\b").unwrap();

    pub static ref STANDALONE_NUMBER: Regex = Regex::new(
        r"(?:^|\s)(\d+(?:\.\d+)?)(?:\s|$)"
    ).unwrap();

    // Totals
    pub static ref SUBTOTAL_LABEL: Regex = Regex::new(r"(?i)\bsub[ -]?total\b").unwrap();

    pub static ref SALES_TAX_LABEL: Regex = Regex::new(r"(?i)\bsales tax\b").unwrap();

    pub static ref TAX_LABEL: Regex = Regex::new(r"(?i)\btax\b").unwrap();

    /// Lines where a bare `Tax` label is not the tax amount.
    pub static ref NOT_TAX: Regex = Regex::new(
        r"(?i)\b(?:pre-?tax|tax ?id|tax exempt|taxable)\b"
    ).unwrap();

    pub static ref ORDER_TOTAL_LABEL: Regex = Regex::new(r"(?i)\border total\b").unwrap();

    pub static ref GRAND_TOTAL_LABEL: Regex = Regex::new(r"(?i)\bgrand total\b").unwrap();

    pub static ref TOTAL_LABEL: Regex = Regex::new(r"(?i)\btotal\b").unwrap();

    /// Lines where a bare `Total` label is something other than the order total.
    pub static ref NOT_ORDER_TOTAL: Regex = Regex::new(
        r"(?i)\b(?:sub[ -]?total|savings|discount|tax|items?|qty)\b"
    ).unwrap();
}
