//! Human-facing outputs: the Markdown run report, the CSV summary, the
//! review listing and the plain-text rendering of a single record.

use std::fmt::{Display, Write as _};
use std::path::Path;

use invc_core::{BatchResult, FileStats, InvoiceRecord};

/// Keys every serialized invoice must carry.
const REQUIRED_KEYS: [&str; 14] = [
    "source_file",
    "vendor_name",
    "vendor_location",
    "invoice_type",
    "invoice_date",
    "invoice_time",
    "job_name",
    "po_number",
    "sales_person",
    "store_number",
    "store_phone",
    "line_items",
    "totals",
    "raw_text_excerpt",
];

/// Inputs of the Markdown report.
pub struct RunReport<'a> {
    pub batch: &'a BatchResult,
    pub stats: &'a [FileStats],
    pub inbox: &'a Path,
    pub out_file: &'a Path,
    pub ran_at: &'a str,
}

impl RunReport<'_> {
    /// Render the report with Plan, Execution and Verification sections.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let out_name = self
            .out_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "invoices.json".to_string());

        let _ = writeln!(out, "# invc run report\n");
        let _ = writeln!(out, "_Generated: {}_\n", self.ran_at);

        let _ = writeln!(out, "## Plan\n");
        let _ = writeln!(
            out,
            "- **Discover** all `.txt` files in `{}`, sorted by name.",
            self.inbox.display()
        );
        let _ = writeln!(
            out,
            "- **Extract** vendor, labeled fields, numbered line items and totals from each file."
        );
        let _ = writeln!(out, "- **Null** every field that cannot be reliably extracted.");
        let _ = writeln!(out, "- **Merge** records and notes across files; de-duplicate notes.");
        let _ = writeln!(out, "- **Write** `{out_name}` and this report.\n");

        let _ = writeln!(out, "## Execution\n");
        for stat in self.stats {
            let _ = writeln!(
                out,
                "- `{}`: {} line item(s) extracted, {}/3 totals fields found",
                stat.file, stat.line_items, stat.totals_found
            );
        }
        let _ = writeln!(out, "- **Total invoices**: {}", self.batch.invoices.len());
        let _ = writeln!(out, "- **Assumptions**: {}", self.batch.notes.assumptions.len());
        let _ = writeln!(out, "- **Questions**: {}", self.batch.notes.questions.len());
        let _ = writeln!(out, "- Run timestamp: `{}`\n", self.ran_at);

        let _ = writeln!(out, "## Verification\n");
        let checks = self.checks();
        for (passed, label) in &checks {
            let _ = writeln!(out, "- [{}] {}", if *passed { "x" } else { " " }, label);
        }
        let overall = if checks.iter().all(|(passed, _)| *passed) {
            "all checks passed"
        } else {
            "one or more checks FAILED"
        };
        let _ = writeln!(out, "\n**Overall**: {overall}");

        out
    }

    fn checks(&self) -> Vec<(bool, String)> {
        let mut checks = Vec::new();

        let value = serde_json::to_string(self.batch)
            .ok()
            .and_then(|json| serde_json::from_str::<serde_json::Value>(&json).ok());
        checks.push((
            value.is_some(),
            "JSON serializes and parses without error".to_string(),
        ));

        let Some(value) = value else {
            return checks;
        };

        for key in ["invoices", "assumptions", "questions"] {
            checks.push((value.get(key).is_some(), format!("Top-level key `{key}` present")));
        }

        let incomplete: Vec<String> = value["invoices"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter(|inv| REQUIRED_KEYS.iter().any(|k| inv.get(k).is_none()))
            .map(|inv| inv["source_file"].as_str().unwrap_or("?").to_string())
            .collect();
        checks.push((
            incomplete.is_empty(),
            with_files("All invoices have required schema fields", "missing in", &incomplete),
        ));

        let empty: Vec<String> = self
            .batch
            .invoices
            .iter()
            .filter(|inv| inv.line_items.is_empty())
            .map(|inv| inv.source_file.clone())
            .collect();
        checks.push((
            empty.is_empty(),
            with_files("All invoices have at least one line item", "empty", &empty),
        ));

        checks
    }
}

fn with_files(label: &str, kind: &str, files: &[String]) -> String {
    if files.is_empty() {
        label.to_string()
    } else {
        format!("{label} ({kind}: {})", files.join(", "))
    }
}

/// Write the per-file statistics as CSV.
pub fn write_summary(path: &Path, batch: &BatchResult) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "file",
        "vendor_name",
        "invoice_date",
        "po_number",
        "line_items",
        "totals_found",
        "total",
    ])?;

    for invoice in &batch.invoices {
        let stats = FileStats::of(invoice);
        wtr.write_record([
            stats.file.as_str(),
            invoice.vendor_name.as_deref().unwrap_or(""),
            invoice.invoice_date.as_deref().unwrap_or(""),
            invoice.po_number.as_deref().unwrap_or(""),
            stats.line_items.to_string().as_str(),
            stats.totals_found.to_string().as_str(),
            invoice.totals.total.map(|t| t.to_string()).unwrap_or_default().as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Concise listing shown before the `--review` prompt.
pub fn review_listing(batch: &BatchResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n── Invoices ──");
    for inv in &batch.invoices {
        let _ = writeln!(out, "  {}", inv.source_file);
        let _ = writeln!(out, "    vendor:  {}", or_null(&inv.vendor_name));
        let _ = writeln!(
            out,
            "    date:    {}  time: {}",
            or_null(&inv.invoice_date),
            or_null(&inv.invoice_time)
        );
        let _ = writeln!(
            out,
            "    job:     {}   PO: {}",
            or_null(&inv.job_name),
            or_null(&inv.po_number)
        );
        let _ = writeln!(out, "    items:   {}", inv.line_items.len());
        let _ = writeln!(
            out,
            "    totals:  sub={}  tax={}  total={}",
            fmt_amount(inv.totals.subtotal),
            fmt_amount(inv.totals.tax),
            fmt_amount(inv.totals.total)
        );
    }

    let _ = writeln!(out, "\n── Assumptions ──");
    for note in &batch.notes.assumptions {
        let _ = writeln!(out, "  • {note}");
    }

    let _ = writeln!(out, "\n── Questions ──");
    for note in &batch.notes.questions {
        let _ = writeln!(out, "  ? {note}");
    }

    out
}

/// Plain-text rendering of one record.
pub fn format_text(record: &InvoiceRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Source:   {}", record.source_file);
    let _ = writeln!(out, "Vendor:   {}", or_null(&record.vendor_name));
    let _ = writeln!(out, "Location: {}", or_null(&record.vendor_location));
    let _ = writeln!(out, "Type:     {}", or_null(&record.invoice_type));
    let _ = writeln!(
        out,
        "Date:     {} {}",
        or_null(&record.invoice_date),
        record.invoice_time.as_deref().unwrap_or("")
    );
    let _ = writeln!(out, "Job:      {}", or_null(&record.job_name));
    let _ = writeln!(out, "PO:       {}", or_null(&record.po_number));
    let _ = writeln!(
        out,
        "Store:    {} {}",
        or_null(&record.store_number),
        record.store_phone.as_deref().unwrap_or("")
    );
    let _ = writeln!(out, "Sales:    {}", or_null(&record.sales_person));

    let _ = writeln!(out, "\nLine items:");
    for item in &record.line_items {
        let _ = writeln!(
            out,
            "  {} | sku {} | qty {} | unit {} | subtotal {}",
            item.description,
            or_null(&item.sku),
            fmt_amount(item.qty),
            fmt_amount(item.unit_price),
            fmt_amount(item.subtotal)
        );
    }

    let _ = writeln!(out, "\nTotals:");
    let _ = writeln!(out, "  Subtotal: {}", fmt_amount(record.totals.subtotal));
    let _ = writeln!(out, "  Tax:      {}", fmt_amount(record.totals.tax));
    let _ = writeln!(out, "  Total:    {}", fmt_amount(record.totals.total));

    out
}

fn or_null(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("null")
}

fn fmt_amount<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use invc_core::extract;
    use pretty_assertions::assert_eq;

    fn batch() -> BatchResult {
        let mut batch = BatchResult::new();
        batch.push(extract(
            "MENARDS\nITEM PRICE QTY\n1 NAILS 123456 2 $3.00 $6.00\nSUBTOTAL $6.00\nORDER TOTAL $6.42",
            "menards.txt",
        ));
        batch.push(extract("blank", "blank.txt"));
        batch.finish()
    }

    #[test]
    fn test_report_sections() {
        let batch = batch();
        let stats = batch.stats();
        let report = RunReport {
            batch: &batch,
            stats: &stats,
            inbox: Path::new("inbox"),
            out_file: Path::new("out/invoices.json"),
            ran_at: "2024-03-14T12:00:00Z",
        }
        .render();

        let plan = report.find("## Plan").unwrap();
        let execution = report.find("## Execution").unwrap();
        let verification = report.find("## Verification").unwrap();
        assert!(plan < execution && execution < verification);

        assert!(report.contains("- `menards.txt`: 1 line item(s) extracted, 2/3 totals fields found"));
        assert!(report.contains("- [x] All invoices have required schema fields"));
        assert!(report.contains("- [ ] All invoices have at least one line item (empty: blank.txt)"));
        assert!(report.contains("**Overall**: one or more checks FAILED"));
    }

    #[test]
    fn test_summary_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary(&path, &batch()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "file,vendor_name,invoice_date,po_number,line_items,totals_found,total");
        assert_eq!(lines[1], "menards.txt,Menards,,,1,2,6.42");
        assert_eq!(lines[2], "blank.txt,,,,0,0,");
    }

    #[test]
    fn test_review_listing() {
        let listing = review_listing(&batch());
        assert!(listing.contains("vendor:  Menards"));
        assert!(listing.contains("totals:  sub=6.00  tax=null  total=6.42"));
        assert!(listing.contains("? blank.txt: What vendor issued this invoice?"));
    }
}
