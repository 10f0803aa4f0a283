//! PDF command - write a PDF's embedded text layer to a .txt file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use console::style;
use lopdf::Document;
use tracing::debug;

/// Embedded text with fewer non-whitespace characters than this means the
/// PDF is a scan.
const MIN_TEXT_CHARS: usize = 50;

/// Arguments for the pdf command.
#[derive(Args)]
pub struct PdfArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output text file (default: input with a .txt extension)
    output: Option<PathBuf>,
}

pub fn run(args: PdfArgs) -> anyhow::Result<()> {
    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("txt"));

    let data = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let (text, pages) = extract_text(&data)?;

    let chars = non_whitespace_chars(&text);
    if chars < MIN_TEXT_CHARS {
        anyhow::bail!(
            "Embedded text too small ({} non-whitespace chars): {} looks like a scanned PDF. \
             Run an external OCR step and put the resulting .txt in the inbox.",
            chars,
            args.input.display()
        );
    }

    write_text(&output, &text)?;

    println!("{} Done.", style("✓").green());
    println!("  Method : embedded text");
    println!("  Pages  : {pages}");
    println!("  Output : {}", output.display());

    Ok(())
}

/// Load a PDF and extract its text layer. Returns the text and page count.
fn extract_text(data: &[u8]) -> anyhow::Result<(String, usize)> {
    let mut doc = Document::load_mem(data)
        .map_err(|e| anyhow::anyhow!("failed to parse PDF: {e}"))?;

    // PDFs encrypted with an empty user password are common and readable.
    let raw = if doc.is_encrypted() {
        doc.decrypt("")
            .map_err(|e| anyhow::anyhow!("PDF is encrypted: {e}"))?;
        debug!("Decrypted PDF with empty password");
        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| anyhow::anyhow!("failed to save decrypted PDF: {e}"))?;
        decrypted
    } else {
        data.to_vec()
    };

    let pages = doc.get_pages().len();
    if pages == 0 {
        anyhow::bail!("PDF has no pages");
    }
    debug!("Loaded PDF with {} pages", pages);

    let text = pdf_extract::extract_text_from_mem(&raw)
        .map_err(|e| anyhow::anyhow!("text extraction failed: {e}"))?;

    Ok((text, pages))
}

fn non_whitespace_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_whitespace_chars() {
        assert_eq!(non_whitespace_chars(" a b\n\tc "), 3);
        assert_eq!(non_whitespace_chars("\n\n"), 0);
    }

    #[test]
    fn test_rejects_non_pdf() {
        assert!(extract_text(b"not a pdf").is_err());
    }
}
