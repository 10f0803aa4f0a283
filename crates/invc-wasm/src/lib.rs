//! WASM bindings for invoice/receipt extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Records are converted with JSON-compatible serialization, so unresolved
//! fields arrive as `null` rather than `undefined`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use invc_core::models::config::ExtractionConfig;
use invc_core::{Document, ExtractionResult};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract a record from OCR text with the built-in tables.
///
/// Returns `{ record, notes: { assumptions, questions } }`.
#[wasm_bindgen]
pub fn extract(text: &str, source_name: &str) -> Result<JsValue, JsValue> {
    to_js(&invc_core::extract(text, source_name))
}

/// Normalize OCR text the way the extractor sees it.
#[wasm_bindgen(js_name = normalizeText)]
pub fn normalize_text(text: &str) -> String {
    invc_core::normalize(text)
}

/// Configurable extractor for browser use.
#[wasm_bindgen]
pub struct InvoiceExtractor {
    inner: invc_core::InvoiceExtractor,
}

#[wasm_bindgen]
impl InvoiceExtractor {
    /// Create an extractor. `config_json` is an optional JSON
    /// `ExtractionConfig` (extra vendors, extra substitutions, excerpt length).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<InvoiceExtractor, JsValue> {
        let config = match config_json {
            Some(json) => serde_json::from_str::<ExtractionConfig>(&json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => ExtractionConfig::default(),
        };

        let inner = invc_core::InvoiceExtractor::new(&config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self { inner })
    }

    /// Extract a record from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, source_name: &str) -> Result<JsValue, JsValue> {
        to_js(&self.inner.extract(&Document::new(source_name, text)))
    }

    /// Extract a record and return it as a JSON string.
    #[wasm_bindgen(js_name = extractJson)]
    pub fn extract_json(&self, text: &str, source_name: &str) -> Result<String, JsValue> {
        let result = self.inner.extract(&Document::new(source_name, text));
        serde_json::to_string(&result).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn to_js(result: &ExtractionResult) -> Result<JsValue, JsValue> {
    result
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
