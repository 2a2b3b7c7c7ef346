//! WASM bindings for the ClauseScan upload page
//!
//! All lifecycle state lives in Rust. JavaScript only loads the module and
//! constructs the app; form and file-picker events are wired here.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { ClauseScanApp } from './pkg/clausescan_wasm.js';
//!
//! await init();
//! const app = new ClauseScanApp();            // posts to /api/upload
//! // or: new ClauseScanApp("https://analyzer.example.com/api/upload");
//! ```

pub mod app;
pub mod dom;
pub mod fetch;

use clause_types::AnalysisResult;
use wasm_bindgen::prelude::*;

pub use app::ClauseScanApp;
pub use dom::{DomIds, DomSurface};
pub use fetch::{FetchAnalyzer, DEFAULT_UPLOAD_ENDPOINT};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"ClauseScan WASM initialized".into());
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Validate an analysis body and return its display tree as a JS object
#[wasm_bindgen(js_name = renderResult)]
pub fn render_result(json: &str) -> Result<JsValue, JsValue> {
    let result =
        AnalysisResult::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let tree = clause_core::render(&result);

    serde_wasm_bindgen::to_value(&tree)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        assert!(!get_version().is_empty());
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_render_result_rejects_malformed_body() {
        assert!(render_result("{\"filename\":1}").is_err());
    }

    #[wasm_bindgen_test]
    fn test_render_result_placeholder() {
        let tree = render_result(r#"{"filename":"a.pdf","total_clauses_found":0,"clauses":{}}"#)
            .unwrap();
        let body = js_sys::Reflect::get(&tree, &"body".into()).unwrap();
        let kind = js_sys::Reflect::get(&body, &"kind".into()).unwrap();
        assert_eq!(kind.as_string().as_deref(), Some("placeholder"));
    }
}
