//! `fetch`-based analyzer
//!
//! Posts the selected `File` as multipart form data and hands the status and
//! body text to [`clause_core::interpret_response`].

use async_trait::async_trait;
use clause_core::{AnalysisError, AnalysisRequest, Analyzer};
use clause_types::{AnalysisResult, UPLOAD_FIELD_NAME};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

/// Relative analysis endpoint on the page's own origin
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "/api/upload";

pub struct FetchAnalyzer {
    endpoint: String,
}

impl FetchAnalyzer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: AnalysisRequest<File>) -> Result<(u16, String), JsValue> {
        let window = web_sys::window().ok_or("No window")?;

        let form = FormData::new()?;
        form.append_with_blob_and_filename(UPLOAD_FIELD_NAME, &request.body, &request.filename)?;

        // No Content-Type header: the browser adds the multipart boundary
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(if self.endpoint.starts_with("http") {
            RequestMode::Cors
        } else {
            RequestMode::SameOrigin
        });
        opts.set_body(&form);

        let fetch_request = Request::new_with_str_and_init(&self.endpoint, &opts)?;
        let response = JsFuture::from(window.fetch_with_request(&fetch_request)).await?;
        let response: Response = response.dyn_into()?;

        let status = response.status();
        let body = JsFuture::from(response.text()?)
            .await?
            .as_string()
            .unwrap_or_default();

        Ok((status, body))
    }
}

impl Default for FetchAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_UPLOAD_ENDPOINT)
    }
}

#[async_trait(?Send)]
impl Analyzer for FetchAnalyzer {
    type Body = File;

    async fn analyze(
        &self,
        request: AnalysisRequest<File>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let (status, body) = self
            .post(request)
            .await
            .map_err(|err| AnalysisError::Transport(describe(&err)))?;

        clause_core::interpret_response(status, &body)
    }
}

/// Best-effort description of a rejected promise
fn describe(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string()
        .unwrap_or_else(|| "request rejected without a description".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        assert_eq!(FetchAnalyzer::default().endpoint(), "/api/upload");
    }
}
