//! Native HTTP analyzer over `reqwest`

use async_trait::async_trait;
use clause_core::{interpret_response, AnalysisError, AnalysisRequest, Analyzer};
use clause_types::{AnalysisResult, ErrorBody, HealthStatus, SchemaError, UPLOAD_FIELD_NAME};
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::config::ClientConfig;

pub struct HttpAnalyzer {
    client: reqwest::Client,
    upload_url: String,
    health_url: String,
}

impl HttpAnalyzer {
    /// Build a client for the configured service. No request timeout is set;
    /// calls resolve whenever the transport does.
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("clausescan/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            upload_url: config.upload_url(),
            health_url: config.health_url(),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// `GET /api/health`
    pub async fn health(&self) -> Result<HealthStatus, AnalysisError> {
        let response = self
            .client
            .get(&self.health_url)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;

        if !(200..300).contains(&status) {
            return Err(AnalysisError::Server {
                status,
                message: ErrorBody::message_from(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| AnalysisError::from(SchemaError::from(e)))
    }
}

#[async_trait(?Send)]
impl Analyzer for HttpAnalyzer {
    type Body = Vec<u8>;

    async fn analyze(
        &self,
        request: AnalysisRequest<Vec<u8>>,
    ) -> Result<AnalysisResult, AnalysisError> {
        debug!(
            url = %self.upload_url,
            filename = %request.filename,
            bytes = request.body.len(),
            "posting document"
        );

        let part = Part::bytes(request.body).file_name(request.filename);
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;

        interpret_response(status, &body)
    }
}

fn transport(err: reqwest::Error) -> AnalysisError {
    let mut detail = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    AnalysisError::Transport(detail)
}
