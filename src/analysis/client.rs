use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url, header};
use serde::de::DeserializeOwned;

use crate::{
    analysis::{
        error::{
            AnalysisError, AnalysisErrorKind, decode_error, invalid_endpoint, transport_error,
        },
        ports::AnalysisPort,
        types::{ApiConfig, TriageResult},
        wire::{self, ANALYZE_PATH, AnalyzeRequest, AnalyzeResponse, INFO_PATH},
    },
    intake::{
        fields::{FormField, IntakeField},
        info::FieldInfo,
        payload::InputPayload,
    },
};

/// JSON-over-HTTP client for the analysis service.
#[derive(Clone)]
pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpAnalysisClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AnalysisError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        match Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(invalid_endpoint(format!(
                    "analysis base url '{}' uses unsupported scheme '{}'",
                    base_url,
                    url.scheme()
                )));
            }
            Err(err) => {
                return Err(invalid_endpoint(format!(
                    "analysis base url '{base_url}' is invalid: {err}"
                )));
            }
        }

        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| transport_error(format!("failed to build http client: {err}")))?;

        Ok(Self {
            client,
            base_url,
            timeout: config.request_timeout_ms.map(Duration::from_millis),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }

    pub fn info_url(&self, field: IntakeField) -> String {
        format!("{}{}/{}", self.base_url, INFO_PATH, field.key())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        url: &str,
    ) -> Result<T, AnalysisError> {
        let mut builder = builder.header(header::ACCEPT, "application/json");
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|err| {
            let kind = if err.is_timeout() {
                AnalysisErrorKind::Timeout
            } else {
                AnalysisErrorKind::Transport
            };
            AnalysisError::new(kind, format!("request to {url} failed: {err}"))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            transport_error(format!("failed to read response body from {url}: {err}"))
        })?;
        if !status.is_success() {
            return Err(wire::map_http_error(status.as_u16(), &body));
        }

        serde_json::from_str::<T>(&body)
            .map_err(|err| decode_error(format!("unexpected response from {url}: {err}")))
    }
}

#[async_trait]
impl AnalysisPort for HttpAnalysisClient {
    async fn analyze(&self, payload: &InputPayload) -> Result<TriageResult, AnalysisError> {
        let url = self.analyze_url();
        let body = AnalyzeRequest::from(payload);
        let builder = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body);

        let response: AnalyzeResponse = self.send_json(builder, &url).await?;
        let result = response.into_result();
        tracing::info!(
            target: "analysis",
            level = %result.level,
            confidence = result.confidence,
            recommendations = result.recommendations.len(),
            "analysis_completed"
        );
        Ok(result)
    }

    async fn field_info(&self, field: IntakeField) -> Result<FieldInfo, AnalysisError> {
        let url = self.info_url(field);
        let builder = self.client.get(&url);
        self.send_json(builder, &url).await
    }
}
