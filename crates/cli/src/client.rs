//! HTTP client for a running kiosk server

use collector::KioskSummary;
use kiosk_api_rest::{
    DashboardQuery, ErrorResponse, HealthResponse, LoginRequest, LoginResponse,
    SubmitFeedbackRequest,
};
use kiosk_types::{FeedbackRecord, Satisfaction};
use processor::{DashboardReport, ExportFormat};
use reqwest::{header, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::{CliError, CliResult, DEFAULT_API_URL};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// A downloaded export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDownload {
    pub filename: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: ClientConfig) -> CliResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("kiosk-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> CliResult<HealthResponse> {
        self.json(self.client.get(self.url("/health"))).await
    }

    pub async fn submit(&self, level: Satisfaction) -> CliResult<FeedbackRecord> {
        let request = SubmitFeedbackRequest::new(level);
        self.json(self.client.post(self.url("/api/kiosk/feedback")).json(&request))
            .await
    }

    pub async fn summary(&self) -> CliResult<KioskSummary> {
        self.json(self.client.get(self.url("/api/kiosk/summary"))).await
    }

    /// Open an admin session, returning its bearer token
    pub async fn login(&self, password: &str) -> CliResult<String> {
        let request = LoginRequest {
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .json(self.client.post(self.url("/api/admin/login")).json(&request))
            .await?;
        Ok(response.token)
    }

    pub async fn logout(&self, token: &str) -> CliResult<()> {
        let request = self
            .client
            .post(self.url("/api/admin/logout"))
            .bearer_auth(token);
        self.send(request).await?;
        Ok(())
    }

    pub async fn dashboard(&self, token: &str, query: &DashboardQuery) -> CliResult<DashboardReport> {
        let request = self
            .client
            .get(self.url("/api/admin/dashboard"))
            .bearer_auth(token)
            .query(query);
        self.json(request).await
    }

    pub async fn export(&self, token: &str, format: ExportFormat) -> CliResult<ExportDownload> {
        let request = self
            .client
            .get(self.url(&format!("/api/admin/export/{format}")))
            .bearer_auth(token);
        let response = self.send(request).await?;

        let filename = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_filename)
            .unwrap_or_else(|| format!("export.{}", format.extension()));
        let body = response.text().await?;

        Ok(ExportDownload { filename, body })
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> CliResult<T> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// Send a request, turning non-success statuses into `CliError::Api`
    async fn send(&self, request: RequestBuilder) -> CliResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Response received");

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(error) => match error.retry_after_ms {
                Some(ms) => format!("{} (retry in {ms} ms)", error.message),
                None => error.message,
            },
            Err(_) if text.is_empty() => status.to_string(),
            Err(_) => text,
        };

        Err(CliError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// File name from an `attachment; filename="..."` header value
pub fn attachment_filename(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}
