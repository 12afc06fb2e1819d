//! HTTP client for the report render server
//!
//! The server is an external collaborator reached through two endpoints:
//! one POST that renders a submitted report to PDF, and one GET that
//! reports server status. A single best-effort attempt is made per call;
//! retry policy belongs to the caller, if anywhere.

use crate::error::{ReportError, Result};
use crate::payload::ReportPayload;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Path of the render endpoint.
pub const GENERATE_PATH: &str = "/api/generate-pdf";

/// Path of the status endpoint.
pub const HEALTH_PATH: &str = "/api/health";

const GENERIC_GENERATE_ERROR: &str = "Failed to generate report";

/// Client for one render server, identified by its base URL.
#[derive(Debug, Clone)]
pub struct ReportClient {
    http: reqwest::Client,
    base_url: String,
}

/// Binary result of a successful submission, named for saving to disk.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    /// Timestamp-derived name, e.g. `report_20260807_153012.pdf`.
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Body of the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Whether the branding asset the rendered header uses is present
    /// server-side.
    pub logo_exists: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ReportClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit an assembled payload and return the rendered PDF.
    ///
    /// A non-success response is mapped to [`ReportError::Server`] carrying
    /// the message from the `{"error": ...}` body when one is present, or a
    /// generic message otherwise.
    pub async fn generate(&self, payload: &ReportPayload) -> Result<GeneratedReport> {
        let response = self
            .http
            .post(format!("{}{GENERATE_PATH}", self.base_url))
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) if !body.error.trim().is_empty() => body.error,
                _ => GENERIC_GENERATE_ERROR.to_string(),
            };
            return Err(ReportError::Server(message));
        }

        let content = response.bytes().await?.to_vec();
        Ok(GeneratedReport {
            file_name: download_file_name(),
            content,
        })
    }

    /// Fetch server status, including whether the branding asset exists.
    pub async fn health(&self) -> Result<HealthStatus> {
        let status = self
            .http
            .get(format!("{}{HEALTH_PATH}", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json::<HealthStatus>()
            .await?;
        Ok(status)
    }
}

/// File name for saving a rendered report, derived from the current
/// timestamp.
pub fn download_file_name() -> String {
    format!("report_{}.pdf", Local::now().format("%Y%m%d_%H%M%S"))
}
