//! Reports API client.

use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use super::error::ReportError;
use super::types::{ReportReceipt, ReportSubmission, parse_receipts};

/// Default reports endpoint of a locally running backend.
const DEFAULT_URL: &str = "http://127.0.0.1:8000/api/v1/reports/";

/// Configuration for the reports client.
#[derive(Debug, Clone)]
pub struct ReportClientConfig {
    /// Full endpoint URL
    pub url: String,
    /// Request timeout in seconds. Uploads carry photos, so this is generous.
    pub timeout_secs: u64,
}

impl ReportClientConfig {
    pub fn new() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_secs: 60,
        }
    }

    /// Set a custom endpoint.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ReportClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for submitting defect reports.
#[derive(Debug, Clone)]
pub struct ReportClient {
    http: reqwest::Client,
    url: String,
}

impl ReportClient {
    pub fn new(config: ReportClientConfig) -> Result<Self, ReportError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Upload a report as multipart form data.
    ///
    /// The API stores one report per photo and answers with all of them.
    pub async fn submit(
        &self,
        report: &ReportSubmission,
    ) -> Result<Vec<ReportReceipt>, ReportError> {
        let form = build_form(report)?;
        debug!(
            category = %report.category,
            station = %report.station,
            photos = report.photos.len(),
            "submitting report"
        );

        let response = self.http.post(&self.url).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let receipts = parse_receipts(&body)?;

        info!(count = receipts.len(), "report accepted");
        Ok(receipts)
    }
}

fn build_form(report: &ReportSubmission) -> Result<Form, ReportError> {
    let mut form = Form::new()
        .text("category", report.category.clone())
        .text("station", report.station.clone())
        .text("description", report.description.clone())
        .text("latitude", optional_number(report.latitude))
        .text("longitude", optional_number(report.longitude));

    for photo in &report.photos {
        let part = Part::bytes(photo.bytes.clone())
            .file_name(photo.file_name.clone())
            .mime_str(&photo.mime)?;
        form = form.part("files", part);
    }

    Ok(form)
}

/// Absent coordinates are sent as empty strings.
fn optional_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ReportClientConfig::default();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_builders() {
        let config = ReportClientConfig::new()
            .with_url("http://reports.local/api/v1/reports/")
            .with_timeout(5);
        assert_eq!(config.url, "http://reports.local/api/v1/reports/");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn absent_numbers_are_empty() {
        assert_eq!(optional_number(None), "");
        assert_eq!(optional_number(Some(55.75)), "55.75");
    }
}
