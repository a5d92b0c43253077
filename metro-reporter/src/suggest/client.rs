//! DaData metro suggestion client.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use crate::domain::StationCandidate;

use super::error::SuggestError;
use super::provider::SuggestionProvider;
use super::types::{SuggestQuery, SuggestRequestBody, parse_suggestions};

/// Default endpoint for metro station suggestions.
const DEFAULT_URL: &str = "https://suggestions.dadata.ru/suggestions/api/4_1/rs/suggest/metro";

/// Configuration for the suggestion client.
#[derive(Debug, Clone)]
pub struct SuggestClientConfig {
    /// API token, sent as `Authorization: Token <token>`
    pub token: String,
    /// Full endpoint URL
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SuggestClientConfig {
    /// Create a new config with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            url: DEFAULT_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom endpoint (for testing).
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

/// HTTP client for the DaData suggestion API.
#[derive(Debug, Clone)]
pub struct SuggestClient {
    http: reqwest::Client,
    url: String,
}

impl SuggestClient {
    /// Create a new suggestion client.
    pub fn new(config: SuggestClientConfig) -> Result<Self, SuggestError> {
        let mut headers = HeaderMap::new();

        let auth = HeaderValue::from_str(&format!("Token {}", config.token))
            .map_err(|_| SuggestError::InvalidToken)?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Ask the provider for stations matching `query`.
    pub async fn fetch(
        &self,
        query: &SuggestQuery,
    ) -> Result<Vec<StationCandidate>, SuggestError> {
        debug!(query = %query.query, count = query.count, "requesting station suggestions");

        let response = self
            .http
            .post(&self.url)
            .json(&SuggestRequestBody::from(query))
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let stations = parse_suggestions(&body)?;

        debug!(query = %query.query, results = stations.len(), "provider answered");
        Ok(stations)
    }
}

impl SuggestionProvider for SuggestClient {
    fn suggest<'a>(
        &'a self,
        query: &'a SuggestQuery,
    ) -> BoxFuture<'a, Result<Vec<StationCandidate>, SuggestError>> {
        self.fetch(query).boxed()
    }
}
