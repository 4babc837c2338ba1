//! Remote standings client: exactly one round-trip per call, no retries.

use reqwest::Client;
use std::future::Future;
use tracing::{debug, error, info, instrument};

use super::http_client::create_http_client_with_timeout;
use super::urls::build_standings_url;
use crate::config::Config;
use crate::data_fetcher::models::StandingsSnapshot;
use crate::error::{AppError, FetchError};

/// Anything that can produce a standings snapshot for a league set and season.
///
/// Implementations perform a single attempt and report the failure kind;
/// retrying is the caller's business.
pub trait StandingsSource: Send + Sync {
    fn fetch(
        &self,
        league_ids: &[u32],
        season: i32,
    ) -> impl Future<Output = Result<StandingsSnapshot, FetchError>> + Send;
}

/// `StandingsSource` backed by the provider's HTTPS API.
#[derive(Debug, Clone)]
pub struct HttpStandingsClient {
    client: Client,
    api_domain: String,
}

impl HttpStandingsClient {
    pub fn new(client: Client, api_domain: impl Into<String>) -> Self {
        Self {
            client,
            api_domain: api_domain.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, config.api_domain.clone()))
    }
}

impl StandingsSource for HttpStandingsClient {
    #[instrument(skip(self))]
    async fn fetch(&self, league_ids: &[u32], season: i32) -> Result<StandingsSnapshot, FetchError> {
        let url = build_standings_url(&self.api_domain, league_ids, season);
        info!("Fetching standings from URL: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| classify_request_error(&e, &url))?;

        let status = response.status();
        debug!("Response status: {status}");

        if !status.is_success() {
            error!("HTTP {} (URL: {})", status.as_u16(), url);
            return Err(FetchError::http_error(status.as_u16(), url));
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_request_error(&e, &url))?;
        debug!("Response length: {} bytes", body.len());

        parse_standings(&body, &url)
    }
}

fn classify_request_error(error: &reqwest::Error, url: &str) -> FetchError {
    error!("Request failed for URL {}: {}", url, error);
    if error.is_timeout() {
        FetchError::timeout(url)
    } else if error.is_connect() {
        FetchError::network_unavailable(url, error.to_string())
    } else {
        FetchError::request(error.to_string(), url)
    }
}

/// Parses a response body, telling an empty or non-JSON body apart from
/// JSON that does not match the standings schema.
pub(crate) fn parse_standings(body: &str, url: &str) -> Result<StandingsSnapshot, FetchError> {
    serde_json::from_str::<StandingsSnapshot>(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        error!("Failed to parse standings: {} (URL: {}), body starts: {}", e, url, preview);

        let trimmed = body.trim_start();
        if trimmed.is_empty() {
            FetchError::malformed_response("Response body is empty", url)
        } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
            FetchError::malformed_response("Response is not valid JSON", url)
        } else {
            FetchError::malformed_response(e.to_string(), url)
        }
    })
}
