//! REST plumbing shared by the Sonarr and Radarr clients
//!
//! Every call is attempted exactly once with the configured timeout. Any failure,
//! whether connection, status or decoding, becomes a [`BackendError`].

use super::{BackendError, MediaKind};
use crate::config::BackendSettings;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Header carrying the backend API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";
/// Versioned path prefix shared by both backends.
pub const API_PREFIX: &str = "api/v3";
/// Error bodies longer than this are cut.
const MAX_ERROR_BODY: usize = 500;

/// Authenticated HTTP access to one backend.
#[derive(Debug, Clone)]
pub struct ArrHttp {
    client: HttpClient,
    base_url: String,
    api_key: String,
    backend: MediaKind,
}

/// Creates an HTTP client with the given per-request timeout.
#[must_use]
pub fn create_http_client(timeout: Duration) -> HttpClient {
    HttpClient::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to build HTTP client with {timeout:?} timeout, using defaults: {e}");
            HttpClient::new()
        })
}

impl ArrHttp {
    /// Bind a backend location to a shared HTTP client.
    #[must_use]
    pub fn new(backend: MediaKind, settings: &BackendSettings, client: HttpClient) -> Self {
        Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            backend,
        }
    }

    /// Full URL for an endpoint below the versioned prefix.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{API_PREFIX}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// `GET` an endpoint and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` on any transport, status or decoding failure.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let request = self.request(Method::GET, endpoint).query(query);
        self.send(endpoint, request).await
    }

    /// `POST` a JSON body to an endpoint and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns a `BackendError` on any transport, status or decoding failure.
    pub async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, endpoint).json(body);
        self.send(endpoint, request).await
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.client
            .request(method, self.endpoint_url(endpoint))
            .header(API_KEY_HEADER, &self.api_key)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        debug!(backend = self.backend.backend_name(), endpoint, "Backend request");

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::new(self.backend, e.to_string()))?;

        let response = self.check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| BackendError::new(self.backend, format!("invalid response body: {e}")))
    }

    async fn check_status(&self, response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(BackendError::new(self.backend, describe_status(status, &body)))
    }
}

/// Human-readable description of a failed response.
///
/// HTML error pages from reverse proxies are not echoed back.
#[must_use]
pub fn describe_status(status: reqwest::StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    let is_html = trimmed.starts_with("<!DOCTYPE")
        || trimmed.starts_with("<html")
        || trimmed.starts_with("<HTML");

    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else if is_html {
        format!("HTTP {status} (server returned an HTML error page)")
    } else if trimmed.chars().count() > MAX_ERROR_BODY {
        let cut: String = trimmed.chars().take(MAX_ERROR_BODY).collect();
        format!("HTTP {status} - {cut}... (truncated)")
    } else {
        format!("HTTP {status} - {trimmed}")
    }
}
