//! HTTP transport for the pingping.io web API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use pingping_types::{Check, CheckUpdate, Monitor, MonitorList, MonitorRequest, DEFAULT_API_URL};

use crate::{ApiError, PingpingApi};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated client for the web API.
///
/// Paths passed to [`get`](Self::get), [`post`](Self::post),
/// [`put`](Self::put) and [`delete`](Self::delete) are relative to the API
/// base URL, e.g. `"monitors/42"`.
#[derive(Clone)]
pub struct PingpingClient {
    client: Client,
    api_url: String,
    api_token: String,
    timeout: Duration,
}

impl PingpingClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> PingpingClientBuilder {
        PingpingClientBuilder::default()
    }

    /// Base URL requests are resolved against. Always ends with `/`.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET` a resource. Returns `None` when the API answers `404`.
    pub async fn get(&self, path: &str) -> Result<Option<Value>, ApiError> {
        let response = self.send::<Value>(Method::GET, path, None).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(path, "resource not found");
            return Ok(None);
        }

        read_json(Method::GET, path, response).await
    }

    /// `POST` to a path, with an optional JSON body.
    ///
    /// Returns `None` when the response body is empty.
    pub async fn post<B>(&self, path: &str, body: Option<&B>) -> Result<Option<Value>, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let response = self.send(Method::POST, path, body).await?;
        read_json(Method::POST, path, response).await
    }

    /// `PUT` a JSON body to a path.
    ///
    /// Returns `None` when the response body is empty.
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<Option<Value>, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        read_json(Method::PUT, path, response).await
    }

    /// `DELETE` a resource. Any response body is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send::<Value>(Method::DELETE, path, None).await?;
        read_json(Method::DELETE, path, response).await.map(|_| ())
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let mut request = self.request(method.clone(), path);
        if let Some(body) = body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|e| ApiError::transport(&method, path, e))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_url, path.trim_start_matches('/'));
        debug!(%method, %url, "calling API");

        self.client
            .request(method, url)
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json")
    }
}

impl fmt::Debug for PingpingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PingpingClient")
            .field("api_url", &self.api_url)
            .field("api_token", &"********")
            .field("timeout", &self.timeout)
            .finish()
    }
}

async fn read_json(
    method: Method,
    path: &str,
    response: Response,
) -> Result<Option<Value>, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::transport(&method, path, e))?;

    if !status.is_success() {
        return Err(ApiError::Status {
            method: method.to_string(),
            path: path.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    if body.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&body)
        .map(Some)
        .map_err(|e| ApiError::Parse(format!("{method} {path}: {e}")))
}

fn decode<T: DeserializeOwned>(value: Option<Value>) -> Result<Option<T>, ApiError> {
    value
        .map(serde_json::from_value)
        .transpose()
        .map_err(ApiError::from)
}

#[async_trait]
impl PingpingApi for PingpingClient {
    async fn list_monitors(&self) -> Result<Vec<Monitor>, ApiError> {
        let list: Option<MonitorList> = decode(self.get("monitors").await?)?;
        Ok(list.map(MonitorList::into_monitors).unwrap_or_default())
    }

    async fn get_monitor(&self, id: u64) -> Result<Option<Monitor>, ApiError> {
        decode(self.get(&format!("monitors/{id}")).await?)
    }

    async fn create_monitor(&self, request: &MonitorRequest) -> Result<Option<Monitor>, ApiError> {
        decode(self.post("monitors", Some(request)).await?)
    }

    async fn update_monitor(
        &self,
        id: u64,
        request: &MonitorRequest,
    ) -> Result<Option<Monitor>, ApiError> {
        decode(self.put(&format!("monitors/{id}"), request).await?)
    }

    async fn delete_monitor(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("monitors/{id}")).await
    }

    async fn update_check(&self, id: u64, update: &CheckUpdate) -> Result<Option<Check>, ApiError> {
        decode(self.put(&format!("checks/{id}"), update).await?)
    }

    async fn set_check_enabled(&self, id: u64, enabled: bool) -> Result<Option<Check>, ApiError> {
        let action = if enabled { "enable" } else { "disable" };
        decode(self.post::<Value>(&format!("checks/{id}/{action}"), None).await?)
    }
}

/// Builder for PingpingClient.
#[derive(Debug, Default)]
pub struct PingpingClientBuilder {
    api_url: Option<String>,
    api_token: Option<String>,
    timeout: Option<Duration>,
}

impl PingpingClientBuilder {
    /// Set the API base URL (default: `https://pingping.io/webapi/`).
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Set the bearer token used for every request.
    pub fn api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    /// Set the request timeout (default: 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<PingpingClient, ApiError> {
        let api_token = self
            .api_token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ApiError::Config("an API token is required".to_string()))?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        let mut api_url = self
            .api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !api_url.ends_with('/') {
            api_url.push('/');
        }

        Ok(PingpingClient {
            client,
            api_url,
            api_token,
            timeout,
        })
    }
}
