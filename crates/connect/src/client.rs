//! HTTP client for the Clean Heat rebate backend.
//!
//! Every endpoint answers with the same JSON envelope,
//! `{ "success": bool, "payload": ..., "error": "..." }`. This client unwraps
//! it and maps failures onto the core error taxonomy: no response becomes
//! `Error::Transport`, a refusal becomes `Error::Api`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use cleanheat_core::applications::{
    ApplicationRecord, ApplicationRepositoryTrait, BulkDeleteRequest, NewApplication,
};
use cleanheat_core::clients::{ClientRecord, ClientRepositoryTrait, NewClient};
use cleanheat_core::errors::{Error, Result};
use cleanheat_core::session::{AuthGatewayTrait, LoginPayload};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default path of the login endpoint, relative to the base URL.
pub const DEFAULT_LOGIN_PATH: &str = "login";

// ─────────────────────────────────────────────────────────────────────────────
// API Response Types (internal, for parsing backend responses)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, serde::Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default)]
    success: bool,
    payload: Option<T>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Rebate API Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the rebate REST API.
///
/// One request per call: no retries, no caching, no de-duplication.
///
/// # Example
///
/// ```ignore
/// let client = RebateApiClient::new("http://localhost:3000", "login", Duration::from_secs(30))?;
/// let applications = client.list_applications().await?;
/// ```
#[derive(Debug, Clone)]
pub struct RebateApiClient {
    client: reqwest::Client,
    base_url: String,
    login_path: String,
}

impl RebateApiClient {
    /// Create a new rebate API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend root, e.g. "http://localhost:3000"
    /// * `login_path` - Login endpoint relative to `base_url`
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, login_path: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            login_path: login_path.trim_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create default headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        request
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))
    }

    /// Read the body, rejecting non-2xx statuses.
    async fn read_body(&self, response: reqwest::Response, fallback: &str) -> Result<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // Try to parse error response for a better message
            if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                if let Some(msg) = err.error.or(err.message) {
                    return Err(Error::Api(msg));
                }
            }
            debug!("[RebateApi] HTTP {}: {}", status, snippet(&body));
            return Err(Error::Api(format!("{} (HTTP {})", fallback, status.as_u16())));
        }
        Ok(body)
    }

    /// Unwrap the envelope and return its payload.
    async fn parse_payload<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<T> {
        let body = self.read_body(response, fallback).await?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&body).map_err(|e| {
            Error::Api(format!("{}: unexpected response ({}) - {}", fallback, e, snippet(&body)))
        })?;

        if !envelope.success {
            return Err(Error::Api(
                envelope
                    .error
                    .or(envelope.message)
                    .unwrap_or_else(|| fallback.to_string()),
            ));
        }
        envelope
            .payload
            .ok_or_else(|| Error::Api(format!("{}: response had no payload", fallback)))
    }

    /// Check an envelope whose payload is not needed. An empty 2xx body counts
    /// as success.
    async fn parse_ack(&self, response: reqwest::Response, fallback: &str) -> Result<()> {
        let body = self.read_body(response, fallback).await?;
        if body.trim().is_empty() {
            return Ok(());
        }
        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(&body)
            .map_err(|e| Error::Api(format!("{}: unexpected response ({})", fallback, e)))?;
        if envelope.success {
            Ok(())
        } else {
            Err(Error::Api(
                envelope
                    .error
                    .or(envelope.message)
                    .unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Client Endpoints
    // ─────────────────────────────────────────────────────────────────────────

    async fn get_clients(&self) -> Result<Vec<ClientRecord>> {
        let url = self.url("/client");
        debug!("[RebateApi] GET {}", url);
        let response = self.send(self.client.get(&url)).await?;
        let clients: Vec<ClientRecord> = self
            .parse_payload(response, "Error fetching clients")
            .await?;
        info!("[RebateApi] Fetched {} clients", clients.len());
        Ok(clients)
    }

    async fn post_client(&self, new_client: &NewClient) -> Result<ClientRecord> {
        let url = self.url("/client");
        debug!("[RebateApi] POST {}", url);
        let response = self.send(self.client.post(&url).json(new_client)).await?;
        self.parse_payload(response, "Error creating client").await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository Trait Implementations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ApplicationRepositoryTrait for RebateApiClient {
    async fn list_applications(&self) -> Result<Vec<ApplicationRecord>> {
        let url = self.url("/applications");
        debug!("[RebateApi] GET {}", url);
        let response = self.send(self.client.get(&url)).await?;
        let applications: Vec<ApplicationRecord> = self
            .parse_payload(response, "Error fetching applications")
            .await?;
        info!("[RebateApi] Fetched {} applications", applications.len());
        Ok(applications)
    }

    async fn get_application(&self, id: i64) -> Result<ApplicationRecord> {
        let url = self.url(&format!("/applications/{}", id));
        debug!("[RebateApi] GET {}", url);
        let response = self.send(self.client.get(&url)).await?;
        self.parse_payload(response, "Application not found").await
    }

    async fn create_application(
        &self,
        new_application: NewApplication,
    ) -> Result<ApplicationRecord> {
        let url = self.url("/applications");
        debug!("[RebateApi] POST {}", url);
        let response = self
            .send(self.client.post(&url).json(&new_application))
            .await?;
        self.parse_payload(response, "Error creating application")
            .await
    }

    async fn update_application(&self, record: ApplicationRecord) -> Result<ApplicationRecord> {
        let url = self.url(&format!("/applications/{}", record.id));
        debug!("[RebateApi] PUT {}", url);
        let response = self.send(self.client.put(&url).json(&record)).await?;
        self.parse_payload(response, "Error saving application")
            .await
    }

    async fn delete_application(&self, id: i64) -> Result<()> {
        let url = self.url(&format!("/applications/{}", id));
        debug!("[RebateApi] DELETE {}", url);
        let response = self.send(self.client.delete(&url)).await?;
        self.parse_ack(response, "Error deleting application").await
    }

    async fn duplicate_application(&self, id: i64) -> Result<ApplicationRecord> {
        let url = self.url(&format!("/applications/{}/duplicate", id));
        debug!("[RebateApi] POST {}", url);
        let response = self.send(self.client.post(&url)).await?;
        self.parse_payload(response, "Failed to duplicate application")
            .await
    }

    async fn bulk_delete_applications(&self, request: BulkDeleteRequest) -> Result<()> {
        let url = self.url("/applications/bulk-delete");
        debug!("[RebateApi] POST {} ({} ids)", url, request.ids.len());
        let response = self.send(self.client.post(&url).json(&request)).await?;
        self.parse_ack(response, "Invalid code or error").await
    }
}

#[async_trait]
impl ClientRepositoryTrait for RebateApiClient {
    async fn list_clients(&self) -> Result<Vec<ClientRecord>> {
        self.get_clients().await
    }

    async fn create_client(&self, new_client: NewClient) -> Result<ClientRecord> {
        self.post_client(&new_client).await
    }
}

#[async_trait]
impl AuthGatewayTrait for RebateApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginPayload> {
        let url = self.url(&format!("/{}", self.login_path));
        debug!("[RebateApi] POST {}", url);
        let response = self
            .send(self.client.post(&url).json(&LoginRequest { email, password }))
            .await?;
        self.parse_payload(response, "Login failed").await
    }
}
