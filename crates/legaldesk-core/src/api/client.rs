//! API client for the case-management backend.
//!
//! Every endpoint lives under `{origin}/api`. Uploaded files are served
//! from `{origin}/uploads/{filename}`, outside the API namespace.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client as HttpClient;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::forms::{
    AppointmentForm, CaseForm, CaseUpdateForm, ClientForm, CompleteRequest, LoginRequest,
    UploadForm,
};
use crate::models::{
    Appointment, Case, CaseTimeline, CaseUpdate, Client, ClientDashboard, DashboardStats,
    Document, PortalSession, UploadResponse,
};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Path prefix for every REST endpoint
const API_PREFIX: &str = "/api";

/// Path prefix for statically served uploads
const UPLOADS_PREFIX: &str = "/uploads";

/// Maximum number of retries for rate-limited (429) reads.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Acknowledgement body returned by delete and complete endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// API client for the backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: HttpClient,
    origin: String,
    backoff_ms: u64,
}

impl ApiClient {
    /// Create a client for `origin` (e.g. `http://localhost:8001`).
    pub fn new(origin: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let origin = origin.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            origin,
            backoff_ms: INITIAL_BACKOFF_MS,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.backend_url(),
            Duration::from_secs(config.request_timeout_secs()),
        )
    }

    /// Override the initial 429 backoff. Tests use this to avoid real sleeps.
    pub fn with_backoff(mut self, initial_backoff: Duration) -> Self {
        self.backoff_ms = initial_backoff.as_millis() as u64;
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.origin, API_PREFIX, path)
    }

    /// Static download URL for an uploaded file
    pub fn file_url(&self, filename: &str) -> String {
        format!("{}{}/{}", self.origin, UPLOADS_PREFIX, filename)
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.url(path);
        let mut retries = 0;
        let mut backoff_ms = self.backoff_ms;

        loop {
            debug!(url = %url, "GET");
            let response = self
                .client
                .get(&url)
                .query(query)
                .send()
                .await
                .map_err(ApiError::from)
                .with_context(|| format!("Failed to send GET request to {}", url))?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    return response
                        .json()
                        .await
                        .with_context(|| format!("Failed to parse JSON response from {}", url));
                }
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited.into());
                    }
                    warn!(url = %url, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2;
                }
            }
        }
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        Self::check_response(response)
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(url = %url, "PUT");
        let response = self
            .client
            .put(&url)
            .query(query)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send PUT request to {}", url))?;

        Self::check_response(response)
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn delete(&self, path: &str) -> Result<MessageResponse> {
        let url = self.url(path);
        debug!(url = %url, "DELETE");
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send DELETE request to {}", url))?;

        Self::check_response(response)
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ========================================================================
    // Collections
    // ========================================================================

    pub async fn fetch_dashboard_stats(&self) -> Result<DashboardStats> {
        self.get("/dashboard/stats", &[]).await
    }

    pub async fn fetch_clients(&self) -> Result<Vec<Client>> {
        self.get("/clients", &[]).await
    }

    pub async fn fetch_cases(&self) -> Result<Vec<Case>> {
        self.get("/cases", &[]).await
    }

    pub async fn fetch_documents(&self) -> Result<Vec<Document>> {
        self.get("/documents", &[]).await
    }

    pub async fn fetch_appointments(&self) -> Result<Vec<Appointment>> {
        self.get("/appointments", &[]).await
    }

    pub async fn fetch_client(&self, id: &str) -> Result<Client> {
        self.get(&format!("/clients/{}", id), &[]).await
    }

    // ========================================================================
    // Clients
    // ========================================================================

    pub async fn create_client(&self, form: &ClientForm) -> Result<Client> {
        self.post("/clients", form).await
    }

    pub async fn update_client(&self, id: &str, form: &ClientForm) -> Result<Client> {
        self.put(&format!("/clients/{}", id), &[], form).await
    }

    pub async fn delete_client(&self, id: &str) -> Result<MessageResponse> {
        self.delete(&format!("/clients/{}", id)).await
    }

    // ========================================================================
    // Cases
    // ========================================================================

    pub async fn create_case(&self, form: &CaseForm) -> Result<Case> {
        self.post("/cases", &form.to_payload()).await
    }

    pub async fn update_case(&self, id: &str, form: &CaseForm) -> Result<Case> {
        self.put(&format!("/cases/{}", id), &[], &form.to_payload())
            .await
    }

    pub async fn delete_case(&self, id: &str) -> Result<MessageResponse> {
        self.delete(&format!("/cases/{}", id)).await
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// Upload a file as a multipart form. The file is read fully into memory.
    pub async fn upload_document(&self, form: &UploadForm) -> Result<UploadResponse> {
        form.validate()?;

        let bytes = tokio::fs::read(&form.path)
            .await
            .with_context(|| format!("Failed to read {}", form.path.display()))?;
        let size = bytes.len();

        let mut multipart = Form::new()
            .text("client_id", form.client_id.clone())
            .text("description", form.description.clone())
            .text("category", form.category.clone())
            .part("file", Part::bytes(bytes).file_name(form.file_name()));
        if let Some(case_id) = form.case_id.as_deref().filter(|c| !c.is_empty()) {
            multipart = multipart.text("case_id", case_id.to_string());
        }

        let url = self.url("/documents/upload");
        debug!(url = %url, bytes = size, "POST multipart");
        let response = self
            .client
            .post(&url)
            .multipart(multipart)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send upload to {}", url))?;

        Self::check_response(response)
            .await?
            .json()
            .await
            .context("Failed to parse upload response")
    }

    pub async fn delete_document(&self, id: &str) -> Result<MessageResponse> {
        self.delete(&format!("/documents/{}", id)).await
    }

    // ========================================================================
    // Appointments
    // ========================================================================

    pub async fn create_appointment(&self, form: &AppointmentForm) -> Result<Appointment> {
        self.post("/appointments", form).await
    }

    pub async fn update_appointment(&self, id: &str, form: &AppointmentForm) -> Result<Appointment> {
        self.put(&format!("/appointments/{}", id), &[], form).await
    }

    /// Mark an appointment completed. Notes go in the JSON body and, when
    /// present, in the `notes` query parameter the backend reads.
    pub async fn complete_appointment(&self, id: &str, notes: Option<&str>) -> Result<MessageResponse> {
        let body = CompleteRequest::new(notes);
        let query: Vec<(&str, &str)> = body
            .notes
            .as_deref()
            .map(|n| vec![("notes", n)])
            .unwrap_or_default();
        self.put(&format!("/appointments/{}/complete", id), &query, &body)
            .await
    }

    pub async fn delete_appointment(&self, id: &str) -> Result<MessageResponse> {
        self.delete(&format!("/appointments/{}", id)).await
    }

    // ========================================================================
    // Case updates
    // ========================================================================

    pub async fn fetch_case_updates(
        &self,
        case_id: Option<&str>,
        client_id: Option<&str>,
    ) -> Result<Vec<CaseUpdate>> {
        let mut query = Vec::new();
        if let Some(case_id) = case_id {
            query.push(("case_id", case_id));
        }
        if let Some(client_id) = client_id {
            query.push(("client_id", client_id));
        }
        self.get("/case-updates", &query).await
    }

    pub async fn create_case_update(&self, form: &CaseUpdateForm) -> Result<CaseUpdate> {
        self.post("/case-updates", form).await
    }

    pub async fn delete_case_update(&self, id: &str) -> Result<MessageResponse> {
        self.delete(&format!("/case-updates/{}", id)).await
    }

    // ========================================================================
    // Client portal
    // ========================================================================

    pub async fn client_login(&self, email: &str, phone: &str) -> Result<PortalSession> {
        self.post("/client/login", &LoginRequest { email, phone })
            .await
    }

    pub async fn fetch_client_dashboard(&self, client_id: &str) -> Result<ClientDashboard> {
        self.get(&format!("/client/dashboard/{}", client_id), &[])
            .await
    }

    pub async fn fetch_case_timeline(&self, client_id: &str, case_id: &str) -> Result<CaseTimeline> {
        self.get(
            &format!("/client/{}/case-timeline/{}", client_id, case_id),
            &[],
        )
        .await
    }
}
