//! API client for communicating with the Opsdeck backend REST API.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests to manage projects, trigger playbook runs, and poll tasks.
//!
//! Every domain call flows through one send path that attaches the bearer
//! token from the session store and maps failure statuses to `ApiError`.
//! A 401 on any call invalidates the session and hard-redirects to the
//! login route before the error reaches the caller.

use anyhow::{Context, Result};
use reqwest::{header, Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::{SessionData, SessionStore};
use crate::config::Config;
use crate::models::{
    Project, ProjectCreate, ProjectSync, ProjectUpdate, RunPlaybookRequest, TaskHandle,
    TaskResult,
};
use crate::router::{Navigator, LOGIN_PATH};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow sync/run endpoints while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Response wrapper for the playbook catalog endpoint.
#[derive(Debug, Deserialize)]
struct PlaybooksResponse {
    playbooks: Vec<String>,
}

/// FastAPI-style error body, `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// API client for the Opsdeck backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection
/// pooling, and the session and navigator handles share their cells.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
    navigator: Navigator,
}

impl ApiClient {
    /// Create a new API client wired to the shared session and navigator.
    pub fn new(config: &Config, session: SessionStore, navigator: Navigator) -> Result<Self> {
        // JSON content type by default; a per-request body encoding
        // (the form-encoded login) overrides it.
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url(),
            session,
            navigator,
        })
    }

    // ===== Authentication =====

    /// Authenticate against the token endpoint and store the issued session.
    ///
    /// The endpoint takes OAuth2-style form fields. A rejected login fails
    /// with `ApiError::Authentication` and leaves any existing session
    /// untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let url = self.url("/token");

        let response = self
            .http
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .context("Failed to send login request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|e| e.detail)
                .unwrap_or_else(|| status.to_string());
            debug!(%status, "Login rejected");
            return Err(ApiError::Authentication(detail).into());
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        self.session
            .set(SessionData::new(token.access_token, username.to_string()))?;
        info!(username, "Login succeeded");
        Ok(())
    }

    /// Drop the current session. No network call - the backend token
    /// simply stops being sent.
    pub fn logout(&self) {
        self.session.clear();
        info!("Logged out");
    }

    /// True iff a session credential is present.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    // ===== Request pipeline =====

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = self.session.token() {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Invalidate the session after an unauthorized response: clear the
    /// store and hard-redirect to the login route, bypassing the guard.
    /// Idempotent - concurrent 401s all land in the same terminal state.
    fn expire_session(&self) {
        warn!("Received 401, clearing session and redirecting to login");
        self.session.clear();
        self.navigator.assign(LOGIN_PATH);
    }

    /// Check if a response is successful, mapping failures to `ApiError`
    /// and applying the session-expiry side effect on 401.
    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Err(ApiError::SessionExpired.into());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body).into())
    }

    /// Single choke point for all domain calls.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%method, url = %url, "API request");

        let mut request = self.http.request(method, &url).headers(self.auth_headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let response = self.check_response(response).await?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, Some(&body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.send(Method::PUT, path, Some(&body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::DELETE, path, None).await
    }

    // ===== Projects =====

    /// Fetch all projects.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.get("/projects/").await
    }

    /// Fetch a project by id.
    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        self.get(&format!("/projects/{}", project_id)).await
    }

    /// Create a new project. The backend requires an admin session.
    pub async fn create_project(&self, project: &ProjectCreate) -> Result<Project> {
        self.post("/projects/", project).await
    }

    /// Update a project. The backend requires an admin session.
    pub async fn update_project(
        &self,
        project_id: &str,
        update: &ProjectUpdate,
    ) -> Result<Project> {
        self.put(&format!("/projects/{}", project_id), update).await
    }

    /// Delete a project, returning its last state.
    pub async fn delete_project(&self, project_id: &str) -> Result<Project> {
        self.delete(&format!("/projects/{}", project_id)).await
    }

    /// Sync a project with its Git repository.
    pub async fn sync_project(&self, project_id: &str) -> Result<ProjectSync> {
        self.post(&format!("/projects/{}/sync", project_id), &serde_json::json!({}))
            .await
    }

    /// Fetch the playbook names available in a project.
    pub async fn project_playbooks(&self, project_id: &str) -> Result<Vec<String>> {
        self.get(&format!("/projects/{}/playbooks", project_id)).await
    }

    // ===== Playbooks and tasks =====

    /// Fetch the global playbook catalog.
    pub async fn list_playbooks(&self) -> Result<Vec<String>> {
        let response: PlaybooksResponse = self.get("/playbooks").await?;
        Ok(response.playbooks)
    }

    /// Queue a playbook run. The backend answers immediately with a task
    /// handle; poll `get_task` for the result.
    pub async fn run_playbook(
        &self,
        playbook_name: &str,
        request: &RunPlaybookRequest,
    ) -> Result<TaskHandle> {
        self.post(&format!("/playbooks/{}/run", playbook_name), request)
            .await
    }

    /// Fetch the status and result of a playbook execution task.
    pub async fn get_task(&self, task_id: &str) -> Result<TaskResult> {
        self.get(&format!("/tasks/{}", task_id)).await
    }

    /// Create an empty task record.
    pub async fn create_task(&self) -> Result<TaskHandle> {
        self.post("/tasks", &serde_json::json!({})).await
    }
}
