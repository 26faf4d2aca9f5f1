use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Result, TodoistError};
use crate::models::*;
use crate::params::*;

pub const PROJECTS_ENDPOINT: &str = "projects";
pub const SECTIONS_ENDPOINT: &str = "sections";
pub const TASKS_ENDPOINT: &str = "tasks";
pub const LABELS_ENDPOINT: &str = "labels";
pub const COMMENTS_ENDPOINT: &str = "comments";

/// Everything but RFC 3986 unreserved characters is escaped, so an id
/// containing `/` stays a single path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const NO_BODY: Option<&()> = None;

fn encode_id(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

/// `endpoint/{id}` with the id percent-encoded.
fn resource_path(endpoint: &str, id: &str) -> String {
    format!("{endpoint}/{}", encode_id(id))
}

/// Pull a readable message out of an error response body.
fn error_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        for key in ["error", "message"] {
            if let Some(msg) = map.get(key).and_then(|v| v.as_str()) {
                if !msg.is_empty() {
                    return msg.to_string();
                }
            }
        }
    }
    if body.is_empty() {
        format!("HTTP {status}")
    } else {
        body.to_string()
    }
}

// ---------------------------------------------------------------------------
// Internal request handling
// ---------------------------------------------------------------------------

/// Shared logic for building a configured [`Client`] and making requests.
#[derive(Clone)]
struct BaseClient {
    base_url: String,
    http: Client,
    timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl BaseClient {
    fn new(config: &ClientConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(TodoistError::InvalidConfig("API token is empty".into()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|e| TodoistError::InvalidConfig(format!("Invalid token header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str())
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "Todoist client initialized");

        Ok(Self {
            base_url,
            http,
            timeout: config.timeout,
            cancel: None,
        })
    }

    /// Build the full URL for a relative resource path.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Perform one round trip and return the body of a 2xx response.
    ///
    /// Non-2xx responses become [`TodoistError::Api`]. When a cancellation
    /// token is attached and fires first, the in-flight request is dropped
    /// and [`TodoistError::Cancelled`] is returned.
    async fn request<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
            return Err(TodoistError::Cancelled);
        }

        let mut builder = self.http.request(method.clone(), self.url(path));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            let payload = serde_json::to_vec(body)?;
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(payload);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        debug!(%method, path, "sending request");

        let round_trip = async move {
            let response = builder.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };

        let (status, text) = match self.cancel {
            Some(ref token) => tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!(%method, path, "request cancelled");
                    return Err(TodoistError::Cancelled);
                }
                result = round_trip => result?,
            },
            None => round_trip.await?,
        };

        debug!(%method, path, status = status.as_u16(), "received response");

        if status.is_success() {
            Ok(text)
        } else {
            Err(TodoistError::Api {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &text),
            })
        }
    }

    // ---- decoding wrappers -------------------------------------------------

    async fn request_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.request(method, path, &[], body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// GET a collection; an empty or `null` body is an empty collection.
    async fn request_list<T>(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let text = self.request(Method::GET, path, query, NO_BODY).await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items: Option<Vec<T>> = serde_json::from_str(&text)?;
        Ok(items.unwrap_or_default())
    }

    /// For calls that answer 204; any body is ignored.
    async fn request_empty<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.request(method, path, &[], body).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public client
// ---------------------------------------------------------------------------

/// Main entry point for interacting with the Todoist REST API.
///
/// Cloning is cheap; clones share one connection pool.
///
/// ```no_run
/// use todoist_rest::{ListTasksParams, TodoistClient};
///
/// # async fn run() -> todoist_rest::Result<()> {
/// let client = TodoistClient::new("0123456789abcdef")?;
/// let tasks = client
///     .tasks()
///     .list(&ListTasksParams::default().with_filter("today"))
///     .await?;
/// for t in &tasks {
///     println!("{}: {}", t.id, t.content);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TodoistClient {
    base: BaseClient,
}

impl TodoistClient {
    /// Create a client for the public API with the given bearer token.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(token))
    }

    /// Create a client from an explicit [`ClientConfig`].
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            base: BaseClient::new(&config)?,
        })
    }

    /// Create a client from `TODOIST_API_TOKEN` / `TODOIST_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// A client whose calls abort with [`TodoistError::Cancelled`] once
    /// `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        let mut base = self.base.clone();
        base.cancel = Some(token);
        Self { base }
    }

    /// A client whose calls fail with a timeout error after `timeout`.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut base = self.base.clone();
        base.timeout = Some(timeout);
        Self { base }
    }

    /// The base URL every request path is joined onto.
    pub fn base_url(&self) -> &str {
        &self.base.base_url
    }

    // -- sub-client accessors ------------------------------------------------

    pub fn projects(&self) -> ProjectsClient<'_> {
        ProjectsClient { base: &self.base }
    }

    pub fn sections(&self) -> SectionsClient<'_> {
        SectionsClient { base: &self.base }
    }

    pub fn tasks(&self) -> TasksClient<'_> {
        TasksClient { base: &self.base }
    }

    pub fn labels(&self) -> LabelsClient<'_> {
        LabelsClient { base: &self.base }
    }

    pub fn comments(&self) -> CommentsClient<'_> {
        CommentsClient { base: &self.base }
    }
}

// ===========================================================================
// Sub-clients
// ===========================================================================

// ---- Projects -------------------------------------------------------------

pub struct ProjectsClient<'a> {
    base: &'a BaseClient,
}

impl ProjectsClient<'_> {
    /// List all projects.
    pub async fn list(&self) -> Result<Vec<Project>> {
        self.base.request_list(PROJECTS_ENDPOINT, &[]).await
    }

    pub async fn create(&self, params: &CreateProjectParams) -> Result<Project> {
        self.base
            .request_json(Method::POST, PROJECTS_ENDPOINT, Some(params))
            .await
    }

    pub async fn get(&self, project_id: &str) -> Result<Project> {
        self.base
            .request_json(Method::GET, &resource_path(PROJECTS_ENDPOINT, project_id), NO_BODY)
            .await
    }

    /// Update a project. The API answers with no content; re-fetch to see
    /// the result.
    pub async fn update(&self, project_id: &str, params: &UpdateProjectParams) -> Result<()> {
        self.base
            .request_empty(
                Method::POST,
                &resource_path(PROJECTS_ENDPOINT, project_id),
                Some(params),
            )
            .await
    }

    /// Delete a project along with its sections and tasks.
    pub async fn delete(&self, project_id: &str) -> Result<()> {
        self.base
            .request_empty(
                Method::DELETE,
                &resource_path(PROJECTS_ENDPOINT, project_id),
                NO_BODY,
            )
            .await
    }

    /// List the users a shared project is shared with.
    pub async fn collaborators(&self, project_id: &str) -> Result<Vec<Collaborator>> {
        let path = format!(
            "{}/collaborators",
            resource_path(PROJECTS_ENDPOINT, project_id)
        );
        self.base.request_list(&path, &[]).await
    }
}

// ---- Sections -------------------------------------------------------------

pub struct SectionsClient<'a> {
    base: &'a BaseClient,
}

impl SectionsClient<'_> {
    /// List sections, optionally restricted to one project.
    pub async fn list(&self, params: &ListSectionsParams) -> Result<Vec<Section>> {
        self.base
            .request_list(SECTIONS_ENDPOINT, &params.to_query())
            .await
    }

    pub async fn create(&self, params: &CreateSectionParams) -> Result<Section> {
        self.base
            .request_json(Method::POST, SECTIONS_ENDPOINT, Some(params))
            .await
    }

    pub async fn get(&self, section_id: &str) -> Result<Section> {
        self.base
            .request_json(Method::GET, &resource_path(SECTIONS_ENDPOINT, section_id), NO_BODY)
            .await
    }

    pub async fn update(&self, section_id: &str, params: &UpdateSectionParams) -> Result<()> {
        self.base
            .request_empty(
                Method::POST,
                &resource_path(SECTIONS_ENDPOINT, section_id),
                Some(params),
            )
            .await
    }

    pub async fn delete(&self, section_id: &str) -> Result<()> {
        self.base
            .request_empty(
                Method::DELETE,
                &resource_path(SECTIONS_ENDPOINT, section_id),
                NO_BODY,
            )
            .await
    }
}

// ---- Tasks ----------------------------------------------------------------

pub struct TasksClient<'a> {
    base: &'a BaseClient,
}

impl TasksClient<'_> {
    /// List active tasks matching `params`.
    pub async fn list(&self, params: &ListTasksParams) -> Result<Vec<Task>> {
        self.base
            .request_list(TASKS_ENDPOINT, &params.to_query())
            .await
    }

    pub async fn create(&self, params: &CreateTaskParams) -> Result<Task> {
        self.base
            .request_json(Method::POST, TASKS_ENDPOINT, Some(params))
            .await
    }

    pub async fn get(&self, task_id: &str) -> Result<Task> {
        self.base
            .request_json(Method::GET, &resource_path(TASKS_ENDPOINT, task_id), NO_BODY)
            .await
    }

    /// Update a task. Server-computed fields such as a recomputed due date
    /// are only visible after a fresh [`TasksClient::get`].
    pub async fn update(&self, task_id: &str, params: &UpdateTaskParams) -> Result<()> {
        self.base
            .request_empty(
                Method::POST,
                &resource_path(TASKS_ENDPOINT, task_id),
                Some(params),
            )
            .await
    }

    /// Complete a task. Recurring tasks move to their next occurrence.
    pub async fn close(&self, task_id: &str) -> Result<()> {
        let path = format!("{}/close", resource_path(TASKS_ENDPOINT, task_id));
        self.base.request_empty(Method::POST, &path, NO_BODY).await
    }

    pub async fn reopen(&self, task_id: &str) -> Result<()> {
        let path = format!("{}/reopen", resource_path(TASKS_ENDPOINT, task_id));
        self.base.request_empty(Method::POST, &path, NO_BODY).await
    }

    pub async fn delete(&self, task_id: &str) -> Result<()> {
        self.base
            .request_empty(
                Method::DELETE,
                &resource_path(TASKS_ENDPOINT, task_id),
                NO_BODY,
            )
            .await
    }
}

// ---- Labels ---------------------------------------------------------------

pub struct LabelsClient<'a> {
    base: &'a BaseClient,
}

impl LabelsClient<'_> {
    /// List all personal labels.
    pub async fn list(&self) -> Result<Vec<Label>> {
        self.base.request_list(LABELS_ENDPOINT, &[]).await
    }

    pub async fn create(&self, params: &CreateLabelParams) -> Result<Label> {
        self.base
            .request_json(Method::POST, LABELS_ENDPOINT, Some(params))
            .await
    }

    pub async fn get(&self, label_id: &str) -> Result<Label> {
        self.base
            .request_json(Method::GET, &resource_path(LABELS_ENDPOINT, label_id), NO_BODY)
            .await
    }

    pub async fn update(&self, label_id: &str, params: &UpdateLabelParams) -> Result<()> {
        self.base
            .request_empty(
                Method::POST,
                &resource_path(LABELS_ENDPOINT, label_id),
                Some(params),
            )
            .await
    }

    pub async fn delete(&self, label_id: &str) -> Result<()> {
        self.base
            .request_empty(
                Method::DELETE,
                &resource_path(LABELS_ENDPOINT, label_id),
                NO_BODY,
            )
            .await
    }
}

// ---- Comments -------------------------------------------------------------

pub struct CommentsClient<'a> {
    base: &'a BaseClient,
}

impl CommentsClient<'_> {
    /// List the comments of a task or a project.
    pub async fn list(&self, params: &ListCommentsParams) -> Result<Vec<Comment>> {
        self.base
            .request_list(COMMENTS_ENDPOINT, &params.to_query())
            .await
    }

    pub async fn create(&self, params: &CreateCommentParams) -> Result<Comment> {
        self.base
            .request_json(Method::POST, COMMENTS_ENDPOINT, Some(params))
            .await
    }

    pub async fn get(&self, comment_id: &str) -> Result<Comment> {
        self.base
            .request_json(Method::GET, &resource_path(COMMENTS_ENDPOINT, comment_id), NO_BODY)
            .await
    }

    pub async fn update(&self, comment_id: &str, params: &UpdateCommentParams) -> Result<()> {
        self.base
            .request_empty(
                Method::POST,
                &resource_path(COMMENTS_ENDPOINT, comment_id),
                Some(params),
            )
            .await
    }

    pub async fn delete(&self, comment_id: &str) -> Result<()> {
        self.base
            .request_empty(
                Method::DELETE,
                &resource_path(COMMENTS_ENDPOINT, comment_id),
                NO_BODY,
            )
            .await
    }
}
