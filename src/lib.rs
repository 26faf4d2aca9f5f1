//! Todoist REST API client library for Rust.
//!
//! A typed async client for the
//! [Todoist REST API v2](https://developer.todoist.com/rest/v2/). It covers
//! projects, sections, tasks, labels and comments: request parameters are
//! plain structs with fluent setters, responses decode into the record types
//! in [`models`].
//!
//! # Quick Start
//!
//! ```no_run
//! use todoist_rest::{CreateTaskParams, TodoistClient};
//!
//! # async fn run() -> todoist_rest::Result<()> {
//! let client = TodoistClient::new("0123456789abcdef")?;
//!
//! let task = client
//!     .tasks()
//!     .create(&CreateTaskParams::default().with_content("Buy milk").with_priority(2))
//!     .await?;
//! client.tasks().close(&task.id).await?;
//!
//! for project in client.projects().list().await? {
//!     println!("{}: {}", project.id, project.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Cancellation
//!
//! Dropping an operation's future aborts the request. To cancel from
//! elsewhere, derive a client bound to a [`CancellationToken`]; its calls
//! fail with [`TodoistError::Cancelled`] once the token fires.
//!
//! ```no_run
//! use todoist_rest::{CancellationToken, TodoistClient};
//!
//! # async fn run(client: TodoistClient) {
//! let token = CancellationToken::new();
//! let scoped = client.with_cancellation(token.clone());
//! token.cancel();
//! assert!(scoped.labels().list().await.is_err());
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod params;

// Re-export the main public types at the crate root for convenience.
pub use client::{
    CommentsClient, LabelsClient, ProjectsClient, SectionsClient, TasksClient, TodoistClient,
};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{Result, TodoistError};
pub use models::{
    Attachment, Collaborator, Comment, Due, DurationUnit, Label, Project, Section, Task,
    TaskDuration,
};
pub use params::{
    CreateCommentParams, CreateLabelParams, CreateProjectParams, CreateSectionParams,
    CreateTaskParams, ListCommentsParams, ListSectionsParams, ListTasksParams,
    UpdateCommentParams, UpdateLabelParams, UpdateProjectParams, UpdateSectionParams,
    UpdateTaskParams,
};
pub use tokio_util::sync::CancellationToken;
