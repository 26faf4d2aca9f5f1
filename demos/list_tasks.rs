//! Print active tasks grouped by project.
//!
//! ```bash
//! TODOIST_API_TOKEN=... RUST_LOG=todoist_rest=debug cargo run --example list-tasks -- "today | overdue"
//! ```
//!
//! The optional argument is a Todoist filter query. The API ignores
//! `project_id` when a filter is given, so filtered tasks are fetched once and
//! grouped locally.

use std::time::Duration;

use todoist_rest::{ListTasksParams, Task, TodoistClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let client = TodoistClient::from_env()?.with_timeout(Duration::from_secs(15));
    let filter = std::env::args().nth(1).unwrap_or_default();

    let projects = client.projects().list().await?;
    let tasks = client
        .tasks()
        .list(&ListTasksParams::default().with_filter(filter))
        .await?;

    for project in &projects {
        let in_project: Vec<&Task> = tasks.iter().filter(|t| t.project_id == project.id).collect();
        if in_project.is_empty() {
            continue;
        }

        println!("{} ({})", project.name, in_project.len());
        for task in in_project {
            let due = task.due.as_ref().map(|d| d.string.as_str()).unwrap_or("");
            println!("  [p{}] {:<50} {}", task.priority, task.content, due);
        }
    }
    Ok(())
}
