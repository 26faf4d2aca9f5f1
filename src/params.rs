//! Request parameters for every list, create and update operation.
//!
//! Every field is an `Option`; `None` fields are left out of the query
//! string or JSON body entirely. The `with_*` setters apply one policy:
//! strings are stored only when non-empty, integers only when non-zero and
//! lists only when non-empty. Boolean setters always store their value, so
//! `with_favorite(false)` sends `"is_favorite": false` while never calling it
//! sends nothing.
//!
//! ```
//! use todoist_rest::CreateTaskParams;
//!
//! let params = CreateTaskParams::default()
//!     .with_content("Buy milk")
//!     .with_description("");
//! assert_eq!(
//!     serde_json::to_string(&params).unwrap(),
//!     r#"{"content":"Buy milk"}"#
//! );
//! ```

use serde::Serialize;

use crate::models::{Attachment, DurationUnit};

fn set_str(slot: &mut Option<String>, value: impl Into<String>) {
    let value = value.into();
    if !value.is_empty() {
        *slot = Some(value);
    }
}

fn set_int<T: Default + PartialEq>(slot: &mut Option<T>, value: T) {
    if value != T::default() {
        *slot = Some(value);
    }
}

fn set_list<I, S>(slot: &mut Option<Vec<String>>, values: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    if !values.is_empty() {
        *slot = Some(values);
    }
}

fn push_query(query: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(v) = value {
        query.push((key, v.clone()));
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateProjectParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_style: Option<String>,
}

impl CreateProjectParams {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        set_str(&mut self.name, name);
        self
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        set_str(&mut self.parent_id, parent_id);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        set_str(&mut self.color, color);
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = Some(favorite);
        self
    }

    /// `list` or `board`.
    pub fn with_view_style(mut self, view_style: impl Into<String>) -> Self {
        set_str(&mut self.view_style, view_style);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateProjectParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_style: Option<String>,
}

impl UpdateProjectParams {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        set_str(&mut self.name, name);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        set_str(&mut self.color, color);
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = Some(favorite);
        self
    }

    pub fn with_view_style(mut self, view_style: impl Into<String>) -> Self {
        set_str(&mut self.view_style, view_style);
        self
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSectionsParams {
    pub project_id: Option<String>,
}

impl ListSectionsParams {
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        set_str(&mut self.project_id, project_id);
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_query(&mut query, "project_id", &self.project_id);
        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateSectionParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl CreateSectionParams {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        set_str(&mut self.name, name);
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        set_str(&mut self.project_id, project_id);
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        set_int(&mut self.order, order);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateSectionParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UpdateSectionParams {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        set_str(&mut self.name, name);
        self
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Filters for listing active tasks. `ids` is sent comma-joined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListTasksParams {
    pub project_id: Option<String>,
    pub section_id: Option<String>,
    pub label: Option<String>,
    /// Todoist filter query, e.g. `today | overdue`.
    pub filter: Option<String>,
    /// Language of `filter`, e.g. `en`.
    pub lang: Option<String>,
    pub ids: Option<Vec<String>>,
}

impl ListTasksParams {
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        set_str(&mut self.project_id, project_id);
        self
    }

    pub fn with_section_id(mut self, section_id: impl Into<String>) -> Self {
        set_str(&mut self.section_id, section_id);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        set_str(&mut self.label, label);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        set_str(&mut self.filter, filter);
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        set_str(&mut self.lang, lang);
        self
    }

    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        set_list(&mut self.ids, ids);
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_query(&mut query, "project_id", &self.project_id);
        push_query(&mut query, "section_id", &self.section_id);
        push_query(&mut query, "label", &self.label);
        push_query(&mut query, "filter", &self.filter);
        push_query(&mut query, "lang", &self.lang);
        if let Some(ref ids) = self.ids {
            if !ids.is_empty() {
                query.push(("ids", ids.join(",")));
            }
        }
        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateTaskParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_unit: Option<DurationUnit>,
}

impl CreateTaskParams {
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        set_str(&mut self.content, content);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        set_str(&mut self.description, description);
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        set_str(&mut self.project_id, project_id);
        self
    }

    pub fn with_section_id(mut self, section_id: impl Into<String>) -> Self {
        set_str(&mut self.section_id, section_id);
        self
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        set_str(&mut self.parent_id, parent_id);
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        set_int(&mut self.order, order);
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        set_list(&mut self.labels, labels);
        self
    }

    /// 1 (normal) through 4 (urgent).
    pub fn with_priority(mut self, priority: u8) -> Self {
        set_int(&mut self.priority, priority);
        self
    }

    /// Natural-language due date, e.g. `next monday at 9`.
    pub fn with_due_string(mut self, due_string: impl Into<String>) -> Self {
        set_str(&mut self.due_string, due_string);
        self
    }

    /// `YYYY-MM-DD`.
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        set_str(&mut self.due_date, due_date);
        self
    }

    /// RFC 3339 in UTC.
    pub fn with_due_datetime(mut self, due_datetime: impl Into<String>) -> Self {
        set_str(&mut self.due_datetime, due_datetime);
        self
    }

    pub fn with_due_lang(mut self, due_lang: impl Into<String>) -> Self {
        set_str(&mut self.due_lang, due_lang);
        self
    }

    pub fn with_assignee_id(mut self, assignee_id: impl Into<String>) -> Self {
        set_str(&mut self.assignee_id, assignee_id);
        self
    }

    /// Sets `duration` and `duration_unit` together; a zero amount sets neither.
    pub fn with_duration(mut self, amount: u32, unit: DurationUnit) -> Self {
        if amount != 0 {
            self.duration = Some(amount);
            self.duration_unit = Some(unit);
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateTaskParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_unit: Option<DurationUnit>,
}

impl UpdateTaskParams {
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        set_str(&mut self.content, content);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        set_str(&mut self.description, description);
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        set_list(&mut self.labels, labels);
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        set_int(&mut self.priority, priority);
        self
    }

    pub fn with_due_string(mut self, due_string: impl Into<String>) -> Self {
        set_str(&mut self.due_string, due_string);
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        set_str(&mut self.due_date, due_date);
        self
    }

    pub fn with_due_datetime(mut self, due_datetime: impl Into<String>) -> Self {
        set_str(&mut self.due_datetime, due_datetime);
        self
    }

    pub fn with_due_lang(mut self, due_lang: impl Into<String>) -> Self {
        set_str(&mut self.due_lang, due_lang);
        self
    }

    pub fn with_assignee_id(mut self, assignee_id: impl Into<String>) -> Self {
        set_str(&mut self.assignee_id, assignee_id);
        self
    }

    pub fn with_duration(mut self, amount: u32, unit: DurationUnit) -> Self {
        if amount != 0 {
            self.duration = Some(amount);
            self.duration_unit = Some(unit);
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateLabelParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl CreateLabelParams {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        set_str(&mut self.name, name);
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        set_int(&mut self.order, order);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        set_str(&mut self.color, color);
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = Some(favorite);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateLabelParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl UpdateLabelParams {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        set_str(&mut self.name, name);
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        set_int(&mut self.order, order);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        set_str(&mut self.color, color);
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = Some(favorite);
        self
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// One of `project_id` and `task_id` is required by the API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCommentsParams {
    pub project_id: Option<String>,
    pub task_id: Option<String>,
}

impl ListCommentsParams {
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        set_str(&mut self.project_id, project_id);
        self
    }

    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        set_str(&mut self.task_id, task_id);
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_query(&mut query, "project_id", &self.project_id);
        push_query(&mut query, "task_id", &self.task_id);
        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateCommentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl CreateCommentParams {
    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        set_str(&mut self.task_id, task_id);
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        set_str(&mut self.project_id, project_id);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        set_str(&mut self.content, content);
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateCommentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl UpdateCommentParams {
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        set_str(&mut self.content, content);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_task_with_only_content() {
        let params = CreateTaskParams::default().with_content("Buy milk");
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"content":"Buy milk"}"#
        );
    }

    #[test]
    fn empty_and_zero_values_are_skipped() {
        let params = CreateTaskParams::default()
            .with_content("")
            .with_description("")
            .with_order(0)
            .with_priority(0)
            .with_labels(Vec::<String>::new())
            .with_duration(0, DurationUnit::Minute);
        assert_eq!(params, CreateTaskParams::default());
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({}));
    }

    #[test]
    fn empty_value_does_not_clear_earlier_value() {
        let params = UpdateSectionParams::default()
            .with_name("Groceries")
            .with_name("");
        assert_eq!(params.name.as_deref(), Some("Groceries"));
    }

    #[test]
    fn non_empty_values_serialize_exactly() {
        let params = CreateTaskParams::default()
            .with_content("Write report")
            .with_project_id("220474322")
            .with_order(3)
            .with_priority(4)
            .with_labels(["work", "urgent"])
            .with_due_string("tomorrow at 9")
            .with_duration(30, DurationUnit::Minute);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "content": "Write report",
                "project_id": "220474322",
                "order": 3,
                "priority": 4,
                "labels": ["work", "urgent"],
                "due_string": "tomorrow at 9",
                "duration": 30,
                "duration_unit": "minute"
            })
        );
    }

    #[test]
    fn boolean_setter_always_stores() {
        let unset = CreateLabelParams::default().with_name("home");
        assert_eq!(serde_json::to_value(&unset).unwrap(), json!({"name": "home"}));

        let explicit_false = CreateLabelParams::default()
            .with_name("home")
            .with_favorite(false);
        assert_eq!(
            serde_json::to_value(&explicit_false).unwrap(),
            json!({"name": "home", "is_favorite": false})
        );
    }

    #[test]
    fn update_project_partial_body() {
        let params = UpdateProjectParams::default()
            .with_color("")
            .with_name("Renamed")
            .with_favorite(true);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"name": "Renamed", "is_favorite": true})
        );
    }

    #[test]
    fn list_tasks_query_joins_ids() {
        let params = ListTasksParams::default()
            .with_project_id("p1")
            .with_filter("today | overdue")
            .with_lang("")
            .with_ids(["1", "2", "3"]);
        assert_eq!(
            params.to_query(),
            vec![
                ("project_id", "p1".to_string()),
                ("filter", "today | overdue".to_string()),
                ("ids", "1,2,3".to_string()),
            ]
        );
    }

    #[test]
    fn list_tasks_query_skips_empty_ids() {
        let params = ListTasksParams {
            ids: Some(Vec::new()),
            ..Default::default()
        };
        assert!(params.to_query().is_empty());
    }

    #[test]
    fn list_comments_and_sections_query() {
        let comments = ListCommentsParams::default().with_task_id("t1");
        assert_eq!(comments.to_query(), vec![("task_id", "t1".to_string())]);

        let sections = ListSectionsParams::default().with_project_id("");
        assert!(sections.to_query().is_empty());
    }

    #[test]
    fn comment_with_attachment() {
        let params = CreateCommentParams::default()
            .with_task_id("2995104339")
            .with_content("See attached")
            .with_attachment(Attachment {
                file_name: Some("report.pdf".into()),
                file_type: Some("application/pdf".into()),
                file_url: Some("https://example.com/report.pdf".into()),
                resource_type: Some("file".into()),
                ..Default::default()
            });
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "task_id": "2995104339",
                "content": "See attached",
                "attachment": {
                    "resource_type": "file",
                    "file_name": "report.pdf",
                    "file_type": "application/pdf",
                    "file_url": "https://example.com/report.pdf"
                }
            })
        );
    }
}
