use serde::{Deserialize, Serialize};

// A missing or `null` field decodes to `None` or the type's empty value
// (`null_as_default`). Only `id` is required on every record.

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_shared: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_favorite: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_inbox_project: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_team_inbox: bool,
    /// `list` or `board`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub view_style: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// A user with access to a shared project.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Collaborator {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_id: String,
    #[serde(default)]
    pub section_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_completed: bool,
    /// Label names, not label ids.
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i32,
    /// 1 (normal) through 4 (urgent).
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: u8,
    #[serde(default)]
    pub due: Option<Due>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment_count: u32,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub assigner_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default)]
    pub duration: Option<TaskDuration>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Due {
    /// Human-readable form, e.g. "every monday".
    #[serde(default, deserialize_with = "null_as_default")]
    pub string: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_recurring: bool,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskDuration {
    pub amount: u32,
    pub unit: DurationUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Minute,
    Day,
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Label {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_favorite: bool,
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// A note on either a task or a project; exactly one of `task_id` and
/// `project_id` is set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posted_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

/// File attached to a comment.
///
/// Image attachments carry thumbnails (`tn_l`, `tn_m`, `tn_s`, each a
/// `[url, width, height]` triple) and audio attachments carry
/// `file_duration`. Keys not modelled here are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_state: Option<String>,
    #[serde(rename = "tn_l", default, skip_serializing_if = "Option::is_none")]
    pub large_thumbnail: Option<Vec<serde_json::Value>>,
    #[serde(rename = "tn_m", default, skip_serializing_if = "Option::is_none")]
    pub medium_thumbnail: Option<Vec<serde_json::Value>>,
    #[serde(rename = "tn_s", default, skip_serializing_if = "Option::is_none")]
    pub small_thumbnail: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_duration: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_decodes_from_api_payload() {
        let task: Task = serde_json::from_value(json!({
            "id": "2995104339",
            "project_id": "2203306141",
            "section_id": null,
            "content": "Buy Milk",
            "description": "",
            "is_completed": false,
            "labels": ["Food", "Shopping"],
            "parent_id": null,
            "order": 1,
            "priority": 1,
            "due": {
                "date": "2016-09-01",
                "is_recurring": false,
                "datetime": "2016-09-01T12:00:00.000000Z",
                "string": "tomorrow at 12",
                "timezone": "Europe/Moscow"
            },
            "url": "https://todoist.com/showTask?id=2995104339",
            "comment_count": 10,
            "assignee_id": "2671142",
            "assigner_id": "2671362",
            "creator_id": "2671355",
            "created_at": "2019-12-11T22:36:50.000000Z",
            "duration": {"amount": 15, "unit": "minute"}
        }))
        .unwrap();

        assert_eq!(task.id, "2995104339");
        assert_eq!(task.section_id, None);
        assert_eq!(task.labels, vec!["Food", "Shopping"]);
        let due = task.due.unwrap();
        assert_eq!(due.string, "tomorrow at 12");
        assert_eq!(due.timezone.as_deref(), Some("Europe/Moscow"));
        assert_eq!(task.assignee_id.as_deref(), Some("2671142"));
        assert_eq!(
            task.duration,
            Some(TaskDuration {
                amount: 15,
                unit: DurationUnit::Minute
            })
        );
    }

    #[test]
    fn task_tolerates_missing_and_null_fields() {
        let task: Task = serde_json::from_value(json!({
            "id": "1",
            "content": "Buy milk",
            "description": null,
            "labels": null
        }))
        .unwrap();
        assert_eq!(task.content, "Buy milk");
        assert_eq!(task.description, "");
        assert!(task.labels.is_empty());
        assert!(task.due.is_none());
        assert!(!task.is_completed);
        assert_eq!(task.priority, 0);

        let task: Task = serde_json::from_value(json!({
            "id": "1",
            "content": "x",
            "url": null,
            "order": null,
            "is_completed": null
        }))
        .unwrap();
        assert_eq!(task.url, "");
        assert_eq!(task.order, 0);
        assert!(!task.is_completed);
    }

    #[test]
    fn null_scalars_decode_to_empty_values() {
        let project: Project = serde_json::from_value(json!({
            "id": "1",
            "name": "Inbox",
            "color": null,
            "order": null,
            "is_favorite": null
        }))
        .unwrap();
        assert_eq!(project.name, "Inbox");
        assert_eq!(project.color, "");
        assert_eq!(project.order, 0);
        assert!(!project.is_favorite);

        let comment: Comment = serde_json::from_value(json!({
            "id": "1",
            "content": "x",
            "posted_at": null
        }))
        .unwrap();
        assert_eq!(comment.posted_at, "");

        let label: Label = serde_json::from_value(json!({
            "id": "1",
            "name": null,
            "order": null,
            "is_favorite": null
        }))
        .unwrap();
        assert_eq!(label.name, "");
        assert_eq!(label.order, 0);
        assert!(!label.is_favorite);

        let due: Due = serde_json::from_value(json!({
            "string": null,
            "date": "2016-09-01",
            "is_recurring": null
        }))
        .unwrap();
        assert_eq!(due.string, "");
        assert!(!due.is_recurring);
    }

    #[test]
    fn task_requires_id() {
        let err = serde_json::from_value::<Task>(json!({"content": "x"})).unwrap_err();
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn comment_with_image_attachment() {
        let comment: Comment = serde_json::from_value(json!({
            "id": "2992679862",
            "task_id": "2995104339",
            "project_id": null,
            "posted_at": "2016-09-22T07:00:00.000000Z",
            "content": "Need one bottle of milk",
            "attachment": {
                "resource_type": "file",
                "file_name": "photo.jpg",
                "file_type": "image/jpeg",
                "file_url": "https://cdn.todoist.com/photo.jpg",
                "file_size": 52000,
                "upload_state": "completed",
                "tn_s": ["https://cdn.todoist.com/tn_s.jpg", 96, 72],
                "image": "https://cdn.todoist.com/full.jpg"
            }
        }))
        .unwrap();

        assert_eq!(comment.project_id, None);
        let attachment = comment.attachment.unwrap();
        assert_eq!(attachment.file_size, Some(52000));
        assert_eq!(attachment.small_thumbnail.as_ref().map(Vec::len), Some(3));
        assert!(attachment.large_thumbnail.is_none());
        assert_eq!(
            attachment.extra.get("image"),
            Some(&json!("https://cdn.todoist.com/full.jpg"))
        );
    }

    #[test]
    fn attachment_serializes_only_set_fields() {
        let attachment = Attachment {
            resource_type: Some("file".into()),
            file_url: Some("https://example.com/a.pdf".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&attachment).unwrap(),
            json!({"resource_type": "file", "file_url": "https://example.com/a.pdf"})
        );
    }
}
