use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use std::{fmt, str::FromStr, sync::LazyLock};

use crate::error::TaskboardError;

/// Status of a task as stored by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(TaskboardError::Validation(format!(
                "Invalid task status '{}'. Valid statuses: pending, completed",
                s
            ))),
        }
    }
}

/// A project listed on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// A task record belonging to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub project_id: u64,
}

impl Task {
    /// Applies an accepted update to a local copy of the record
    pub fn apply(&mut self, update: &TaskUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone()).filter(|d| !d.is_empty());
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if update.is_full() {
            // A full edit always carries the due date, where absent means cleared
            self.due_date = update
                .due_date
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc());
        }
        self.project_id = update.project_id;
    }
}

/// Fields for creating a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub project_id: u64,
}

impl NewTask {
    pub fn new(project_id: u64, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            due_date: None,
            project_id,
        }
    }

    pub fn validate(&self) -> Result<(), TaskboardError> {
        validate_title(&self.title)
    }
}

/// Body of a task update request.
///
/// A full edit sets every field; a description edit only sends the
/// description and the owning project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub project_id: u64,
}

impl TaskUpdate {
    /// A full edit carries the title and owns every field of the record
    pub fn is_full(&self) -> bool {
        self.title.is_some()
    }
}

impl Serialize for TaskUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TaskUpdate", 5)?;
        match &self.title {
            Some(title) => state.serialize_field("title", title)?,
            None => state.skip_field("title")?,
        }
        match &self.description {
            Some(description) => state.serialize_field("description", description)?,
            None => state.skip_field("description")?,
        }
        match &self.status {
            Some(status) => state.serialize_field("status", status)?,
            None => state.skip_field("status")?,
        }
        // Full edits send a null dueDate to clear it; partial edits leave it alone
        if self.is_full() {
            state.serialize_field("dueDate", &self.due_date)?;
        } else {
            state.skip_field("dueDate")?;
        }
        state.serialize_field("projectId", &self.project_id)?;
        state.end()
    }
}

impl TaskUpdate {
    pub fn full(
        task: &Task,
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            status: Some(status),
            due_date,
            project_id: task.project_id,
        }
    }

    pub fn description_only(task: &Task, description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: Some(description.into()),
            status: None,
            due_date: None,
            project_id: task.project_id,
        }
    }

    /// A full edit must carry a non-blank title
    pub fn validate(&self) -> Result<(), TaskboardError> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

fn validate_title(title: &str) -> Result<(), TaskboardError> {
    if title.trim().is_empty() {
        return Err(TaskboardError::Validation("Title is required".to_string()));
    }
    Ok(())
}

/// Tasks sharing a title, shown as one column of the project board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGroup {
    pub title: String,
    pub tasks: Vec<Task>,
}

/// Keeps the tasks of `project_id` and groups them by exact title.
///
/// Groups appear in the order their title is first seen; tasks keep their
/// input order inside a group.
pub fn group_tasks_by_title(tasks: &[Task], project_id: u64) -> Vec<TaskGroup> {
    let mut groups: Vec<TaskGroup> = Vec::new();
    for task in tasks.iter().filter(|t| t.project_id == project_id) {
        match groups.iter_mut().find(|g| g.title == task.title) {
            Some(group) => group.tasks.push(task.clone()),
            None => groups.push(TaskGroup {
                title: task.title.clone(),
                tasks: vec![task.clone()],
            }),
        }
    }
    groups
}

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static MARKDOWN_MARKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[#*_`~]").unwrap());

/// Plain-text preview of a markdown/HTML description.
///
/// Returns `None` for a missing or empty description. Longer text is cut
/// at `max_len` characters and suffixed with `...`.
pub fn preview_description(text: Option<&str>, max_len: usize) -> Option<String> {
    let text = text.filter(|t| !t.is_empty())?;

    let without_tags = HTML_TAG.replace_all(text, "");
    let plain = MARKDOWN_MARKS.replace_all(&without_tags, "");
    let plain = plain.trim();

    if plain.chars().count() <= max_len {
        return Some(plain.to_string());
    }

    let cut: String = plain.chars().take(max_len).collect();
    Some(format!("{}...", cut.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, title: &str, project_id: u64) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            status: TaskStatus::Pending,
            due_date: None,
            project_id,
        }
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(TaskStatus::from_str("pending").unwrap(), TaskStatus::Pending);
        assert_eq!(
            TaskStatus::from_str("Completed").unwrap(),
            TaskStatus::Completed
        );
        assert!(TaskStatus::from_str("archived").is_err());
    }

    #[test]
    fn test_task_deserialization_from_backend() {
        let json = r#"{
            "id": 7,
            "title": "Design",
            "description": "Draft **wireframes**",
            "status": "completed",
            "dueDate": "2024-05-01T00:00:00Z",
            "projectId": 3
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.project_id, 3);
        assert!(task.due_date.is_some());
    }

    #[test]
    fn test_task_deserialization_with_nulls() {
        let json = r#"{"id": 1, "title": "T", "description": null, "dueDate": null, "projectId": 2}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.description.is_none());
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_full_update_requires_title() {
        let original = task(1, "Design", 3);
        let update = TaskUpdate::full(&original, "  ", "", TaskStatus::Pending, None);

        let err = update.validate().unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn test_description_update_skips_title_check() {
        let original = task(1, "Design", 3);
        let update = TaskUpdate::description_only(&original, "# Notes");
        assert!(update.validate().is_ok());

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["description"], "# Notes");
        assert_eq!(json["projectId"], 3);
        assert!(json.get("title").is_none());
        assert!(json.get("status").is_none());
        assert!(json.get("dueDate").is_none());
    }

    #[test]
    fn test_full_update_sends_null_due_date() {
        let original = task(1, "Design", 3);
        let update = TaskUpdate::full(&original, "Design", "", TaskStatus::Pending, None);

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["title"], "Design");
        assert_eq!(json["status"], "pending");
        assert!(json.get("dueDate").unwrap().is_null());

        let due = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let update = TaskUpdate::full(&original, "Design", "", TaskStatus::Pending, Some(due));
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["dueDate"], "2024-06-30");
    }

    #[test]
    fn test_description_update_wire_matches_local_apply() {
        let mut record = task(1, "Design", 3);
        let due = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let scheduled = TaskUpdate::full(&record, "Design", "", TaskStatus::Pending, Some(due));
        record.apply(&scheduled);

        let update = TaskUpdate::description_only(&record, "Notes");
        let wire = serde_json::to_string(&update).unwrap();
        let received: TaskUpdate = serde_json::from_str(&wire).unwrap();
        assert_eq!(received, update);

        record.apply(&received);
        assert_eq!(record.due_date.unwrap().date_naive(), due);
    }

    #[test]
    fn test_apply_full_update() {
        let mut record = task(1, "Design", 3);
        let due = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let update = TaskUpdate::full(&record, "Build", "Ship it", TaskStatus::Completed, Some(due));

        record.apply(&update);
        assert_eq!(record.title, "Build");
        assert_eq!(record.description.as_deref(), Some("Ship it"));
        assert_eq!(record.status, TaskStatus::Completed);
        assert_eq!(record.due_date.unwrap().date_naive(), due);
    }

    #[test]
    fn test_apply_description_update_keeps_other_fields() {
        let mut record = task(1, "Design", 3);
        record.status = TaskStatus::Completed;

        let update = TaskUpdate::description_only(&record, "Notes");
        record.apply(&update);
        assert_eq!(record.title, "Design");
        assert_eq!(record.status, TaskStatus::Completed);
        assert_eq!(record.description.as_deref(), Some("Notes"));
    }

    #[test]
    fn test_group_tasks_by_title() {
        let tasks = vec![
            task(1, "Backend", 1),
            task(2, "Frontend", 1),
            task(3, "Backend", 1),
            task(4, "Backend", 2),
            task(5, "Docs", 1),
        ];

        let groups = group_tasks_by_title(&tasks, 1);
        let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Backend", "Frontend", "Docs"]);

        let ids: Vec<u64> = groups[0].tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_group_tasks_for_unknown_project() {
        let tasks = vec![task(1, "Backend", 1)];
        assert!(group_tasks_by_title(&tasks, 9).is_empty());
    }

    #[test]
    fn test_preview_missing_or_empty() {
        assert_eq!(preview_description(None, 80), None);
        assert_eq!(preview_description(Some(""), 80), None);
    }

    #[test]
    fn test_preview_strips_markup() {
        let preview = preview_description(Some("## Plan\n<b>bold</b> and *emph* `code`"), 80);
        assert_eq!(preview.as_deref(), Some("Plan\nbold and emph code"));
    }

    #[test]
    fn test_preview_truncates() {
        let text = "word ".repeat(30);
        let preview = preview_description(Some(&text), 12).unwrap();
        assert_eq!(preview, "word word wo...");

        let preview = preview_description(Some("exactly ten"), 11).unwrap();
        assert_eq!(preview, "exactly ten");
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let preview = preview_description(Some("ééééé"), 3).unwrap();
        assert_eq!(preview, "ééé...");
    }
}
