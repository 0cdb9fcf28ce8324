// Task record, priority/status enums and the create/update payloads

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{non_empty, Record, ValidationError};

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ValidationError::InvalidPriority),
        }
    }
}

/// Task progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    NotStarted,
    InProgress,
    Done,
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-started" => Ok(Self::NotStarted),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ValidationError::InvalidStatus),
        }
    }
}

/// A task as stored in the tasks collection file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Owning project id
    pub pj_id: u64,
    pub id: u64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Free-form date string, not validated
    pub due_date: String,
    pub status: Status,
}

impl Task {
    pub fn new(id: u64, fields: TaskFields) -> Self {
        Self {
            pj_id: fields.pj_id,
            id,
            title: fields.title,
            description: fields.description,
            priority: fields.priority,
            due_date: fields.due_date,
            status: fields.status,
        }
    }

    /// Whether this task is addressed by `/projects/{project_id}/tasks/{task_id}`
    pub fn matches(&self, project_id: u64, task_id: u64) -> bool {
        self.pj_id == project_id && self.id == task_id
    }
}

impl Record for Task {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Body of `POST /projects/{id}/tasks`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Kept loose so a string or missing `pjId` reports a mismatch rather than a parse error
    #[serde(default)]
    pub pj_id: Option<serde_json::Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Validated task fields, waiting for an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub pj_id: u64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: String,
    pub status: Status,
}

impl NewTask {
    /// Check the payload against the project id taken from the path.
    ///
    /// Checks run in a fixed order: project id, required fields, priority, status.
    pub fn validate(self, path_project_id: Option<u64>) -> Result<TaskFields, ValidationError> {
        let body_project_id = self.pj_id.as_ref().and_then(integral_id);
        let pj_id = match (path_project_id, body_project_id) {
            (Some(path_id), Some(body_id)) if path_id == body_id => path_id,
            _ => return Err(ValidationError::ProjectIdMismatch),
        };

        let (Some(title), Some(description), Some(priority), Some(due_date), Some(status)) = (
            non_empty(self.title),
            non_empty(self.description),
            non_empty(self.priority),
            non_empty(self.due_date),
            non_empty(self.status),
        ) else {
            return Err(ValidationError::MissingTaskFields);
        };

        Ok(TaskFields {
            pj_id,
            title,
            description,
            priority: priority.parse()?,
            due_date,
            status: status.parse()?,
        })
    }
}

/// A JSON number holding a whole, non-negative value (`1` and `1.0` alike)
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn integral_id(value: &serde_json::Value) -> Option<u64> {
    if let Some(id) = value.as_u64() {
        return Some(id);
    }
    let float = value.as_f64()?;
    if float.fract() == 0.0 && (0.0..u64::MAX as f64).contains(&float) {
        return Some(float as u64);
    }
    None
}

/// Body of `PUT /projects/{id}/tasks/{task_id}`; absent fields are left alone
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TaskPatch {
    /// Apply the patch. Enum values are checked before anything is written,
    /// so a rejected patch leaves the task untouched.
    pub fn apply(self, task: &mut Task) -> Result<(), ValidationError> {
        let priority = self
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?;
        let status = self
            .status
            .as_deref()
            .map(str::parse::<Status>)
            .transpose()?;

        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(priority) = priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(status) = status {
            task.status = status;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> serde_json::Value {
        json!({
            "pjId": 1,
            "title": "T",
            "description": "D",
            "priority": "high",
            "dueDate": "2024-01-01",
            "status": "not-started"
        })
    }

    fn sample_task() -> Task {
        Task {
            pj_id: 1,
            id: 1,
            title: "T".to_string(),
            description: "D".to_string(),
            priority: Priority::High,
            due_date: "2024-01-01".to_string(),
            status: Status::NotStarted,
        }
    }

    #[test]
    fn test_enum_round_trip_names() {
        assert_eq!("medium".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!("in-progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!(
            serde_json::to_value(Priority::Low).unwrap(),
            json!("low")
        );
        assert_eq!(
            serde_json::to_value(Status::InProgress).unwrap(),
            json!("in-progress")
        );
    }

    #[test]
    fn test_rejects_unknown_enum_values() {
        assert_eq!(
            "urgent".parse::<Priority>(),
            Err(ValidationError::InvalidPriority)
        );
        assert_eq!(
            "blocked".parse::<Status>(),
            Err(ValidationError::InvalidStatus)
        );
    }

    #[test]
    fn test_validate_full_payload() {
        let payload: NewTask = serde_json::from_value(full_payload()).unwrap();
        let fields = payload.validate(Some(1)).unwrap();
        assert_eq!(fields.pj_id, 1);
        assert_eq!(fields.priority, Priority::High);
        assert_eq!(fields.status, Status::NotStarted);
    }

    #[test]
    fn test_validate_project_id_checked_first() {
        // Mismatch wins over the missing fields
        let payload: NewTask = serde_json::from_value(json!({"pjId": 2})).unwrap();
        assert_eq!(
            payload.validate(Some(1)),
            Err(ValidationError::ProjectIdMismatch)
        );

        let payload: NewTask = serde_json::from_value(full_payload()).unwrap();
        assert_eq!(payload.validate(None), Err(ValidationError::ProjectIdMismatch));

        let mut body = full_payload();
        body["pjId"] = json!("1");
        let payload: NewTask = serde_json::from_value(body).unwrap();
        assert_eq!(
            payload.validate(Some(1)),
            Err(ValidationError::ProjectIdMismatch)
        );
    }

    #[test]
    fn test_validate_accepts_whole_float_project_id() {
        let mut body = full_payload();
        body["pjId"] = json!(1.0);
        let payload: NewTask = serde_json::from_value(body).unwrap();
        assert_eq!(payload.validate(Some(1)).unwrap().pj_id, 1);

        let mut body = full_payload();
        body["pjId"] = json!(1.5);
        let payload: NewTask = serde_json::from_value(body).unwrap();
        assert_eq!(
            payload.validate(Some(1)),
            Err(ValidationError::ProjectIdMismatch)
        );
    }

    #[test]
    fn test_validate_zero_ids_compare_equal() {
        let mut body = full_payload();
        body["pjId"] = json!(0);
        let payload: NewTask = serde_json::from_value(body).unwrap();
        assert_eq!(payload.validate(Some(0)).unwrap().pj_id, 0);
    }

    #[test]
    fn test_validate_missing_field() {
        let mut body = full_payload();
        body.as_object_mut().unwrap().remove("dueDate");
        let payload: NewTask = serde_json::from_value(body).unwrap();
        assert_eq!(
            payload.validate(Some(1)),
            Err(ValidationError::MissingTaskFields)
        );
    }

    #[test]
    fn test_validate_enums() {
        let mut body = full_payload();
        body["priority"] = json!("urgent");
        let payload: NewTask = serde_json::from_value(body).unwrap();
        assert_eq!(
            payload.validate(Some(1)),
            Err(ValidationError::InvalidPriority)
        );

        let mut body = full_payload();
        body["status"] = json!("blocked");
        let payload: NewTask = serde_json::from_value(body).unwrap();
        assert_eq!(
            payload.validate(Some(1)),
            Err(ValidationError::InvalidStatus)
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(sample_task()).unwrap();
        assert_eq!(value["pjId"], json!(1));
        assert_eq!(value["dueDate"], json!("2024-01-01"));
        assert_eq!(value["status"], json!("not-started"));
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut task = sample_task();
        let patch: TaskPatch = serde_json::from_value(json!({"status": "done"})).unwrap();
        patch.apply(&mut task).unwrap();

        assert_eq!(task.status, Status::Done);
        assert_eq!(task.title, "T");
        assert_eq!(task.description, "D");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date, "2024-01-01");
    }

    #[test]
    fn test_rejected_patch_leaves_task_untouched() {
        let mut task = sample_task();
        let patch: TaskPatch =
            serde_json::from_value(json!({"title": "New", "priority": "urgent"})).unwrap();
        assert_eq!(
            patch.apply(&mut task),
            Err(ValidationError::InvalidPriority)
        );
        assert_eq!(task, sample_task());
    }
}
