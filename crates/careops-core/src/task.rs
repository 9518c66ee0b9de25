//! Follow-up tasks and their lifecycle status.
//!
//! Tasks are the engine's only write-side output for workflow and rule
//! evaluation. Rule code builds them through [`Task::new`] and the `with_*`
//! builders so that identifier generation and timestamping stay in one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

use crate::id::generate_id;

/// Lifecycle status of a follow-up task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }

    /// Whether the status is final. Terminal tasks are invisible to
    /// duplicate suppression.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of follow-up work owned by a staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub due_date: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub status: TaskStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Name of the workflow or rule that produced the task, when it was not
    /// created by hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_workflow: Option<String>,
}

impl Task {
    /// Creates a new open task due at `due_date`, stamped with `now`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: OffsetDateTime,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id: generate_id(),
            case_id: None,
            patient_id: None,
            title: title.into(),
            description: description.into(),
            due_date,
            assigned_to: None,
            status: TaskStatus::Todo,
            created_at: now,
            updated_at: now,
            created_by_workflow: None,
        }
    }

    #[must_use]
    pub fn with_case(mut self, case_id: impl Into<String>) -> Self {
        self.case_id = Some(case_id.into());
        self
    }

    #[must_use]
    pub fn with_patient(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, provider_id: impl Into<String>) -> Self {
        self.assigned_to = Some(provider_id.into());
        self
    }

    #[must_use]
    pub fn with_provenance(mut self, workflow_name: impl Into<String>) -> Self {
        self.created_by_workflow = Some(workflow_name.into());
        self
    }

    /// Whether the task still needs attention.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Moves the task to `status` and refreshes the update stamp.
    pub fn set_status(&mut self, status: TaskStatus, now: OffsetDateTime) {
        self.status = status;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_new_task_defaults() {
        let now = datetime!(2024-06-01 10:00:00 UTC);
        let due = datetime!(2024-06-02 10:00:00 UTC);
        let task = Task::new("Call patient", "Confirm visit details", due, now);

        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.due_date, due);
        assert_eq!(task.created_at, now);
        assert_eq!(task.updated_at, now);
        assert!(task.case_id.is_none());
        assert!(task.assigned_to.is_none());
        assert!(task.created_by_workflow.is_none());
        assert!(task.is_open());
    }

    #[test]
    fn test_builders() {
        let now = datetime!(2024-06-01 10:00:00 UTC);
        let task = Task::new("Review labs", "Check latest panel", now, now)
            .with_case("case-1")
            .with_patient("patient-1")
            .with_assignee("provider-1")
            .with_provenance("new_patient_intake");

        assert_eq!(task.case_id.as_deref(), Some("case-1"));
        assert_eq!(task.patient_id.as_deref(), Some("patient-1"));
        assert_eq!(task.assigned_to.as_deref(), Some("provider-1"));
        assert_eq!(task.created_by_workflow.as_deref(), Some("new_patient_intake"));
    }

    #[test]
    fn test_set_status_touches_updated_at() {
        let created = datetime!(2024-06-01 10:00:00 UTC);
        let later = datetime!(2024-06-01 15:30:00 UTC);
        let mut task = Task::new("Review labs", "Check latest panel", created, created);

        task.set_status(TaskStatus::Done, later);
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.updated_at, later);
        assert_eq!(task.created_at, created);
        assert!(!task.is_open());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            serde_json::json!("inProgress")
        );
        let parsed: TaskStatus = serde_json::from_value(serde_json::json!("todo")).unwrap();
        assert_eq!(parsed, TaskStatus::Todo);
        assert_eq!(TaskStatus::InProgress.to_string(), "inProgress");
    }

    #[test]
    fn test_task_serialization_camel_case() {
        let now = datetime!(2024-06-01 10:00:00 UTC);
        let task = Task::new("Call patient", "Confirm visit details", now, now)
            .with_patient("patient-1");
        let value = serde_json::to_value(&task).unwrap();

        assert_json_diff::assert_json_include!(
            actual: value.clone(),
            expected: serde_json::json!({
                "patientId": "patient-1",
                "dueDate": "2024-06-01T10:00:00Z",
                "status": "todo",
            })
        );
        assert!(value.get("caseId").is_none());
        assert!(value.get("createdByWorkflow").is_none());
    }
}
