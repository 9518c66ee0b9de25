//! Workflow templates that map events to sets of follow-up tasks.
//!
//! Templates are data, typically loaded from configuration or an admin
//! surface. Expansion into concrete tasks lives in the engine crate.

use serde::{Deserialize, Serialize};

use crate::event::EventKind;
use crate::id::generate_id;
use crate::provider::ProviderRole;

/// Recipe for one task inside a workflow template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBlueprint {
    pub title: String,
    pub description: String,
    /// Days between the trigger event and the task's due date.
    pub days_offset: i64,
    /// Role the task should go to. `None` lets assignment fall through to
    /// any available staff member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assign_to_role: Option<ProviderRole>,
}

impl TaskBlueprint {
    pub fn new(title: impl Into<String>, description: impl Into<String>, days_offset: i64) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            days_offset,
            assign_to_role: None,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: ProviderRole) -> Self {
        self.assign_to_role = Some(role);
        self
    }
}

/// A named, per-clinic mapping from an event kind to task blueprints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTemplate {
    pub id: String,
    pub name: String,
    pub trigger: EventKind,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blueprints: Vec<TaskBlueprint>,
}

fn default_active() -> bool {
    true
}

impl WorkflowTemplate {
    /// Creates an active template with no blueprints yet.
    pub fn new(name: impl Into<String>, trigger: EventKind) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            trigger,
            active: true,
            blueprints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_blueprint(mut self, blueprint: TaskBlueprint) -> Self {
        self.blueprints.push(blueprint);
        self
    }

    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Whether this template fires for an event of `kind`.
    #[must_use]
    pub fn matches(&self, kind: EventKind) -> bool {
        self.active && self.trigger == kind
    }
}
