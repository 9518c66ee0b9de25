//! Expansion of workflow templates into concrete tasks.

use time::OffsetDateTime;
use tracing::{debug, warn};

use careops_core::time::days_from;
use careops_core::{DomainEvent, Provider, Task, WorkflowTemplate};

use crate::assign::by_role_or_first;

/// Expands every template matching the event into tasks.
///
/// Each produced task is stamped with the event's patient and case, due
/// `days_offset` days after `now`, and carries the template name as its
/// provenance. A blueprint whose assignee cannot be resolved is skipped
/// with a warning rather than producing unassignable work.
pub fn expand(
    event: &DomainEvent,
    templates: &[WorkflowTemplate],
    providers: &[Provider],
    now: OffsetDateTime,
) -> Vec<Task> {
    let kind = event.kind();
    let mut tasks = Vec::new();

    for template in templates.iter().filter(|t| t.matches(kind)) {
        for blueprint in &template.blueprints {
            let Some(assignee) = by_role_or_first(providers, blueprint.assign_to_role) else {
                warn!(
                    template = %template.name,
                    title = %blueprint.title,
                    "no active provider available, skipping blueprint"
                );
                continue;
            };

            let mut task = Task::new(
                blueprint.title.clone(),
                blueprint.description.clone(),
                days_from(now, blueprint.days_offset),
                now,
            )
            .with_assignee(&assignee.id)
            .with_provenance(&template.name);

            if let Some(patient_id) = event.patient_id() {
                task = task.with_patient(patient_id);
            }
            if let Some(case_id) = event.case_id() {
                task = task.with_case(case_id);
            }
            tasks.push(task);
        }
    }

    debug!(event = %kind, count = tasks.len(), "expanded workflow templates");
    tasks
}
