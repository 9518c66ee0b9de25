//! Top-level event dispatch.
//!
//! [`process_event`] is the pure rule pass: template expansion plus the
//! urgent-case special case. [`dispatch_event`] is what callers normally
//! use; it runs the same pass against a full snapshot and suppresses
//! duplicates against the snapshot's open tasks before returning. The
//! caller persists whatever comes back.

use time::OffsetDateTime;
use tracing::info;

use careops_core::{DomainEvent, Provider, Snapshot, Task, WorkflowTemplate};

use crate::config::EngineConfig;
use crate::dedup::deduplicate_tasks;
use crate::rules::create_urgent_case_task;
use crate::workflow::expand;

/// Routes one event through the template and rule pass.
///
/// Every active template matching the event's kind contributes its
/// blueprint tasks. A `caseCreated` event for an urgent case additionally
/// produces the escalation task. No deduplication happens here.
pub fn process_event(
    event: &DomainEvent,
    templates: &[WorkflowTemplate],
    providers: &[Provider],
    now: OffsetDateTime,
    config: &EngineConfig,
) -> Vec<Task> {
    let mut tasks = expand(event, templates, providers, now);

    if let Some(case) = event.as_case() {
        if let Some(task) = create_urgent_case_task(case, providers, now, config) {
            tasks.push(task);
        }
    }
    tasks
}

/// Processes an event against a snapshot and filters out tasks that
/// duplicate open work already on file.
pub fn dispatch_event(
    event: &DomainEvent,
    snapshot: &Snapshot,
    now: OffsetDateTime,
    config: &EngineConfig,
) -> Vec<Task> {
    let candidates = process_event(event, &snapshot.templates, &snapshot.providers, now, config);
    let tasks = deduplicate_tasks(&snapshot.tasks, candidates);
    info!(event = %event.kind(), count = tasks.len(), "dispatched event");
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use careops_core::{
        Case, CaseType, CaseUrgency, EventKind, ProviderRole, TaskBlueprint,
    };
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-06-01 10:00:00 UTC);

    fn intake_template() -> WorkflowTemplate {
        WorkflowTemplate::new("new_case_intake", EventKind::CaseCreated).with_blueprint(
            TaskBlueprint::new("Open chart review", "Review the new case details", 1)
                .with_role(ProviderRole::Nurse),
        )
    }

    fn staff() -> Vec<Provider> {
        vec![
            Provider::new("nurse-1", "Dana Ruiz", ProviderRole::Nurse),
            Provider::new("doc-1", "Ada Osei", ProviderRole::Physician),
        ]
    }

    #[test]
    fn test_urgent_case_gets_templates_plus_escalation() {
        let case = Case::new("Chest pain", CaseType::ClinicalConcern, CaseUrgency::Urgent, NOW)
            .with_patient("patient-1");
        let event = DomainEvent::case_created(case);

        let tasks = process_event(&event, &[intake_template()], &staff(), NOW, &EngineConfig::default());

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Open chart review");
        assert_eq!(tasks[1].title, "URGENT: Chest pain");
        assert_eq!(tasks[1].assigned_to.as_deref(), Some("doc-1"));
    }

    #[test]
    fn test_routine_case_gets_templates_only() {
        let case = Case::new("Refill", CaseType::MedicationRefill, CaseUrgency::Routine, NOW);
        let event = DomainEvent::case_created(case);

        let tasks = process_event(&event, &[intake_template()], &staff(), NOW, &EngineConfig::default());
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Open chart review");
    }

    #[test]
    fn test_dispatch_suppresses_redelivery() {
        let case = Case::new("Chest pain", CaseType::ClinicalConcern, CaseUrgency::Urgent, NOW)
            .with_patient("patient-1");
        let event = DomainEvent::case_created(case);
        let config = EngineConfig::default();

        let snapshot = Snapshot::new()
            .with_templates(vec![intake_template()])
            .with_providers(staff());
        let first = dispatch_event(&event, &snapshot, NOW, &config);
        assert_eq!(first.len(), 2);

        // The caller persisted the first batch; delivering the same event
        // against the updated snapshot produces nothing new.
        let snapshot = snapshot.with_tasks(first);
        let second = dispatch_event(&event, &snapshot, NOW, &config);
        assert!(second.is_empty());
    }

    #[test]
    fn test_dispatch_with_no_matching_templates() {
        let case = Case::new("Billing question", CaseType::Billing, CaseUrgency::Routine, NOW);
        let event = DomainEvent::case_created(case);
        let snapshot = Snapshot::new().with_providers(staff());

        let tasks = dispatch_event(&event, &snapshot, NOW, &EngineConfig::default());
        assert!(tasks.is_empty());
    }
}
