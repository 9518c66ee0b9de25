//! Duplicate suppression for generated tasks.

use std::collections::HashSet;

use time::OffsetDateTime;
use tracing::debug;

use careops_core::Task;

/// Drops candidates that duplicate an open existing task.
///
/// Two tasks are duplicates when they agree on (title, patient, due date).
/// Done tasks never block a candidate: finished work may legitimately be
/// regenerated. This filter is the only defense against the same rule
/// firing twice over a stale snapshot, so callers must run it before
/// persisting anything.
pub fn deduplicate_tasks(existing: &[Task], candidates: Vec<Task>) -> Vec<Task> {
    let open_keys: HashSet<(&str, Option<&str>, OffsetDateTime)> = existing
        .iter()
        .filter(|task| task.is_open())
        .map(|task| (task.title.as_str(), task.patient_id.as_deref(), task.due_date))
        .collect();

    let before = candidates.len();
    let kept: Vec<Task> = candidates
        .into_iter()
        .filter(|task| {
            !open_keys.contains(&(task.title.as_str(), task.patient_id.as_deref(), task.due_date))
        })
        .collect();

    if kept.len() < before {
        debug!(dropped = before - kept.len(), kept = kept.len(), "suppressed duplicate tasks");
    }
    kept
}
