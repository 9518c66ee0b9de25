//! Built-in task rules that run alongside workflow templates.
//!
//! Rules cover the cases templates cannot express: urgency escalation on
//! new cases, missing-authorization checks, and the periodic authorization
//! watches. Each rule is a pure function of practice state and `now`; the
//! caller owns persistence and duplicate suppression.

use time::OffsetDateTime;
use tracing::{debug, warn};

use careops_core::time::{days_from, days_until_date, end_of_day_utc, hours_from};
use careops_core::{Case, CaseType, PriorAuthorization, Provider, ProviderRole, Task};

use crate::assign::{by_role_or_first, escalation_assignee};
use crate::config::EngineConfig;

/// Provenance stamp for urgent-case escalation tasks.
pub const URGENT_CASE_PROVENANCE: &str = "urgent_case_escalation";
/// Provenance stamp for missing-authorization check tasks.
pub const PRIOR_AUTH_CHECK_PROVENANCE: &str = "prior_auth_check";
/// Provenance stamp for expiration watch tasks.
pub const AUTH_EXPIRATION_PROVENANCE: &str = "auth_expiration_watch";
/// Provenance stamp for low-unit watch tasks.
pub const AUTH_LOW_UNITS_PROVENANCE: &str = "auth_low_units_watch";

/// Builds the escalation task for an urgent case.
///
/// Returns `None` for routine cases, and for urgent cases when no active
/// provider exists to take the work.
pub fn create_urgent_case_task(
    case: &Case,
    providers: &[Provider],
    now: OffsetDateTime,
    config: &EngineConfig,
) -> Option<Task> {
    if !case.is_urgent() {
        return None;
    }

    let Some(assignee) = escalation_assignee(case, providers) else {
        warn!(case_id = %case.id, "urgent case has no active provider to escalate to");
        return None;
    };

    let mut task = Task::new(
        format!("URGENT: {}", case.title),
        format!(
            "Urgent case requires review within {} hours.",
            config.urgent_due_hours
        ),
        hours_from(now, config.urgent_due_hours),
        now,
    )
    .with_case(&case.id)
    .with_assignee(&assignee.id)
    .with_provenance(URGENT_CASE_PROVENANCE);

    if let Some(patient_id) = &case.patient_id {
        task = task.with_patient(patient_id);
    }
    Some(task)
}

fn has_active_authorization(patient_id: &str, authorizations: &[PriorAuthorization]) -> bool {
    authorizations
        .iter()
        .any(|auth| auth.is_active() && auth.patient_id == patient_id)
}

/// Runs the new-case rules.
///
/// An urgent case defers entirely to the escalation rule. Routine clinical
/// concerns get a coverage check when the patient has no active prior
/// authorization on file.
pub fn process_new_case(
    case: &Case,
    authorizations: &[PriorAuthorization],
    providers: &[Provider],
    now: OffsetDateTime,
    config: &EngineConfig,
) -> Vec<Task> {
    if case.is_urgent() {
        return create_urgent_case_task(case, providers, now, config)
            .into_iter()
            .collect();
    }

    let mut tasks = Vec::new();
    if case.case_type == CaseType::ClinicalConcern {
        if let Some(patient_id) = &case.patient_id {
            if !has_active_authorization(patient_id, authorizations) {
                if let Some(assignee) = by_role_or_first(providers, Some(ProviderRole::Billing)) {
                    tasks.push(
                        Task::new(
                            "Prior Authorization Check Required",
                            "No active prior authorization on file for this patient. \
                             Verify coverage before services are scheduled.",
                            hours_from(now, config.auth_check_due_hours),
                            now,
                        )
                        .with_case(&case.id)
                        .with_patient(patient_id)
                        .with_assignee(&assignee.id)
                        .with_provenance(PRIOR_AUTH_CHECK_PROVENANCE),
                    );
                } else {
                    warn!(case_id = %case.id, "no active provider for authorization check");
                }
            }
        }
    }

    debug!(case_id = %case.id, count = tasks.len(), "ran new-case rules");
    tasks
}

/// Finds active authorizations ending inside the configured window and
/// builds one reminder task per authorization.
///
/// The window is inclusive on both ends: an authorization ending today is
/// in, one that ended yesterday is out. Tasks are due at the end of the
/// authorization's last valid day.
pub fn check_expiring_authorizations(
    authorizations: &[PriorAuthorization],
    providers: &[Provider],
    now: OffsetDateTime,
    config: &EngineConfig,
) -> Vec<Task> {
    let Some(assignee) = by_role_or_first(providers, Some(ProviderRole::Billing)) else {
        warn!("no active provider for authorization expiration watch");
        return Vec::new();
    };

    let today = now.date();
    let mut tasks = Vec::new();

    for auth in authorizations.iter().filter(|a| a.is_active()) {
        let days_left = days_until_date(today, auth.end_date);
        if days_left < 0 || days_left > config.expiring_auth_window_days {
            continue;
        }

        let timing = match days_left {
            0 => "expires today".to_string(),
            1 => "expires in 1 day".to_string(),
            n => format!("expires in {n} days"),
        };
        tasks.push(
            Task::new(
                format!("Prior Authorization Expiring: {}", auth.service_name),
                format!(
                    "Authorization {} for {} {}. Request renewal if continued care is planned.",
                    auth.auth_number, auth.service_name, timing
                ),
                end_of_day_utc(auth.end_date),
                now,
            )
            .with_patient(&auth.patient_id)
            .with_assignee(&assignee.id)
            .with_provenance(AUTH_EXPIRATION_PROVENANCE),
        );
    }

    debug!(count = tasks.len(), "authorization expiration watch complete");
    tasks
}

/// Finds active authorizations running low on units and builds one reminder
/// task per authorization.
///
/// Fully depleted authorizations are excluded here; depletion is handled at
/// reconciliation time, where it escalates instead of reminding.
pub fn check_low_units_authorizations(
    authorizations: &[PriorAuthorization],
    providers: &[Provider],
    now: OffsetDateTime,
    config: &EngineConfig,
) -> Vec<Task> {
    if config.low_units_threshold == 0 {
        return Vec::new();
    }
    let Some(assignee) = by_role_or_first(providers, Some(ProviderRole::Billing)) else {
        warn!("no active provider for low-unit watch");
        return Vec::new();
    };

    let mut tasks = Vec::new();
    for auth in authorizations.iter().filter(|a| a.is_active()) {
        let remaining = auth.remaining_units();
        if remaining == 0 || remaining > config.low_units_threshold {
            continue;
        }
        tasks.push(
            Task::new(
                format!("Prior Authorization Units Low: {}", auth.service_name),
                format!(
                    "Authorization {} has {} of {} units remaining.",
                    auth.auth_number, remaining, auth.total_units
                ),
                days_from(now, config.low_units_due_days),
                now,
            )
            .with_patient(&auth.patient_id)
            .with_assignee(&assignee.id)
            .with_provenance(AUTH_LOW_UNITS_PROVENANCE),
        );
    }

    debug!(count = tasks.len(), "low-unit watch complete");
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use careops_core::{AuthorizationStatus, CaseUrgency};
    use time::macros::{date, datetime};

    const NOW: OffsetDateTime = datetime!(2024-06-01 10:00:00 UTC);

    fn staff() -> Vec<Provider> {
        vec![
            Provider::new("doc-1", "Ada Osei", ProviderRole::Physician),
            Provider::new("bill-1", "Sam Okafor", ProviderRole::Billing),
        ]
    }

    fn active_auth(patient: &str, end_date: time::Date) -> PriorAuthorization {
        PriorAuthorization::new(
            patient,
            "PA-2024-0042",
            "97110",
            "Physical therapy",
            12,
            date!(2024-05-01),
            end_date,
        )
        .with_status(AuthorizationStatus::Active)
    }

    #[test]
    fn test_urgent_case_task() {
        let case = Case::new("Chest pain callback", CaseType::ClinicalConcern, CaseUrgency::Urgent, NOW)
            .with_patient("patient-1");
        let config = EngineConfig::default();

        let task = create_urgent_case_task(&case, &staff(), NOW, &config).unwrap();
        assert_eq!(task.title, "URGENT: Chest pain callback");
        assert_eq!(task.due_date, datetime!(2024-06-02 10:00:00 UTC));
        assert_eq!(task.assigned_to.as_deref(), Some("doc-1"));
        assert_eq!(task.case_id.as_deref(), Some(case.id.as_str()));
        assert_eq!(task.patient_id.as_deref(), Some("patient-1"));
        assert_eq!(task.created_by_workflow.as_deref(), Some(URGENT_CASE_PROVENANCE));
    }

    #[test]
    fn test_routine_case_does_not_escalate() {
        let case = Case::new("Refill", CaseType::MedicationRefill, CaseUrgency::Routine, NOW);
        assert!(create_urgent_case_task(&case, &staff(), NOW, &EngineConfig::default()).is_none());
    }

    #[test]
    fn test_urgent_case_without_staff() {
        let case = Case::new("Chest pain", CaseType::ClinicalConcern, CaseUrgency::Urgent, NOW);
        assert!(create_urgent_case_task(&case, &[], NOW, &EngineConfig::default()).is_none());
    }

    #[test]
    fn test_new_case_needs_auth_check() {
        let case = Case::new("Knee evaluation", CaseType::ClinicalConcern, CaseUrgency::Routine, NOW)
            .with_patient("patient-1");
        let config = EngineConfig::default();

        let tasks = process_new_case(&case, &[], &staff(), NOW, &config);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Prior Authorization Check Required");
        assert_eq!(tasks[0].due_date, datetime!(2024-06-03 10:00:00 UTC));
        assert_eq!(tasks[0].assigned_to.as_deref(), Some("bill-1"));
        assert_eq!(
            tasks[0].created_by_workflow.as_deref(),
            Some(PRIOR_AUTH_CHECK_PROVENANCE)
        );
    }

    #[test]
    fn test_new_case_with_active_auth_skips_check() {
        let case = Case::new("Knee evaluation", CaseType::ClinicalConcern, CaseUrgency::Routine, NOW)
            .with_patient("patient-1");
        let auths = vec![active_auth("patient-1", date!(2024-08-01))];

        let tasks = process_new_case(&case, &auths, &staff(), NOW, &EngineConfig::default());
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_new_case_auth_check_ignores_other_patients_auth() {
        let case = Case::new("Knee evaluation", CaseType::ClinicalConcern, CaseUrgency::Routine, NOW)
            .with_patient("patient-1");
        let auths = vec![active_auth("patient-2", date!(2024-08-01))];

        let tasks = process_new_case(&case, &auths, &staff(), NOW, &EngineConfig::default());
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_urgent_case_defers_to_escalation_rule() {
        let case = Case::new("Chest pain", CaseType::ClinicalConcern, CaseUrgency::Urgent, NOW)
            .with_patient("patient-1");

        // Urgent wins outright, no coverage check on top.
        let tasks = process_new_case(&case, &[], &staff(), NOW, &EngineConfig::default());
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].title.starts_with("URGENT:"));
    }

    #[test]
    fn test_non_clinical_case_never_gets_auth_check() {
        let case = Case::new("Billing question", CaseType::Billing, CaseUrgency::Routine, NOW)
            .with_patient("patient-1");
        let tasks = process_new_case(&case, &[], &staff(), NOW, &EngineConfig::default());
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_expiring_window_boundaries() {
        let config = EngineConfig::default();
        let auths = vec![
            active_auth("patient-1", date!(2024-06-01)),
            active_auth("patient-2", date!(2024-07-01)),
            active_auth("patient-3", date!(2024-07-02)),
            active_auth("patient-4", date!(2024-05-31)),
        ];

        let tasks = check_expiring_authorizations(&auths, &staff(), NOW, &config);
        let patients: Vec<_> = tasks.iter().filter_map(|t| t.patient_id.as_deref()).collect();

        // Ends today and ends on day 30 are in; day 31 and yesterday are out.
        assert_eq!(patients, vec!["patient-1", "patient-2"]);
        assert!(tasks[0].description.contains("expires today"));
        assert!(tasks[1].description.contains("expires in 30 days"));
        assert_eq!(tasks[0].due_date, datetime!(2024-06-01 23:59:59 UTC));
        assert_eq!(tasks[1].due_date, datetime!(2024-07-01 23:59:59 UTC));
    }

    #[test]
    fn test_expiring_skips_inactive() {
        let auths = vec![
            active_auth("patient-1", date!(2024-06-10)).with_status(AuthorizationStatus::Expired),
            active_auth("patient-2", date!(2024-06-10)).with_status(AuthorizationStatus::Pending),
        ];
        let tasks = check_expiring_authorizations(&auths, &staff(), NOW, &EngineConfig::default());
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_expiring_singular_day_text() {
        let auths = vec![active_auth("patient-1", date!(2024-06-02))];
        let tasks = check_expiring_authorizations(&auths, &staff(), NOW, &EngineConfig::default());
        assert!(tasks[0].description.contains("expires in 1 day."));
    }

    #[test]
    fn test_low_units_watch() {
        let config = EngineConfig::default();
        let mut at_threshold = active_auth("patient-1", date!(2024-12-01));
        at_threshold.used_units = 9; // 3 remaining
        let mut above = active_auth("patient-2", date!(2024-12-01));
        above.used_units = 8; // 4 remaining
        let mut depleted = active_auth("patient-3", date!(2024-12-01));
        depleted.used_units = 12;

        let tasks =
            check_low_units_authorizations(&[at_threshold, above, depleted], &staff(), NOW, &config);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].patient_id.as_deref(), Some("patient-1"));
        assert!(tasks[0].description.contains("3 of 12 units remaining"));
        assert_eq!(tasks[0].due_date, datetime!(2024-06-08 10:00:00 UTC));
        assert_eq!(tasks[0].assigned_to.as_deref(), Some("bill-1"));
    }

    #[test]
    fn test_low_units_watch_disabled_by_zero_threshold() {
        let mut config = EngineConfig::default();
        config.low_units_threshold = 0;
        let mut auth = active_auth("patient-1", date!(2024-12-01));
        auth.used_units = 11;

        let tasks = check_low_units_authorizations(&[auth], &staff(), NOW, &config);
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_watches_require_staff() {
        let auths = vec![active_auth("patient-1", date!(2024-06-10))];
        assert!(check_expiring_authorizations(&auths, &[], NOW, &EngineConfig::default()).is_empty());
        assert!(check_low_units_authorizations(&auths, &[], NOW, &EngineConfig::default()).is_empty());
    }
}
