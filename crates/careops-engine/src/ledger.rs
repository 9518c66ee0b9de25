//! The consumable-unit ledger for prior authorizations.
//!
//! Units are consumed when a linked appointment is completed and
//! reconciled, never when it is booked. Consuming the final unit expires
//! the authorization; that is the only automatic status transition.
//! Consumption itself is a pure calculation; [`reconcile_appointment`]
//! wires it to the store with a guard on the unit count read from the
//! snapshot, so two reconciliations racing over the same authorization
//! cannot both commit.

use time::OffsetDateTime;
use tracing::{debug, warn};

use careops_core::{
    Appointment, AppointmentStatus, AuthorizationStatus, PriorAuthorization, Provider,
    ProviderRole, Task,
};
use careops_storage::{AuthorizationUpdate, CareStore, StoreError};

use crate::assign::by_role_or_first;

/// Title of the task raised when an authorization runs out of units.
pub const DEPLETION_TASK_TITLE: &str = "URGENT: Prior Authorization Units Depleted";
/// Provenance stamp for depletion tasks.
pub const AUTH_DEPLETION_PROVENANCE: &str = "auth_depletion";

/// Why units could not be consumed.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Prior authorization is not active")]
    NotActive,

    #[error("Requested {requested} units but only {remaining} remain")]
    UnitsExceeded { requested: u32, remaining: u32 },
}

/// Result of consuming units from an authorization.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitConsumption {
    /// The authorization with its consumed count advanced, expired when
    /// the last unit went.
    pub authorization: PriorAuthorization,
    /// Whether this consumption used the last remaining unit.
    pub depleted: bool,
}

/// Consumes `units` from an authorization, returning the updated record.
///
/// Consuming the final unit flips the status to expired. The input is left
/// untouched; the caller decides whether and how to persist the returned
/// record.
///
/// # Errors
///
/// Returns [`LedgerError::NotActive`] unless the authorization is active,
/// and [`LedgerError::UnitsExceeded`] when fewer units remain than were
/// requested.
pub fn consume_units(
    authorization: &PriorAuthorization,
    units: u32,
) -> Result<UnitConsumption, LedgerError> {
    if !authorization.is_active() {
        return Err(LedgerError::NotActive);
    }

    let remaining = authorization.remaining_units();
    if units > remaining {
        return Err(LedgerError::UnitsExceeded {
            requested: units,
            remaining,
        });
    }

    let mut updated = authorization.clone();
    updated.used_units += units;
    let depleted = updated.is_depleted();
    if depleted {
        updated.status = AuthorizationStatus::Expired;
    }

    debug!(
        auth_id = %updated.id,
        used = updated.used_units,
        total = updated.total_units,
        depleted,
        "consumed authorization units"
    );
    Ok(UnitConsumption {
        authorization: updated,
        depleted,
    })
}

/// Why an appointment could not be reconciled against its authorization.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Appointment not found")]
    AppointmentNotFound,

    #[error("Appointment must be completed to reconcile units")]
    AppointmentNotCompleted,

    #[error("Appointment has no linked prior authorization")]
    MissingAuthorizationLink,

    #[error("Prior authorization not found")]
    AuthorizationNotFound,

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of a successful reconciliation.
#[derive(Debug)]
pub struct Reconciliation {
    /// The authorization as stored after consumption.
    pub authorization: PriorAuthorization,
    /// The renewal task raised when the last unit was consumed.
    pub depletion_task: Option<Task>,
}

/// Consumes one unit for a completed appointment and persists the result.
///
/// The store update is guarded by the unit count read from the snapshot:
/// if another writer consumed units in between, the call fails with
/// [`StoreError::UnitsConflict`] and nothing is written. Consuming the
/// last unit expires the authorization and raises an immediately due
/// renewal task for billing. The task is created even when no billing
/// staff can be resolved, so depletion is never silently dropped.
///
/// # Errors
///
/// Precondition failures are reported in order: unknown appointment, not
/// completed, no linked authorization, unknown authorization, not active.
/// Store failures pass through transparently, and none of them leave a
/// partial write behind.
pub fn reconcile_appointment(
    appointment_id: &str,
    appointments: &[Appointment],
    authorizations: &[PriorAuthorization],
    providers: &[Provider],
    store: &mut dyn CareStore,
    now: OffsetDateTime,
) -> Result<Reconciliation, ReconcileError> {
    let appointment = appointments
        .iter()
        .find(|a| a.id == appointment_id)
        .ok_or(ReconcileError::AppointmentNotFound)?;

    if appointment.status != AppointmentStatus::Completed {
        return Err(ReconcileError::AppointmentNotCompleted);
    }

    let auth_id = appointment
        .linked_prior_auth_id
        .as_deref()
        .ok_or(ReconcileError::MissingAuthorizationLink)?;

    let authorization = authorizations
        .iter()
        .find(|a| a.id == auth_id)
        .ok_or(ReconcileError::AuthorizationNotFound)?;

    let consumption = consume_units(authorization, 1)?;
    let stored = store.update_authorization(AuthorizationUpdate::new(
        consumption.authorization,
        authorization.used_units,
    ))?;

    let depletion_task = if consumption.depleted {
        let mut task = Task::new(
            DEPLETION_TASK_TITLE,
            format!(
                "Authorization {} for {} has no units remaining. \
                 Request renewal before further visits are scheduled.",
                stored.auth_number, stored.service_name
            ),
            now,
            now,
        )
        .with_patient(&stored.patient_id)
        .with_provenance(AUTH_DEPLETION_PROVENANCE);

        match by_role_or_first(providers, Some(ProviderRole::Billing)) {
            Some(assignee) => task = task.with_assignee(&assignee.id),
            None => warn!(auth_id = %stored.id, "depletion task created unassigned, no active staff"),
        }
        store.insert_task(task.clone())?;
        Some(task)
    } else {
        None
    };

    debug!(
        appointment_id = %appointment_id,
        auth_id = %stored.id,
        remaining = stored.remaining_units(),
        "reconciled appointment against authorization"
    );
    Ok(Reconciliation {
        authorization: stored,
        depletion_task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use careops_storage::InMemoryStore;
    use time::macros::{date, datetime};

    const NOW: OffsetDateTime = datetime!(2024-06-01 10:00:00 UTC);

    fn active_auth(id: &str, total: u32, used: u32) -> PriorAuthorization {
        let mut auth = PriorAuthorization::new(
            "patient-1",
            "PA-2024-0042",
            "97110",
            "Physical therapy",
            total,
            date!(2024-05-01),
            date!(2024-08-01),
        )
        .with_status(AuthorizationStatus::Active);
        auth.id = id.to_string();
        auth.used_units = used;
        auth
    }

    fn completed_appointment(id: &str, auth_id: &str) -> Appointment {
        let mut appointment =
            Appointment::new("patient-1", "provider-1", datetime!(2024-05-30 09:00:00 UTC))
                .with_status(AppointmentStatus::Completed)
                .with_linked_auth(auth_id);
        appointment.id = id.to_string();
        appointment
    }

    fn billing_staff() -> Vec<Provider> {
        vec![Provider::new("bill-1", "Sam Okafor", ProviderRole::Billing)]
    }

    #[test]
    fn test_consume_units() {
        let auth = active_auth("auth-1", 12, 3);
        let consumption = consume_units(&auth, 2).unwrap();

        assert_eq!(consumption.authorization.used_units, 5);
        assert_eq!(consumption.authorization.status, AuthorizationStatus::Active);
        assert!(!consumption.depleted);
        // Input untouched.
        assert_eq!(auth.used_units, 3);
        assert!(consumption.authorization.validate().is_ok());
    }

    #[test]
    fn test_consume_last_unit_expires() {
        let auth = active_auth("auth-1", 12, 11);
        let consumption = consume_units(&auth, 1).unwrap();

        assert!(consumption.depleted);
        assert_eq!(consumption.authorization.remaining_units(), 0);
        assert_eq!(consumption.authorization.status, AuthorizationStatus::Expired);
    }

    #[test]
    fn test_consume_several_to_exact_total_expires() {
        let auth = active_auth("auth-1", 12, 8);
        let consumption = consume_units(&auth, 4).unwrap();
        assert_eq!(consumption.authorization.status, AuthorizationStatus::Expired);
        assert!(consumption.authorization.validate().is_ok());
    }

    #[test]
    fn test_consume_requires_active_status() {
        let auth = active_auth("auth-1", 12, 0).with_status(AuthorizationStatus::Pending);
        assert_eq!(consume_units(&auth, 1).unwrap_err(), LedgerError::NotActive);
    }

    #[test]
    fn test_consume_rejects_overdraw() {
        let auth = active_auth("auth-1", 12, 11);
        let err = consume_units(&auth, 2).unwrap_err();
        assert_eq!(
            err,
            LedgerError::UnitsExceeded {
                requested: 2,
                remaining: 1
            }
        );
        assert_eq!(err.to_string(), "Requested 2 units but only 1 remain");
    }

    #[test]
    fn test_reconcile_happy_path() {
        let auth = active_auth("auth-1", 12, 3);
        let appointments = vec![completed_appointment("appt-1", "auth-1")];
        let mut store = InMemoryStore::new().with_authorizations(vec![auth.clone()]);

        let outcome = reconcile_appointment(
            "appt-1",
            &appointments,
            &[auth],
            &billing_staff(),
            &mut store,
            NOW,
        )
        .unwrap();

        assert_eq!(outcome.authorization.used_units, 4);
        assert_eq!(outcome.authorization.status, AuthorizationStatus::Active);
        assert!(outcome.depletion_task.is_none());
        assert_eq!(store.authorization("auth-1").unwrap().used_units, 4);
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_reconcile_last_unit_expires_and_raises_task() {
        let auth = active_auth("auth-1", 2, 1);
        let appointments = vec![completed_appointment("appt-1", "auth-1")];
        let mut store = InMemoryStore::new().with_authorizations(vec![auth.clone()]);

        let outcome = reconcile_appointment(
            "appt-1",
            &appointments,
            &[auth],
            &billing_staff(),
            &mut store,
            NOW,
        )
        .unwrap();

        assert_eq!(outcome.authorization.status, AuthorizationStatus::Expired);
        assert_eq!(
            store.authorization("auth-1").unwrap().status,
            AuthorizationStatus::Expired
        );

        let task = outcome.depletion_task.unwrap();
        assert_eq!(task.title, DEPLETION_TASK_TITLE);
        assert_eq!(task.assigned_to.as_deref(), Some("bill-1"));
        assert_eq!(task.patient_id.as_deref(), Some("patient-1"));
        // Immediately due.
        assert_eq!(task.due_date, NOW);
        assert_eq!(task.created_by_workflow.as_deref(), Some(AUTH_DEPLETION_PROVENANCE));
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, task.id);
    }

    #[test]
    fn test_reconcile_depletion_task_survives_missing_staff() {
        let auth = active_auth("auth-1", 1, 0);
        let appointments = vec![completed_appointment("appt-1", "auth-1")];
        let mut store = InMemoryStore::new().with_authorizations(vec![auth.clone()]);

        let outcome =
            reconcile_appointment("appt-1", &appointments, &[auth], &[], &mut store, NOW).unwrap();

        let task = outcome.depletion_task.unwrap();
        assert!(task.assigned_to.is_none());
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn test_reconcile_precondition_order() {
        let auth = active_auth("auth-1", 12, 3);
        let mut store = InMemoryStore::new().with_authorizations(vec![auth.clone()]);

        let err =
            reconcile_appointment("ghost", &[], &[auth.clone()], &[], &mut store, NOW).unwrap_err();
        assert!(matches!(err, ReconcileError::AppointmentNotFound));

        let scheduled = {
            let mut a = completed_appointment("appt-1", "auth-1");
            a.status = AppointmentStatus::Scheduled;
            a
        };
        let err = reconcile_appointment("appt-1", &[scheduled], &[auth.clone()], &[], &mut store, NOW)
            .unwrap_err();
        assert!(matches!(err, ReconcileError::AppointmentNotCompleted));
        assert_eq!(err.to_string(), "Appointment must be completed to reconcile units");
        // Nothing was written for the failed attempt.
        assert_eq!(store.authorization("auth-1").unwrap().used_units, 3);

        let unlinked = {
            let mut a = completed_appointment("appt-1", "auth-1");
            a.linked_prior_auth_id = None;
            a
        };
        let err = reconcile_appointment("appt-1", &[unlinked], &[auth.clone()], &[], &mut store, NOW)
            .unwrap_err();
        assert!(matches!(err, ReconcileError::MissingAuthorizationLink));

        let appointments = vec![completed_appointment("appt-1", "auth-missing")];
        let err = reconcile_appointment("appt-1", &appointments, &[auth.clone()], &[], &mut store, NOW)
            .unwrap_err();
        assert!(matches!(err, ReconcileError::AuthorizationNotFound));

        let inactive = auth.with_status(AuthorizationStatus::Denied);
        let appointments = vec![completed_appointment("appt-1", "auth-1")];
        let err = reconcile_appointment("appt-1", &appointments, &[inactive], &[], &mut store, NOW)
            .unwrap_err();
        assert!(matches!(err, ReconcileError::Ledger(LedgerError::NotActive)));
    }

    #[test]
    fn test_reconcile_stale_snapshot_conflicts() {
        // Snapshot says 3 used, but the store has moved on to 4.
        let snapshot_auth = active_auth("auth-1", 12, 3);
        let appointments = vec![completed_appointment("appt-1", "auth-1")];
        let mut store = InMemoryStore::new().with_authorizations(vec![active_auth("auth-1", 12, 4)]);

        let err = reconcile_appointment(
            "appt-1",
            &appointments,
            &[snapshot_auth],
            &billing_staff(),
            &mut store,
            NOW,
        )
        .unwrap_err();

        match err {
            ReconcileError::Store(store_err) => assert!(store_err.is_units_conflict()),
            other => panic!("unexpected error: {other:?}"),
        }
        // Nothing was written.
        assert_eq!(store.authorization("auth-1").unwrap().used_units, 4);
        assert!(store.tasks().is_empty());
    }
}
