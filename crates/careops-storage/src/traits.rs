//! The write-side port the engine requires from a store.

use careops_core::{Appointment, PriorAuthorization, Task};

use crate::error::StoreError;
use crate::types::{AppointmentPatch, AuthorizationUpdate};

/// Write operations the engine performs against practice state.
///
/// Implementations are expected to apply each call atomically. The engine
/// itself is synchronous; a backend wrapping an async datastore should block
/// internally rather than leak its executor into rule code.
pub trait CareStore {
    /// Applies a targeted change to one appointment and returns the updated
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the appointment does not exist,
    /// [`StoreError::AlreadySent`] when a confirmation stamp is already
    /// present, and [`StoreError::InvalidTransition`] when the requested
    /// status change is not allowed from the current status.
    fn patch_appointment(
        &mut self,
        id: &str,
        patch: AppointmentPatch,
    ) -> Result<Appointment, StoreError>;

    /// Replaces one authorization, guarded by the unit count the caller
    /// observed, and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the authorization does not
    /// exist and [`StoreError::UnitsConflict`] when the stored `used_units`
    /// no longer matches the update's expectation.
    fn update_authorization(
        &mut self,
        update: AuthorizationUpdate,
    ) -> Result<PriorAuthorization, StoreError>;

    /// Persists a newly created task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Internal`] when the backend cannot accept the
    /// write.
    fn insert_task(&mut self, task: Task) -> Result<(), StoreError>;
}
