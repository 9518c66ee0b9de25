//! Decision logic for clinical operations automation.
//!
//! The engine turns practice events and state snapshots into follow-up
//! tasks, confirmation payloads, and alerts. It owns no storage and runs
//! no I/O of its own; every effect goes through the caller's
//! [`careops_storage::CareStore`] or comes back as plain data.
//!
//! - [`dispatch`]: event entry point, template expansion plus rules
//! - [`rules`]: urgent-case escalation and authorization watches
//! - [`ledger`]: unit consumption and appointment reconciliation
//! - [`confirm`]: confirmation scheduling and SMS reply handling
//! - [`analysis`]: care-gap and vital-sign checks
//! - [`dedup`]: duplicate suppression before persistence
//! - [`config`]: tunable thresholds for all of the above
//!
//! Rule functions take an explicit `now` so behavior is reproducible; use
//! [`careops_core::now_utc`] at the call boundary.

pub mod analysis;
pub mod assign;
pub mod config;
pub mod confirm;
pub mod dedup;
pub mod dispatch;
pub mod ledger;
pub mod rules;
pub mod workflow;

pub use analysis::{check_care_gaps, check_vital_alerts, VitalAlert, VitalAlertKind};
pub use config::{ConfigError, EngineConfig, VitalThresholds};
pub use confirm::{
    apply_sms_reply, due_confirmations, mark_confirmation_sent, ConfirmationRequest, SmsReceipt,
    SmsReply,
};
pub use dedup::deduplicate_tasks;
pub use dispatch::{dispatch_event, process_event};
pub use ledger::{
    consume_units, reconcile_appointment, LedgerError, ReconcileError, Reconciliation,
    UnitConsumption, DEPLETION_TASK_TITLE,
};
pub use rules::{
    check_expiring_authorizations, check_low_units_authorizations, create_urgent_case_task,
    process_new_case,
};
pub use workflow::expand;
