//! Core domain types for the CareOps clinical-operations engine.
//!
//! This crate defines the entity snapshot the engine is invoked against:
//! tasks, cases, providers, prior authorizations, appointments, patients,
//! vital signs, care gaps, workflow templates, and the typed domain events
//! that drive task generation. All types are plain data; the engine never
//! caches them between calls, and persistence belongs to the caller.
//!
//! Statuses, roles, and kinds are closed enums so that adding a variant is
//! a compile-time-checked change at every match site. Instants use
//! [`time::OffsetDateTime`] serialized as RFC 3339; calendar dates use
//! [`time::Date`].

pub mod appointment;
pub mod authorization;
pub mod case;
pub mod error;
pub mod event;
pub mod gap;
pub mod id;
pub mod patient;
pub mod provider;
pub mod snapshot;
pub mod task;
pub mod time;
pub mod vitals;
pub mod workflow;

pub use appointment::{Appointment, AppointmentStatus};
pub use authorization::{AuthorizationStatus, PriorAuthorization};
pub use case::{Case, CaseType, CaseUrgency};
pub use error::{CoreError, Result};
pub use event::{DomainEvent, EventKind, FormSubmission, StatusChange};
pub use gap::{CareGap, GapKind, Severity};
pub use id::generate_id;
pub use patient::{Patient, Problem};
pub use provider::{Provider, ProviderRole};
pub use snapshot::Snapshot;
pub use task::{Task, TaskStatus};
pub use time::now_utc;
pub use vitals::VitalSigns;
pub use workflow::{TaskBlueprint, WorkflowTemplate};
