//! Storage port for the CareOps engine.
//!
//! The engine writes through the [`CareStore`] trait and never touches a
//! concrete store directly. This crate provides:
//!
//! - [`CareStore`]: the write-side port the engine requires
//! - [`AppointmentPatch`] and [`AuthorizationUpdate`]: the write payloads
//! - [`InMemoryStore`]: a `HashMap`-backed store for tests and embedding
//! - [`StoreError`]: failures shared by every backend

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{ErrorCategory, StoreError};
pub use memory::InMemoryStore;
pub use traits::CareStore;
pub use types::{AppointmentPatch, AuthorizationUpdate};
