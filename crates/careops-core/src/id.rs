//! Identifier generation for engine-created records.

use uuid::Uuid;

/// Generates a new unique identifier.
///
/// Identifiers are random UUIDs rendered in hyphenated lowercase form, which
/// keeps them safe to embed in JSON payloads and log lines without escaping.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
