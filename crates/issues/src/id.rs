//! Issue identifier generation.

use uuid::Uuid;

/// Generate a fresh `_id`: 32 lowercase hex characters from a random v4 UUID.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}
