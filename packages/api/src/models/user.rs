//! # Signed-in user record
//!
//! [`UserRecord`] is what `POST /auth/login` returns next to the token. The
//! client only relies on `id` (sent as `user_id` when creating notes) and
//! `email` (shown on the profile screen). Every other field the server sends
//! is kept in [`UserRecord::extra`] so the copy persisted on device stays
//! JSON-equal to the server's.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ResourceId;

/// User information returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: ResourceId,
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    pub fn new(id: impl Into<ResourceId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            extra: Map::new(),
        }
    }

    /// Get display name, falling back to "Guest" if no email is set.
    pub fn display_name(&self) -> &str {
        if self.email.is_empty() {
            "Guest"
        } else {
            &self.email
        }
    }
}
