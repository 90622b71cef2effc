//! Session model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The currently logged-in identity
///
/// Mirrored into the local store as `{"userId", "email", "token"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque user id generated at login
    #[serde(alias = "id")]
    pub user_id: String,
    /// Login identifier
    pub email: String,
    /// Opaque session token; carries no cryptographic meaning
    pub token: String,
}

impl Session {
    /// Create a session with a fresh user id and token
    pub fn new(email: impl Into<String>) -> Self {
        let id = Uuid::new_v4().simple().to_string();
        let token = Uuid::new_v4().simple().to_string();
        Self {
            user_id: format!("user-{}", &id[..8]),
            email: email.into(),
            token: format!("mock-jwt-token-{}", token),
        }
    }
}
