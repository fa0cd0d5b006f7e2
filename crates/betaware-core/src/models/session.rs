//! Logged-in session model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::User;

/// Token used for sessions created without reaching the API
pub const OFFLINE_TOKEN: &str = "offline-token";

/// Role assigned to offline sessions
pub const DEFAULT_ROLE: &str = "USER";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    #[serde(rename = "nome", default)]
    pub full_name: String,
    #[serde(rename = "perfil", default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

impl Session {
    /// Session synthesized from a locally mirrored user
    #[must_use]
    pub fn offline(user: &User) -> Self {
        Self {
            token: OFFLINE_TOKEN.to_string(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            role: DEFAULT_ROLE.to_string(),
        }
    }

    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.token == OFFLINE_TOKEN
    }

    /// First word of the full name, falling back to the username
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(self.username.as_str())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .finish()
    }
}
