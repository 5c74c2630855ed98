//! Session and account profile domain models.

use serde::{Deserialize, Serialize};

/// Display information for the currently relevant account.
///
/// Never persisted on its own; always derived from
/// [`Settings`](crate::settings::Settings) plus the last login timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub avatar_data: String,
    /// RFC 3339 timestamp of the most recent login, empty if none recorded.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_login: String,
}

/// Authentication status of the desktop app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<AccountProfile>,
}

/// Credentials used to start a local session.
///
/// Only presence is validated; there is no identity provider behind it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: String::new(),
            password: password.into(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}
