//! Local authentication session.
//!
//! `SessionCoordinator` owns the in-memory authentication flag and the last
//! login time. It never owns settings: the caller passes the authoritative
//! [`Settings`] by reference so the profile is always a fresh view of them.

use chrono::{SecondsFormat, Utc};
use enigma_core::user::{LoginRequest, SessionState, derive_profile};
use enigma_core::{EnigmaError, Result, Settings};

/// Two-state session machine: unauthenticated (initial) and authenticated.
///
/// ```text
/// Unauthenticated --login(valid)--> Authenticated --logout--> Unauthenticated
/// login(invalid) leaves the state untouched and returns a Validation error.
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionCoordinator {
    authenticated: bool,
    last_login: Option<String>,
}

impl SessionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Returns the current session with a profile recomputed from `settings`.
    pub fn session(&self, settings: &Settings) -> SessionState {
        SessionState {
            authenticated: self.authenticated,
            profile: derive_profile(settings, self.authenticated, self.last_login.as_deref()),
        }
    }

    /// Starts a local session.
    ///
    /// Writes the username (and email, if given) into the identity fields of
    /// `settings`. Persisting that change is left to the caller.
    pub fn login(&mut self, settings: &mut Settings, request: LoginRequest) -> Result<SessionState> {
        let username = request.username.trim();
        let password = request.password.trim();

        if username.is_empty() || password.is_empty() {
            return Err(EnigmaError::validation("username and password are required"));
        }

        let email = request.email.trim();
        if !email.is_empty() {
            settings.account_email = email.to_string();
        }
        settings.display_name = username.to_string();

        self.authenticated = true;
        self.last_login = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true));

        tracing::info!(user = %username, "[SessionCoordinator] Logged in");
        Ok(self.session(settings))
    }

    /// Ends the session. The last login time is kept for display.
    pub fn logout(&mut self, settings: &Settings) -> SessionState {
        if self.authenticated {
            tracing::info!("[SessionCoordinator] Logged out");
        }
        self.authenticated = false;
        self.session(settings)
    }
}
