//! Settings domain model.
//!
//! The single configuration record the desktop app persists. It governs the
//! LLM connection, presentation, and feature flags.

use serde::{Deserialize, Serialize};

/// Default OpenAI compatible API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default UI language code.
pub const DEFAULT_LANGUAGE: &str = "en";
/// Default request timeout for connection probes, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: i32 = 15;
/// Default number of probe attempts.
pub const DEFAULT_MAX_RETRIES: i32 = 1;
/// Default browser used by background automation.
pub const DEFAULT_AUTOMATION_BROWSER: &str = "chrome";

/// Settings record persisted as `settings.json`.
///
/// Keys are camelCase on disk. A key missing from the file takes the value
/// from [`Settings::default`], so older files keep loading as fields are added.
/// Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    // --- Connection ---
    /// Base URL of the OpenAI compatible API, e.g. `https://api.openai.com/v1`.
    pub api_base_url: String,
    pub api_key: String,
    pub model: String,
    pub organization: String,
    /// Vendor hint forwarded as `X-LLM-Vendor` when non-empty.
    pub preferred_llm_vendor: String,
    /// Per-request timeout; zero or negative falls back to the 15 second default.
    pub request_timeout_seconds: i32,
    /// Number of probe attempts; values below 1 are treated as 1.
    pub max_retries: i32,
    /// Proxy URL applied to probe traffic when non-empty.
    pub network_proxy: String,
    /// Disables TLS certificate verification for probe traffic.
    pub allow_untrusted_certs: bool,

    // --- Presentation ---
    pub language: String,
    pub display_name: String,
    pub account_email: String,
    pub avatar_url: String,
    /// Inline avatar image (usually a data URL).
    pub avatar_data: String,

    // --- Feature flags ---
    pub desktop_capture_enabled: bool,
    pub activity_logging: bool,
    pub background_automation_enabled: bool,
    pub automation_browser: String,
    pub browser_profile_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            organization: String::new(),
            preferred_llm_vendor: String::new(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            network_proxy: String::new(),
            allow_untrusted_certs: false,
            language: DEFAULT_LANGUAGE.to_string(),
            display_name: String::new(),
            account_email: String::new(),
            avatar_url: String::new(),
            avatar_data: String::new(),
            desktop_capture_enabled: false,
            activity_logging: true,
            background_automation_enabled: false,
            automation_browser: DEFAULT_AUTOMATION_BROWSER.to_string(),
            browser_profile_path: String::new(),
        }
    }
}

impl Settings {
    /// Returns true if any profile-identifying field is set.
    pub fn has_identity(&self) -> bool {
        !self.display_name.is_empty()
            || !self.account_email.is_empty()
            || !self.avatar_url.is_empty()
            || !self.avatar_data.is_empty()
    }
}
