//! Dashboard overview model.

use serde::{Deserialize, Serialize};

use crate::activity::ActivityEvent;
use crate::connection::ConnectionStatus;

/// Quick insights about the desktop copilot's health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    /// Settings file location; empty when running with an in-memory store.
    pub settings_path: String,
    pub desktop_capture_enabled: bool,
    pub activity_logging: bool,
    pub background_automation_enabled: bool,
    pub active_language: String,
    pub last_refresh: String,
    pub activity_sample: Vec<ActivityEvent>,
    pub connection_status: ConnectionStatus,
}
