//! Connection probe result model.

use serde::{Deserialize, Serialize};

/// Result of probing an LLM server.
///
/// Unreachable or unhealthy servers are reported here with `healthy: false`
/// rather than as an error, so the GUI can render the message directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub healthy: bool,
    pub message: String,
}

impl ConnectionStatus {
    pub fn healthy(message: impl Into<String>) -> Self {
        Self {
            healthy: true,
            message: message.into(),
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            healthy: false,
            message: message.into(),
        }
    }
}
