use serde::{Deserialize, Serialize};

/// A single desktop activity observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: String,
    pub category: String,
    pub description: String,
    /// RFC 3339 timestamp of the observation.
    pub timestamp: String,
    /// Classifier confidence in `0.0..=1.0`.
    pub confidence: f64,
}
