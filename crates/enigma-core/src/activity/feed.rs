use chrono::{DateTime, Duration, SecondsFormat, Utc};

use super::model::ActivityEvent;

/// Source of recent desktop activity.
///
/// Implementations must be a pure function of `now` from the caller's point
/// of view: the backend never caches or mutates the returned events.
pub trait ActivityFeed: Send + Sync {
    /// Returns the most recent activity events relative to `now`.
    fn recent(&self, now: DateTime<Utc>) -> Vec<ActivityEvent>;
}

/// Deterministic feed suitable for UI prototypes.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use enigma_core::activity::{ActivityFeed, SampleActivityFeed};
///
/// let events = SampleActivityFeed.recent(Utc::now());
/// assert_eq!(events.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleActivityFeed;

impl ActivityFeed for SampleActivityFeed {
    fn recent(&self, now: DateTime<Utc>) -> Vec<ActivityEvent> {
        let at = |minutes: i64| {
            (now - Duration::minutes(minutes)).to_rfc3339_opts(SecondsFormat::Nanos, true)
        };

        vec![
            ActivityEvent {
                id: "evt-001".to_string(),
                category: "Research".to_string(),
                description: "Visited project documentation and reviewed integration notes."
                    .to_string(),
                timestamp: at(10),
                confidence: 0.92,
            },
            ActivityEvent {
                id: "evt-002".to_string(),
                category: "Coding".to_string(),
                description: "Edited frontend settings form and saved configuration.".to_string(),
                timestamp: at(25),
                confidence: 0.88,
            },
            ActivityEvent {
                id: "evt-003".to_string(),
                category: "Communication".to_string(),
                description: "Composed status update email to product stakeholders.".to_string(),
                timestamp: at(55),
                confidence: 0.79,
            },
        ]
    }
}
