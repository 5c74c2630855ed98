//! Activity feed domain module.
//!
//! Activity observations come from an external collaborator. The backend only
//! depends on the [`ActivityFeed`] trait; [`SampleActivityFeed`] provides
//! deterministic data for UI prototypes.

mod feed;
mod model;

pub use feed::{ActivityFeed, SampleActivityFeed};
pub use model::ActivityEvent;
