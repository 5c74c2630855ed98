//! Settings domain module.
//!
//! # Module Structure
//!
//! - `model`: The persisted [`Settings`] record and its defaults

mod model;

pub use model::{
    DEFAULT_API_BASE_URL, DEFAULT_AUTOMATION_BROWSER, DEFAULT_LANGUAGE, DEFAULT_MAX_RETRIES,
    DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS, Settings,
};
