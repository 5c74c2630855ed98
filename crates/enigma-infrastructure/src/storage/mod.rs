//! Storage layer for atomic file operations.

mod atomic_json;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub(crate) use atomic_json::create_private_dir_all;
