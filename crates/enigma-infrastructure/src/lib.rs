//! Infrastructure layer for Copilot Enigma.
//!
//! Filesystem concerns: platform paths and the settings store.

pub mod paths;
pub mod settings_store;
pub mod storage;

pub use crate::paths::EnigmaPaths;
pub use crate::settings_store::SettingsStore;
