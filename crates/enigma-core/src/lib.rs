//! Domain layer for Copilot Enigma.
//!
//! Holds the plain data models shared by every other crate, the shared
//! error type, and the seams to external collaborators.

pub mod activity;
pub mod connection;
pub mod error;
pub mod overview;
pub mod settings;
pub mod user;

// Re-export common types
pub use connection::ConnectionStatus;
pub use error::{EnigmaError, Result};
pub use settings::Settings;
