//! Application layer for Copilot Enigma.
//!
//! This crate wires the domain, infrastructure, and interaction layers into
//! the facade the GUI calls.

pub mod app;
pub mod session_coordinator;

pub use app::EnigmaApp;
pub use session_coordinator::SessionCoordinator;
