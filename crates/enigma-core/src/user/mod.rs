//! User domain module.
//!
//! This module contains the account profile and session models, plus the
//! derivation that turns stored settings into a display profile.
//!
//! # Module Structure
//!
//! - `model`: Session, profile, and login request models
//! - `profile`: Pure profile derivation from settings
//!
//! # Usage
//!
//! ```ignore
//! use enigma_core::user::{AccountProfile, SessionState, derive_profile};
//! ```

mod model;
mod profile;

// Re-export public API
pub use model::{AccountProfile, LoginRequest, SessionState};
pub use profile::derive_profile;
