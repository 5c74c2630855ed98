//! Error types for the Enigma backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Enigma backend.
///
/// Variants are plain data so that an error can be handed to the GUI as-is.
/// Network and health failures are *not* represented here: those are reported
/// as an unhealthy [`ConnectionStatus`](crate::connection::ConnectionStatus).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnigmaError {
    /// Filesystem failure while loading or saving settings.
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Persisted settings could not be parsed.
    #[error("Format error: {message}")]
    Format { message: String },

    /// Settings could not be serialized.
    #[error("Encoding error: {message}")]
    Encoding { message: String },

    /// The probe request could not be built (invalid base URL or proxy URL).
    #[error("Request construction error: {0}")]
    RequestConstruction(String),

    /// Caller supplied input that failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EnigmaError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a Format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Creates an Encoding error
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Creates a RequestConstruction error
    pub fn request_construction(message: impl Into<String>) -> Self {
        Self::RequestConstruction(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    pub fn is_request_construction(&self) -> bool {
        matches!(self, Self::RequestConstruction(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for EnigmaError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

/// A type alias for `Result<T, EnigmaError>`.
pub type Result<T> = std::result::Result<T, EnigmaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: EnigmaError = io.into();
        assert!(err.is_storage());
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_error_serializes_as_data() {
        let err = EnigmaError::validation("username and password are required");
        let json = serde_json::to_string(&err).unwrap();
        let back: EnigmaError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}
