//! Unified path management for Copilot Enigma files.
//!
//! All per-user files live under the platform configuration directory
//! reported by the `dirs` crate, so the layout is consistent across Linux,
//! macOS, and Windows.

use std::path::PathBuf;

/// Application directory name used when none is supplied.
pub const APP_NAME: &str = "copilot-enigma";

/// File name of the persisted settings record.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The application name was empty.
    EmptyAppName,
    /// The platform configuration directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::EmptyAppName => write!(f, "App name must not be empty"),
            PathError::ConfigDirNotFound => write!(f, "Cannot find user config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for one application name.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/copilot-enigma/     # Config directory (dirs::config_dir)
/// ├── settings.json             # Settings record (0600)
/// └── logs/                     # Application logs
///     └── enigma.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone)]
pub struct EnigmaPaths {
    app_name: String,
}

impl EnigmaPaths {
    /// Creates a path resolver for `app_name`.
    pub fn new(app_name: impl Into<String>) -> Result<Self, PathError> {
        let app_name = app_name.into();
        if app_name.trim().is_empty() {
            return Err(PathError::EmptyAppName);
        }
        Ok(Self { app_name })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns the application configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/copilot-enigma/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|base| base.join(&self.app_name))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the settings file.
    pub fn settings_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(SETTINGS_FILE_NAME))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

impl Default for EnigmaPaths {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_app_name_is_rejected() {
        assert!(matches!(EnigmaPaths::new(""), Err(PathError::EmptyAppName)));
        assert!(matches!(EnigmaPaths::new("   "), Err(PathError::EmptyAppName)));
    }

    #[test]
    fn test_config_dir() {
        // Headless CI containers may not have a config dir at all.
        if let Ok(config_dir) = EnigmaPaths::default().config_dir() {
            assert!(config_dir.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_settings_file() {
        let paths = EnigmaPaths::new("enigma-test").unwrap();
        if let Ok(settings_file) = paths.settings_file() {
            assert!(settings_file.ends_with("enigma-test/settings.json"));
            let config_dir = paths.config_dir().unwrap();
            assert!(settings_file.starts_with(&config_dir));
        }
    }

    #[test]
    fn test_logs_dir() {
        let paths = EnigmaPaths::default();
        if let Ok(logs_dir) = paths.logs_dir() {
            assert!(logs_dir.ends_with("logs"));
            let config_dir = paths.config_dir().unwrap();
            assert!(logs_dir.starts_with(&config_dir));
        }
    }
}
