//! Settings persistence.
//!
//! [`SettingsStore`] keeps exactly one [`Settings`] record in
//! `{config dir}/{app name}/settings.json`.

use crate::paths::{EnigmaPaths, PathError};
use crate::storage::{AtomicJsonError, AtomicJsonFile, create_private_dir_all};
use enigma_core::{EnigmaError, Result, Settings};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Concurrency safe persistence for settings on disk.
///
/// Loads may run concurrently with each other; a save excludes every other
/// load and save on the same instance. Nothing coordinates separate
/// processes writing the same path.
///
/// # Example
///
/// ```no_run
/// use enigma_infrastructure::SettingsStore;
///
/// let store = SettingsStore::new("copilot-enigma")?;
/// let mut settings = store.load()?;
/// settings.language = "de".to_string();
/// store.save(&settings)?;
/// # Ok::<(), enigma_core::EnigmaError>(())
/// ```
pub struct SettingsStore {
    file: AtomicJsonFile<Settings>,
    lock: RwLock<()>,
}

impl SettingsStore {
    /// Creates a store rooted in the user's configuration directory.
    ///
    /// The application directory is created (owner-only) if it is missing.
    pub fn new(app_name: &str) -> Result<Self> {
        let paths = EnigmaPaths::new(app_name).map_err(|e| match e {
            PathError::EmptyAppName => EnigmaError::config(e.to_string()),
            PathError::ConfigDirNotFound => EnigmaError::storage(e.to_string()),
        })?;
        let dir = paths
            .config_dir()
            .map_err(|e| EnigmaError::storage(e.to_string()))?;

        create_private_dir_all(&dir).map_err(|e| {
            EnigmaError::storage(format!("create config dir {}: {}", dir.display(), e))
        })?;

        Ok(Self::with_path(dir.join(crate::paths::SETTINGS_FILE_NAME)))
    }

    /// Creates a store for an explicit settings file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            lock: RwLock::new(()),
        }
    }

    /// Loads the settings, or the defaults when no file exists yet.
    ///
    /// A file that exists but cannot be read is a `Storage` error and one
    /// that cannot be parsed is a `Format` error; neither falls back to
    /// defaults.
    pub fn load(&self) -> Result<Settings> {
        let _guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);

        match self.file.load() {
            Ok(Some(settings)) => Ok(settings),
            Ok(None) => {
                tracing::debug!(
                    "[SettingsStore] No settings at {}, using defaults",
                    self.path().display()
                );
                Ok(Settings::default())
            }
            Err(e) => Err(self.map_error("read settings", e)),
        }
    }

    /// Persists the full settings record.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);

        self.file
            .save(settings)
            .map_err(|e| self.map_error("write settings", e))?;

        tracing::debug!("[SettingsStore] Saved settings to {}", self.path().display());
        Ok(())
    }

    /// Path of the settings file. Useful for diagnostics.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn map_error(&self, action: &str, error: AtomicJsonError) -> EnigmaError {
        match error {
            AtomicJsonError::IoError(e) => {
                EnigmaError::storage(format!("{} {}: {}", action, self.path().display(), e))
            }
            AtomicJsonError::ParseError(e) => {
                EnigmaError::format(format!("parse settings {}: {}", self.path().display(), e))
            }
            AtomicJsonError::SerializeError(e) => {
                EnigmaError::encoding(format!("encode settings: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> SettingsStore {
        SettingsStore::with_path(temp_dir.path().join("settings.json"))
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        assert_eq!(store.load().unwrap(), Settings::default());
        // Loading must not create the file.
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_then_load_returns_same_value() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let settings = Settings {
            api_base_url: "http://localhost:11434/v1".to_string(),
            api_key: "sk-local".to_string(),
            organization: "org-42".to_string(),
            preferred_llm_vendor: "ollama".to_string(),
            request_timeout_seconds: 3,
            max_retries: 4,
            network_proxy: "http://proxy.internal:3128".to_string(),
            allow_untrusted_certs: true,
            language: "ja".to_string(),
            display_name: "alice".to_string(),
            account_email: "alice@example.com".to_string(),
            avatar_data: "data:image/png;base64,AAAA".to_string(),
            desktop_capture_enabled: true,
            activity_logging: false,
            background_automation_enabled: true,
            automation_browser: "firefox".to_string(),
            browser_profile_path: "/home/alice/.mozilla/default".to_string(),
            ..Settings::default()
        };

        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_malformed_file_is_format_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        std::fs::write(store.path(), "{\"apiBaseUrl\": ").unwrap();

        let err = store.load().unwrap_err();
        assert!(err.is_format(), "unexpected error: {err}");
    }

    #[test]
    fn test_wrong_field_type_is_format_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        std::fs::write(store.path(), r#"{"maxRetries": "three"}"#).unwrap();

        assert!(store.load().unwrap_err().is_format());
    }

    #[test]
    fn test_negative_counters_load_as_written() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        std::fs::write(
            store.path(),
            r#"{"requestTimeoutSeconds":-1,"maxRetries":-3,"language":"de"}"#,
        )
        .unwrap();

        let settings = store.load().unwrap();
        assert_eq!(settings.request_timeout_seconds, -1);
        assert_eq!(settings.max_retries, -3);
        assert_eq!(settings.language, "de");
    }

    #[test]
    fn test_unreadable_path_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be cannot be read as a file.
        let path = temp_dir.path().join("settings.json");
        std::fs::create_dir(&path).unwrap();
        let store = SettingsStore::with_path(path);

        assert!(store.load().unwrap_err().is_storage());
        assert!(store.save(&Settings::default()).unwrap_err().is_storage());
    }

    #[test]
    fn test_concurrent_saves_leave_a_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&temp_dir));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let settings = Settings {
                        max_retries: i,
                        ..Settings::default()
                    };
                    store.save(&settings).unwrap();
                    store.load().unwrap()
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let loaded = store.load().unwrap();
        assert!(loaded.max_retries < 8);
    }
}
