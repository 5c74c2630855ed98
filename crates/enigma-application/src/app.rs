//! Application facade.
//!
//! [`EnigmaApp`] is the single entry point the GUI calls. It owns the
//! authoritative settings value and the session, and delegates persistence to
//! [`SettingsStore`] and health checks to [`ConnectionProber`].

use chrono::{SecondsFormat, Utc};
use enigma_core::activity::{ActivityEvent, ActivityFeed, SampleActivityFeed};
use enigma_core::overview::Overview;
use enigma_core::user::{LoginRequest, SessionState};
use enigma_core::{ConnectionStatus, Result, Settings};
use enigma_infrastructure::SettingsStore;
use enigma_interaction::{ConnectionProber, ProbeContext};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::session_coordinator::SessionCoordinator;

/// Upper bound on a single GUI-triggered probe, across all retries.
pub const PROBE_DEADLINE: Duration = Duration::from_secs(20);

/// Settings and session share one lock so a profile is never derived from a
/// half-applied settings change.
struct AppInner {
    settings: Settings,
    session: SessionCoordinator,
}

/// Application state shared across GUI commands.
///
/// Every method takes `&self`; wrap the app in an `Arc` to share it between
/// command handlers.
pub struct EnigmaApp {
    /// `None` when the config directory was unusable at startup; settings
    /// then live in memory only.
    store: Option<SettingsStore>,
    prober: ConnectionProber,
    activity_feed: Arc<dyn ActivityFeed>,
    inner: Mutex<AppInner>,
    /// Parent of every probe context; cancelled on shutdown.
    root_ctx: ProbeContext,
}

impl EnigmaApp {
    /// Wires the app from explicit collaborators, starting with default
    /// settings. Call [`startup`](Self::startup) to load persisted settings.
    pub fn new(
        store: Option<SettingsStore>,
        prober: ConnectionProber,
        activity_feed: Arc<dyn ActivityFeed>,
    ) -> Self {
        Self {
            store,
            prober,
            activity_feed,
            inner: Mutex::new(AppInner {
                settings: Settings::default(),
                session: SessionCoordinator::new(),
            }),
            root_ctx: ProbeContext::new(),
        }
    }

    /// Creates the app for `app_name` with the default collaborators.
    ///
    /// Never fails: an unusable config directory degrades to an in-memory
    /// store and an unreadable settings file to the defaults, each with a
    /// warning in the log.
    pub async fn bootstrap(app_name: &str) -> Self {
        Self::bootstrap_with(SettingsStore::new(app_name)).await
    }

    /// [`bootstrap`](Self::bootstrap) with an already opened store.
    pub async fn bootstrap_with(store: Result<SettingsStore>) -> Self {
        let store = match store {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!(
                    "[Bootstrap] Falling back to in-memory settings store: {}",
                    e
                );
                None
            }
        };

        let app = Self::new(store, ConnectionProber::new(), Arc::new(SampleActivityFeed));

        if let Err(e) = app.startup().await {
            tracing::warn!("[Bootstrap] Unable to load settings: {}", e);
        }

        app
    }

    /// Loads persisted settings into the cache.
    ///
    /// On error the cache is left as it was.
    pub async fn startup(&self) -> Result<Settings> {
        let mut inner = self.inner.lock().await;

        if let Some(store) = &self.store {
            inner.settings = store.load()?;
            tracing::info!("[Bootstrap] Loaded settings from {}", store.path().display());
        }

        Ok(inner.settings.clone())
    }

    /// Cancels in-flight probes. Later probes return a cancelled status.
    pub fn shutdown(&self) {
        self.root_ctx.cancel();
    }

    /// Path of the settings file, `None` for an in-memory store.
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.store.as_ref().map(|store| store.path().to_path_buf())
    }

    /// Returns the cached settings.
    pub async fn get_settings(&self) -> Settings {
        self.inner.lock().await.settings.clone()
    }

    /// Persists the full settings record and makes it authoritative.
    ///
    /// If persisting fails the previous settings stay cached and the error
    /// is returned.
    pub async fn save_settings(&self, settings: Settings) -> Result<Settings> {
        let mut inner = self.inner.lock().await;

        if let Some(store) = &self.store {
            store.save(&settings)?;
        }

        inner.settings = settings;
        tracing::info!("[EnigmaApp] Settings saved");
        Ok(inner.settings.clone())
    }

    /// Validates `settings` against an OpenAI compatible API server.
    ///
    /// The settings under test need not be saved. A misconfigured base or
    /// proxy URL is returned as an error rather than a status.
    pub async fn test_llm_connection(&self, settings: Settings) -> Result<ConnectionStatus> {
        let ctx = self.root_ctx.child_with_timeout(PROBE_DEADLINE);
        self.prober.probe(&ctx, &settings).await
    }

    /// Composes a summary of the current system status.
    pub async fn get_overview(&self) -> Overview {
        let now = Utc::now();
        let settings = self.get_settings().await;

        let ctx = self.root_ctx.child_with_timeout(PROBE_DEADLINE);
        let connection_status = self
            .prober
            .probe(&ctx, &settings)
            .await
            .unwrap_or_else(|e| ConnectionStatus::unhealthy(e.to_string()));

        Overview {
            settings_path: self
                .settings_path()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            desktop_capture_enabled: settings.desktop_capture_enabled,
            activity_logging: settings.activity_logging,
            background_automation_enabled: settings.background_automation_enabled,
            active_language: settings.language.clone(),
            last_refresh: now.to_rfc3339_opts(SecondsFormat::Nanos, true),
            activity_sample: self.activity_feed.recent(now),
            connection_status,
        }
    }

    /// Returns recent desktop observations.
    pub fn get_recent_activity(&self) -> Vec<ActivityEvent> {
        self.activity_feed.recent(Utc::now())
    }

    /// Returns the current authentication session.
    pub async fn get_session(&self) -> SessionState {
        let inner = self.inner.lock().await;
        inner.session.session(&inner.settings)
    }

    /// Begins a local session after validating input credentials.
    ///
    /// The identity written into the cached settings is persisted by the next
    /// [`save_settings`](Self::save_settings).
    pub async fn login(&self, request: LoginRequest) -> Result<SessionState> {
        let mut inner = self.inner.lock().await;
        let AppInner { settings, session } = &mut *inner;
        session.login(settings, request)
    }

    /// Clears the active session.
    pub async fn logout(&self) -> SessionState {
        let mut inner = self.inner.lock().await;
        let AppInner { settings, session } = &mut *inner;
        session.logout(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enigma_core::EnigmaError;
    use tempfile::TempDir;

    fn app_in(temp_dir: &TempDir) -> EnigmaApp {
        let store = SettingsStore::with_path(temp_dir.path().join("settings.json"));
        EnigmaApp::new(
            Some(store),
            ConnectionProber::new(),
            Arc::new(SampleActivityFeed),
        )
    }

    #[tokio::test]
    async fn test_startup_without_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir);

        assert_eq!(app.startup().await.unwrap(), Settings::default());
        assert_eq!(app.get_settings().await, Settings::default());
    }

    #[tokio::test]
    async fn test_startup_propagates_format_error_and_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("settings.json"), "garbage").unwrap();
        let app = app_in(&temp_dir);

        assert!(app.startup().await.unwrap_err().is_format());
        assert_eq!(app.get_settings().await, Settings::default());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::create_dir(&path).unwrap();
        let app = EnigmaApp::new(
            Some(SettingsStore::with_path(path)),
            ConnectionProber::new(),
            Arc::new(SampleActivityFeed),
        );

        let changed = Settings {
            language: "fr".to_string(),
            ..Settings::default()
        };
        assert!(app.save_settings(changed).await.unwrap_err().is_storage());
        assert_eq!(app.get_settings().await.language, "en");
    }

    #[tokio::test]
    async fn test_in_memory_store_accepts_saves() {
        let app = EnigmaApp::new(None, ConnectionProber::new(), Arc::new(SampleActivityFeed));
        let changed = Settings {
            model: "llama3".to_string(),
            ..Settings::default()
        };

        app.save_settings(changed.clone()).await.unwrap();
        assert_eq!(app.get_settings().await, changed);
        assert!(app.settings_path().is_none());
    }

    #[tokio::test]
    async fn test_shutdown_cancels_probes() {
        let app = EnigmaApp::new(None, ConnectionProber::new(), Arc::new(SampleActivityFeed));
        app.shutdown();

        let status = app
            .test_llm_connection(Settings {
                api_base_url: "http://127.0.0.1:9".to_string(),
                ..Settings::default()
            })
            .await
            .unwrap();
        assert!(!status.healthy);
        assert_eq!(
            status.message,
            enigma_interaction::connection_prober::MSG_CANCELLED
        );
    }

    #[tokio::test]
    async fn test_bootstrap_without_store_runs_in_memory() {
        let app = EnigmaApp::bootstrap_with(Err(EnigmaError::storage("no config dir"))).await;

        assert!(app.settings_path().is_none());
        assert_eq!(app.get_settings().await, Settings::default());

        let changed = Settings {
            language: "de".to_string(),
            ..Settings::default()
        };
        app.save_settings(changed.clone()).await.unwrap();
        assert_eq!(app.get_settings().await, changed);
    }

    #[tokio::test]
    async fn test_bootstrap_with_corrupt_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let app = EnigmaApp::bootstrap_with(Ok(SettingsStore::with_path(path.clone()))).await;

        assert_eq!(app.settings_path(), Some(path.clone()));
        assert_eq!(app.get_settings().await, Settings::default());
        // The corrupt file is left for the user to inspect.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[tokio::test]
    async fn test_bootstrap_loads_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"model":"llama3"}"#).unwrap();

        let app = EnigmaApp::bootstrap_with(Ok(SettingsStore::with_path(path))).await;
        assert_eq!(app.get_settings().await.model, "llama3");
    }

    #[tokio::test]
    async fn test_recent_activity_delegates_to_feed() {
        let app = EnigmaApp::new(None, ConnectionProber::new(), Arc::new(SampleActivityFeed));
        let events = app.get_recent_activity();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].category, "Coding");
    }
}
