use anyhow::{Context, Result};
use enigma_application::EnigmaApp;
use enigma_core::activity::SampleActivityFeed;
use enigma_infrastructure::SettingsStore;
use enigma_infrastructure::paths::APP_NAME;
use enigma_interaction::ConnectionProber;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Builds the facade the same way the desktop shell does, but fails loudly
/// on an unreadable or corrupt settings file instead of falling back to
/// defaults, so a later `settings set` cannot overwrite it.
pub async fn open_app(config: Option<PathBuf>) -> Result<EnigmaApp> {
    let store = match config {
        Some(path) => SettingsStore::with_path(path),
        None => SettingsStore::new(APP_NAME).context("Failed to open settings store")?,
    };

    let app = EnigmaApp::new(
        Some(store),
        ConnectionProber::new(),
        Arc::new(SampleActivityFeed),
    );
    app.startup().await.context("Failed to load settings")?;
    Ok(app)
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{}", json);
    Ok(())
}
