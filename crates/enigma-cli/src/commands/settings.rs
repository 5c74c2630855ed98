use anyhow::{Context, Result, bail};
use enigma_application::EnigmaApp;
use enigma_core::Settings;
use serde_json::Value;

use super::utils::print_json;

pub async fn show(app: &EnigmaApp) -> Result<()> {
    print_json(&app.get_settings().await)
}

pub fn path(app: &EnigmaApp) -> Result<()> {
    match app.settings_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("(in-memory)"),
    }
    Ok(())
}

/// Read-modify-write of a single field, then a full-record save.
pub async fn set(app: &EnigmaApp, key: &str, raw: &str) -> Result<()> {
    let current = app.get_settings().await;
    let updated = apply_setting(&current, key, raw)?;
    let saved = app.save_settings(updated).await?;
    print_json(&saved)
}

/// Returns a copy of `settings` with the camelCase `key` set from `raw`.
///
/// The raw string is interpreted according to the field's current JSON type.
pub fn apply_setting(settings: &Settings, key: &str, raw: &str) -> Result<Settings> {
    let mut value = serde_json::to_value(settings).context("Failed to encode settings")?;
    let Some(object) = value.as_object_mut() else {
        bail!("settings did not encode to a JSON object");
    };
    let Some(slot) = object.get_mut(key) else {
        let mut known: Vec<&String> = object.keys().collect();
        known.sort();
        bail!(
            "unknown setting '{}' (known: {})",
            key,
            known.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
        );
    };

    let replacement = match &*slot {
        Value::Bool(_) => Value::Bool(
            raw.parse()
                .with_context(|| format!("'{}' expects true or false", key))?,
        ),
        Value::Number(_) => Value::from(
            raw.parse::<i32>()
                .with_context(|| format!("'{}' expects an integer", key))?,
        ),
        _ => Value::String(raw.to_string()),
    };
    *slot = replacement;

    serde_json::from_value(value).context("Failed to decode updated settings")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_string_setting() {
        let updated = apply_setting(&Settings::default(), "apiBaseUrl", "http://localhost:8080/v1")
            .unwrap();
        assert_eq!(updated.api_base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_apply_numeric_and_bool_settings() {
        let updated = apply_setting(&Settings::default(), "maxRetries", "3").unwrap();
        let updated = apply_setting(&updated, "allowUntrustedCerts", "true").unwrap();
        assert_eq!(updated.max_retries, 3);
        assert!(updated.allow_untrusted_certs);
    }

    #[test]
    fn test_apply_negative_timeout() {
        let updated = apply_setting(&Settings::default(), "requestTimeoutSeconds", "-1").unwrap();
        assert_eq!(updated.request_timeout_seconds, -1);
    }

    #[test]
    fn test_rejects_unknown_key_and_bad_values() {
        assert!(apply_setting(&Settings::default(), "api_base_url", "x").is_err());
        assert!(apply_setting(&Settings::default(), "maxRetries", "three").is_err());
        assert!(apply_setting(&Settings::default(), "activityLogging", "yes").is_err());
    }
}
