//! Account profile derivation.

use super::model::AccountProfile;
use crate::settings::Settings;

/// Derives the display profile from the settings and the last login time.
///
/// An authenticated session always has a profile. Otherwise the profile is
/// absent only when the settings carry no identity fields and no login has
/// been recorded; a recorded login alone yields a profile holding just the
/// timestamp.
pub fn derive_profile(
    settings: &Settings,
    authenticated: bool,
    last_login: Option<&str>,
) -> Option<AccountProfile> {
    let last_login = last_login.unwrap_or_default();

    if !authenticated && !settings.has_identity() {
        if last_login.is_empty() {
            return None;
        }
        return Some(AccountProfile {
            last_login: last_login.to_string(),
            ..AccountProfile::default()
        });
    }

    Some(AccountProfile {
        display_name: settings.display_name.clone(),
        email: settings.account_email.clone(),
        avatar_url: settings.avatar_url.clone(),
        avatar_data: settings.avatar_data.clone(),
        last_login: last_login.to_string(),
    })
}
