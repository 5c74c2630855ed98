use anyhow::Result;
use enigma_application::EnigmaApp;
use enigma_core::user::LoginRequest;

use super::utils::print_json;

pub async fn show(app: &EnigmaApp) -> Result<()> {
    print_json(&app.get_session().await)
}

/// Logs in and persists the resulting identity fields.
///
/// The session itself only lives for this process.
pub async fn login(app: &EnigmaApp, request: LoginRequest) -> Result<()> {
    let session = app.login(request).await?;
    app.save_settings(app.get_settings().await).await?;
    print_json(&session)
}

pub async fn logout(app: &EnigmaApp) -> Result<()> {
    print_json(&app.logout().await)
}
