use anyhow::Result;
use enigma_application::EnigmaApp;

use super::utils::print_json;

pub async fn overview(app: &EnigmaApp) -> Result<()> {
    print_json(&app.get_overview().await)
}

pub fn activity(app: &EnigmaApp) -> Result<()> {
    print_json(&app.get_recent_activity())
}
