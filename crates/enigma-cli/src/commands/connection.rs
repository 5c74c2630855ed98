use anyhow::Result;
use enigma_application::EnigmaApp;

use super::utils::print_json;

/// Overrides applied on top of the stored settings for a one-off test.
#[derive(Debug, Default, clap::Args)]
pub struct ProbeOverrides {
    /// API base URL, e.g. http://localhost:11434/v1
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long)]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds; zero or negative uses the 15 s default
    #[arg(long, allow_negative_numbers = true)]
    pub timeout: Option<i32>,
    /// Number of attempts; values below 1 mean a single attempt
    #[arg(long, allow_negative_numbers = true)]
    pub retries: Option<i32>,
    /// Proxy URL for probe traffic
    #[arg(long)]
    pub proxy: Option<String>,
    /// Accept untrusted TLS certificates
    #[arg(long)]
    pub insecure: bool,
}

pub async fn test(app: &EnigmaApp, overrides: ProbeOverrides) -> Result<()> {
    let mut settings = app.get_settings().await;

    if let Some(base_url) = overrides.base_url {
        settings.api_base_url = base_url;
    }
    if let Some(api_key) = overrides.api_key {
        settings.api_key = api_key;
    }
    if let Some(timeout) = overrides.timeout {
        settings.request_timeout_seconds = timeout;
    }
    if let Some(retries) = overrides.retries {
        settings.max_retries = retries;
    }
    if let Some(proxy) = overrides.proxy {
        settings.network_proxy = proxy;
    }
    if overrides.insecure {
        settings.allow_untrusted_certs = true;
    }

    let status = app.test_llm_connection(settings).await?;
    print_json(&status)
}
