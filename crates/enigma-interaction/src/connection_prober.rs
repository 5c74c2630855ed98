//! ConnectionProber - reachability check for OpenAI compatible API servers.
//!
//! Issues `GET {base_url}/models` and classifies the outcome into a
//! [`ConnectionStatus`]. Unreachable or failing servers are reported as an
//! unhealthy status; only a base URL or proxy URL that cannot be turned into
//! a request is an error.

use crate::probe_context::{ProbeContext, ProbeInterrupt};
use enigma_core::{ConnectionStatus, EnigmaError, Result, Settings};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};
use std::time::Duration;

const MODELS_ENDPOINT: &str = "/models";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Header carrying the organization for OpenAI accounts.
pub const ORGANIZATION_HEADER: &str = "OpenAI-Organization";
/// Header carrying the preferred vendor hint for multi-vendor gateways.
pub const VENDOR_HEADER: &str = "X-LLM-Vendor";

pub const MSG_BASE_URL_REQUIRED: &str = "API base URL is required";
pub const MSG_CONNECTED: &str = "Connection successful";
pub const MSG_CONNECTED_UNDECODABLE: &str =
    "Connected successfully, but failed to decode response";
pub const MSG_NO_STATUS: &str = "connection attempt did not return a status";
pub const MSG_CANCELLED: &str = "connection probe cancelled";
pub const MSG_DEADLINE_EXCEEDED: &str = "connection probe deadline exceeded";

/// Probes an LLM server described by [`Settings`].
///
/// Retries are immediate: there is no delay between attempts.
#[derive(Clone, Default)]
pub struct ConnectionProber {
    /// Shared client for settings without a proxy or relaxed TLS.
    client: Client,
}

impl ConnectionProber {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Verifies that the configured server is reachable and responsive.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::RequestConstruction`] when the base URL or proxy
    /// URL cannot be used to build a request. A credential that is not a
    /// valid header value, and every network or HTTP level failure, is
    /// reported as an unhealthy status.
    pub async fn probe(&self, ctx: &ProbeContext, settings: &Settings) -> Result<ConnectionStatus> {
        let base_url = settings.api_base_url.trim();
        if base_url.is_empty() {
            return Ok(ConnectionStatus::unhealthy(MSG_BASE_URL_REQUIRED));
        }

        let timeout = resolve_timeout(settings);
        let endpoint = models_endpoint(base_url)?;
        let client = self.client_for(settings, timeout)?;
        let headers = match build_headers(settings) {
            Ok(headers) => headers,
            Err(message) => return Ok(ConnectionStatus::unhealthy(message)),
        };
        let attempts = settings.max_retries.max(1).unsigned_abs();

        let mut last_status: Option<ConnectionStatus> = None;

        for attempt in 1..=attempts {
            tracing::debug!(
                endpoint = %endpoint,
                attempt,
                attempts,
                "[ConnectionProber] Probing LLM server"
            );

            let request = client
                .get(endpoint.clone())
                .headers(headers.clone())
                .timeout(timeout);

            let status = tokio::select! {
                biased;
                interrupt = ctx.done() => {
                    tracing::info!(?interrupt, attempt, "[ConnectionProber] Probe interrupted");
                    return Ok(interrupted_status(interrupt));
                }
                status = send_attempt(request) => status,
            };

            if status.healthy {
                return Ok(status);
            }

            tracing::warn!(
                endpoint = %endpoint,
                attempt,
                message = %status.message,
                "[ConnectionProber] Probe attempt failed"
            );
            last_status = Some(status);
        }

        Ok(last_status.unwrap_or_else(|| ConnectionStatus::unhealthy(MSG_NO_STATUS)))
    }

    /// Returns the shared client, or a dedicated one when the settings ask for
    /// a proxy or for untrusted certificates.
    fn client_for(&self, settings: &Settings, timeout: Duration) -> Result<Client> {
        let proxy = settings.network_proxy.trim();
        if proxy.is_empty() && !settings.allow_untrusted_certs {
            return Ok(self.client.clone());
        }

        let mut builder = Client::builder().timeout(timeout);

        if !proxy.is_empty() {
            let proxy = reqwest::Proxy::all(proxy).map_err(|e| {
                EnigmaError::request_construction(format!("invalid proxy url: {}", e))
            })?;
            builder = builder.proxy(proxy);
        }

        if settings.allow_untrusted_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| EnigmaError::request_construction(format!("build http client: {}", e)))
    }
}

/// Configured timeout if positive, otherwise the 15 second default.
fn resolve_timeout(settings: &Settings) -> Duration {
    match u64::try_from(settings.request_timeout_seconds) {
        Ok(secs) if secs > 0 => Duration::from_secs(secs),
        _ => DEFAULT_REQUEST_TIMEOUT,
    }
}

fn models_endpoint(base_url: &str) -> Result<Url> {
    let raw = format!("{}{}", base_url.trim_end_matches('/'), MODELS_ENDPOINT);
    let url = Url::parse(&raw)
        .map_err(|e| EnigmaError::request_construction(format!("invalid base url {raw}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(EnigmaError::request_construction(format!(
            "invalid base url {raw}: expected an absolute http(s) URL"
        )));
    }

    Ok(url)
}

fn build_headers(settings: &Settings) -> std::result::Result<HeaderMap, String> {
    let mut headers = HeaderMap::new();

    if !settings.api_key.is_empty() {
        headers.insert(
            AUTHORIZATION,
            header_value("Authorization", &format!("Bearer {}", settings.api_key))?,
        );
    }
    if !settings.organization.is_empty() {
        headers.insert(
            HeaderName::from_static("openai-organization"),
            header_value(ORGANIZATION_HEADER, &settings.organization)?,
        );
    }
    if !settings.preferred_llm_vendor.is_empty() {
        headers.insert(
            HeaderName::from_static("x-llm-vendor"),
            header_value(VENDOR_HEADER, &settings.preferred_llm_vendor)?,
        );
    }

    Ok(headers)
}

fn header_value(name: &str, value: &str) -> std::result::Result<HeaderValue, String> {
    HeaderValue::from_str(value).map_err(|e| format!("invalid {} header value: {}", name, e))
}

async fn send_attempt(request: RequestBuilder) -> ConnectionStatus {
    let response = match request.send().await {
        Ok(response) => response,
        Err(err) => return ConnectionStatus::unhealthy(error_chain(&err)),
    };

    let status = response.status();
    if status.as_u16() >= 400 {
        return ConnectionStatus::unhealthy(format!(
            "llm server responded with status {}",
            status.as_u16()
        ));
    }

    // Only whether the body is a JSON object matters, not its content.
    let decoded = response.bytes().await.ok().is_some_and(|body| {
        serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(&body).is_ok()
    });

    if decoded {
        ConnectionStatus::healthy(MSG_CONNECTED)
    } else {
        ConnectionStatus::healthy(MSG_CONNECTED_UNDECODABLE)
    }
}

fn interrupted_status(interrupt: ProbeInterrupt) -> ConnectionStatus {
    match interrupt {
        ProbeInterrupt::Cancelled => ConnectionStatus::unhealthy(MSG_CANCELLED),
        ProbeInterrupt::DeadlineExceeded => ConnectionStatus::unhealthy(MSG_DEADLINE_EXCEEDED),
    }
}

/// Formats an error with its source chain, e.g.
/// `error sending request ...: client error (Connect): Connection refused`.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
