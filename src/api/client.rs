use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use yansi::Paint;

use super::error::FetchError;
use crate::config::{sanitize_base_url, DEFAULT_REQUEST_TIMEOUT_SECS};

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Thin JSON-over-HTTP client for the catalog API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url` with the default request timeout.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("Lapbytes/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: sanitize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `endpoint` and decode the body as `T`.
    /// Any non-2xx status is an error, whatever the body says.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint);

        // --- Curl Logging ---
        let parts = [
            Paint::new("curl").fg(yansi::Color::Green).bold().to_string(),
            format!("-X {}", Paint::new("GET").fg(yansi::Color::Yellow).bold()),
            format!("'{}'", Paint::new(&url).fg(yansi::Color::Cyan)),
        ];
        log_output(format!("Request:\n{}", parts.join(" ")));
        // --------------------

        tracing::debug!(%url, "Catalog API request");
        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "Catalog API request failed");
            FetchError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Catalog API returned an error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        // Grayed out so the request line stays the visual anchor
        log_output(format!("Response:\n{}", Paint::new(&body).rgb(100, 100, 100)));

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(%url, error = %e, "Catalog API response did not parse");
            FetchError::Parse(e.to_string())
        })
    }
}
