use std::env;
use std::path::Path;
use std::time::Duration;

// Default configuration constants
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5050";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FIXTURE_HOST: &str = "127.0.0.1";
pub const DEFAULT_FIXTURE_PORT: u16 = 5050;

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

/// Request timeout for the catalog API. Missing, blank, zero or non-numeric
/// values fall back to [`DEFAULT_REQUEST_TIMEOUT_SECS`].
pub fn get_request_timeout() -> Duration {
    let secs = env::var("API_TIMEOUT_SECS")
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

pub fn get_fixture_host() -> String {
    env::var("FIXTURE_HOST")
        .ok()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_FIXTURE_HOST.to_string())
}

pub fn get_fixture_port() -> u16 {
    env::var("FIXTURE_PORT")
        .ok()
        .and_then(|raw| raw.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_FIXTURE_PORT)
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
