use lapbytes::config;
use once_cell::sync::Lazy;
use std::env;
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

// Env vars are process-wide; keep these tests from interleaving
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[test]
fn test_sanitize_base_url_removes_trailing_slash() {
    assert_eq!(
        config::sanitize_base_url("http://shop.lapbytes.co.ke/"),
        "http://shop.lapbytes.co.ke"
    );
}

#[test]
fn test_sanitize_base_url_multiple_trailing_slashes() {
    assert_eq!(
        config::sanitize_base_url("http://localhost:5050///"),
        "http://localhost:5050"
    );
}

#[test]
fn test_sanitize_base_url_with_whitespace() {
    assert_eq!(
        config::sanitize_base_url("  http://localhost:5050/  "),
        "http://localhost:5050"
    );
}

#[test]
fn test_sanitize_base_url_empty_string() {
    assert_eq!(config::sanitize_base_url(""), "http://localhost:5050");
    assert_eq!(config::sanitize_base_url("   "), "http://localhost:5050");
}

#[test]
fn test_get_api_base_url_with_trailing_slash() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::set_var("API_BASE_URL", "http://api.example.test/");

    assert_eq!(config::get_api_base_url(), "http://api.example.test");

    env::remove_var("API_BASE_URL");
}

#[test]
fn test_get_api_base_url_uses_default() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::remove_var("API_BASE_URL");

    assert_eq!(config::get_api_base_url(), config::DEFAULT_API_BASE_URL);
}

#[test]
fn test_request_timeout_parsing() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    env::set_var("API_TIMEOUT_SECS", "5");
    assert_eq!(config::get_request_timeout(), Duration::from_secs(5));

    env::set_var("API_TIMEOUT_SECS", "soon");
    assert_eq!(config::get_request_timeout(), Duration::from_secs(config::DEFAULT_REQUEST_TIMEOUT_SECS));

    env::set_var("API_TIMEOUT_SECS", "0");
    assert_eq!(config::get_request_timeout(), Duration::from_secs(config::DEFAULT_REQUEST_TIMEOUT_SECS));

    env::remove_var("API_TIMEOUT_SECS");
    assert_eq!(config::get_request_timeout(), Duration::from_secs(config::DEFAULT_REQUEST_TIMEOUT_SECS));
}

#[test]
fn test_fixture_port_falls_back() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    env::set_var("FIXTURE_PORT", "not-a-port");
    assert_eq!(config::get_fixture_port(), config::DEFAULT_FIXTURE_PORT);

    env::set_var("FIXTURE_PORT", "6060");
    assert_eq!(config::get_fixture_port(), 6060);

    env::remove_var("FIXTURE_PORT");
}

#[test]
fn test_load_env_file_sets_variables() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::remove_var("FIXTURE_HOST");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "FIXTURE_HOST=0.0.0.0").unwrap();
    config::load_env_file(file.path().to_str());

    assert_eq!(config::get_fixture_host(), "0.0.0.0");

    env::remove_var("FIXTURE_HOST");
    assert_eq!(config::get_fixture_host(), config::DEFAULT_FIXTURE_HOST);
}
