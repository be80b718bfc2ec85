/// Error types for the catalog fetch layer
use thiserror::Error;

/// Message shown in the grid whenever a page fails to load.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load laptops. Please try again.";

/// Errors that can occur while talking to the catalog API.
///
/// All variants collapse into the same user-facing "load failed" outcome; the
/// distinction only matters for logs.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Connection refused, timeout, reset while reading the body...
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }
}
