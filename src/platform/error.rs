//! Platform client error types.

use thiserror::Error;

/// Errors returned by the Admin API client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The request failed before a response was received.
    #[error("Network error: {message}")]
    Network {
        /// Description of the transport failure.
        message: String,
    },

    /// The platform returned a non-success HTTP status.
    #[error("Platform returned status {code}: {message}")]
    Status {
        /// The HTTP status code.
        code: u16,
        /// The response body, truncated if unreadable.
        message: String,
    },

    /// The response body could not be parsed.
    #[error("Failed to parse platform response: {message}")]
    Deserialize {
        /// Description of the parse failure.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let error = PlatformError::Status {
            code: 429,
            message: "throttled".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("429"));
        assert!(message.contains("throttled"));
    }
}
