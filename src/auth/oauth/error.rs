//! OAuth error types.

use thiserror::Error;

/// Errors that can occur during the OAuth install flow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OAuthError {
    /// The app host is required to build a redirect URI.
    #[error("Host configuration is required for OAuth. Set the host URL on the app configuration.")]
    MissingHostConfig,

    /// The authorization code could not be exchanged for an access token.
    ///
    /// `status` is the upstream HTTP status, or `0` when the request failed
    /// before a response was received.
    #[error("Token exchange failed (status {status}): {message}")]
    ExchangeFailed {
        /// HTTP status code from the token endpoint, or 0 for network errors.
        status: u16,
        /// Description of the failure.
        message: String,
    },
}
