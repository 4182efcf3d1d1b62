//! Webhook processing error types.

use crate::shops::StoreError;
use thiserror::Error;

/// Errors raised while processing an incoming webhook.
///
/// Signature failures never reach this type; the boundary rejects them
/// before dispatch runs.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The payload body could not be parsed for its topic.
    #[error("Failed to parse '{topic}' payload: {message}")]
    PayloadParse {
        /// The topic whose payload failed to parse.
        topic: String,
        /// Description of the parse failure.
        message: String,
    },

    /// The shop store reported a failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
