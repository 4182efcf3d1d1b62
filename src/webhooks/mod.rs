//! Webhook ingestion: verification, registration, and dispatch.
//!
//! The pieces compose in delivery order:
//!
//! 1. [`verify_signature`] authenticates the raw body against the HMAC
//!    header before anything else looks at it.
//! 2. [`dispatch`] routes the verified body to the handler for its topic.
//! 3. [`register_required`] creates the subscriptions that produce those
//!    deliveries in the first place, after each install.

mod dispatcher;
mod errors;
mod payloads;
mod registrar;
mod topics;
mod verification;

pub use dispatcher::{dispatch, DispatchOutcome};
pub use errors::WebhookError;
pub use payloads::{OrderCustomer, OrderEvent, ProductEvent, UninstallEvent};
pub use registrar::register_required;
pub use topics::{TopicGroup, UnknownTopic, WebhookTopic};
pub use verification::{compute_signature, verify_signature};
