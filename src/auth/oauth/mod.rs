//! OAuth authorization code flow.
//!
//! The install flow has two steps:
//!
//! 1. [`authorize_url`]: build the URL on the shop's admin where the merchant
//!    grants the configured scopes, carrying an opaque state parameter.
//! 2. [`exchange_token`]: on the callback, trade the single-use code for an
//!    offline access token and the scopes actually granted.
//!
//! The state parameter is an opaque pass-through: it is generated (or
//! accepted from the caller), embedded in the authorize URL, and returned to
//! the app on the callback, but this crate does not validate it.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_lifecycle::auth::oauth::{authorize_url, exchange_token};
//!
//! let redirect = authorize_url(&config, &shop, None)?;
//! // ... redirect the merchant to redirect.auth_url; on callback:
//! let grant = exchange_token(&config, &shop, &code).await?;
//! println!("granted scopes: {}", grant.scopes);
//! ```

mod authorize;
mod error;
mod exchange;
mod state;

pub use authorize::{authorize_url, AuthorizeRedirect};
pub use error::OAuthError;
pub use exchange::{exchange_token, TokenGrant};
pub use state::StateParam;
