//! Shop lifecycle core for Shopify apps.
//!
//! This crate implements the server-side lifecycle of a Shopify app:
//! the OAuth install flow, HMAC-verified webhook ingestion, and automatic
//! registration of the webhooks the app requires. It is framework-agnostic;
//! a host mounts the [`App`] facade's methods behind its own routes.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopify_lifecycle::{
//!     AdminApiClient, ApiKey, ApiSecretKey, App, AppConfig, HostUrl,
//!     MemoryShopStore, ShopDomain,
//! };
//! use shopify_lifecycle::notify::DiscordNotifier;
//! use shopify_lifecycle::webhooks::WebhookTopic;
//!
//! let config = AppConfig::builder()
//!     .api_key(ApiKey::new("your-api-key")?)
//!     .api_secret_key(ApiSecretKey::new("your-secret")?)
//!     .host(HostUrl::new("https://myapp.example.com")?)
//!     .scopes("read_orders,read_products".parse()?)
//!     .required_topics(vec![
//!         WebhookTopic::OrdersCreate,
//!         WebhookTopic::AppUninstalled,
//!     ])
//!     .build()?;
//!
//! let app = App::new(
//!     config.clone(),
//!     Arc::new(MemoryShopStore::new()),
//!     Arc::new(AdminApiClient::new(&config)?),
//!     Arc::new(DiscordNotifier::new("https://discord.com/api/webhooks/...")),
//! );
//!
//! // GET /auth/install?shop=...
//! let shop = ShopDomain::new("example-shop")?;
//! let redirect = app.authorize_url(&shop, None)?;
//!
//! // GET /auth/callback?shop=...&code=...
//! let summary = app.oauth_callback(&shop, "auth-code").await?;
//!
//! // POST /webhooks/{topic}
//! let response = app
//!     .handle_webhook("orders-create", "example-shop.myshopify.com", "sig", b"{}")
//!     .await;
//! assert_eq!(response.status_code(), 200);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: validated configuration newtypes and the [`AppConfig`]
//!   builder. Secrets mask their `Debug` output.
//! - [`auth`]: OAuth scopes and the authorization code flow.
//! - [`platform`]: the Admin API client behind the [`PlatformClient`] seam.
//! - [`shops`]: shop records, the [`ShopStore`] persistence seam, the
//!   install flow, and read-only analytics.
//! - [`webhooks`]: signature verification, topic routing, required-webhook
//!   registration, and typed payloads.
//! - [`notify`]: best-effort operator notifications.
//! - [`App`]: the facade a host framework mounts.
//!
//! # Security
//!
//! Webhook signatures are HMAC-SHA256 over the raw body, compared in
//! constant time, with rotation fallback to a configured old secret key.
//! Verification always runs before the body is parsed.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod notify;
pub mod platform;
pub mod shops;
pub mod webhooks;

pub use app::{App, WebhookResponse};
pub use auth::AuthScopes;
pub use config::{
    AccessToken, ApiKey, ApiSecretKey, AppConfig, AppConfigBuilder, HostUrl, ShopDomain,
};
pub use error::ConfigError;
pub use platform::{AdminApiClient, PlatformClient};
pub use shops::{MemoryShopStore, Shop, ShopStore, ShopSummary};

use std::future::Future;
use std::pin::Pin;

/// Boxed future used by the async trait seams ([`ShopStore`],
/// [`PlatformClient`], [`notify::Notifier`]).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
