//! Application configuration.
//!
//! This module provides [`AppConfig`] and [`AppConfigBuilder`], the single
//! place where credentials, the public host, OAuth scopes, and the required
//! webhook topic list live. Configuration is instance-based and injected into
//! each component at construction; nothing in this crate reads process-wide
//! state.
//!
//! # Example
//!
//! ```rust
//! use shopify_lifecycle::{AppConfig, ApiKey, ApiSecretKey, HostUrl};
//! use shopify_lifecycle::webhooks::WebhookTopic;
//!
//! let config = AppConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("my-secret").unwrap())
//!     .host(HostUrl::new("https://myapp.example.com").unwrap())
//!     .scopes("read_orders,read_products".parse().unwrap())
//!     .required_topics(vec![
//!         WebhookTopic::OrdersCreate,
//!         WebhookTopic::AppUninstalled,
//!     ])
//!     .build()
//!     .unwrap();
//!
//! assert!(config.webhooks_enabled());
//! assert_eq!(config.required_topics().len(), 2);
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ApiKey, ApiSecretKey, HostUrl, ShopDomain};

use std::time::Duration;

use crate::auth::AuthScopes;
use crate::error::ConfigError;
use crate::webhooks::WebhookTopic;

/// Default timeout applied to every outbound HTTP call.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default path on the app host that receives the OAuth callback.
const DEFAULT_CALLBACK_PATH: &str = "/auth/callback";

/// Immutable application configuration.
///
/// Create via [`AppConfig::builder`]. All components (OAuth flow, platform
/// client, webhook registrar, boundary facade) borrow this value; none of
/// them mutate it.
///
/// # Thread Safety
///
/// `AppConfig` is `Send + Sync` and cheap to clone.
#[derive(Clone, Debug)]
pub struct AppConfig {
    api_key: ApiKey,
    api_secret_key: ApiSecretKey,
    old_api_secret_key: Option<ApiSecretKey>,
    host: Option<HostUrl>,
    callback_path: String,
    scopes: AuthScopes,
    required_topics: Vec<WebhookTopic>,
    webhooks_enabled: bool,
    request_timeout: Duration,
    admin_api_base: Option<HostUrl>,
}

// Verify AppConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppConfig>();
};

impl AppConfig {
    /// Returns a new [`AppConfigBuilder`].
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::new()
    }

    /// Returns the API key (client id).
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API secret key.
    #[must_use]
    pub const fn api_secret_key(&self) -> &ApiSecretKey {
        &self.api_secret_key
    }

    /// Returns the previous API secret key, if one is configured.
    ///
    /// Signature verification falls back to this key so key rotation does
    /// not break in-flight webhooks.
    #[must_use]
    pub const fn old_api_secret_key(&self) -> Option<&ApiSecretKey> {
        self.old_api_secret_key.as_ref()
    }

    /// Returns the public host URL of the application, if configured.
    #[must_use]
    pub const fn host(&self) -> Option<&HostUrl> {
        self.host.as_ref()
    }

    /// Returns the OAuth callback path on the app host.
    #[must_use]
    pub fn callback_path(&self) -> &str {
        &self.callback_path
    }

    /// Returns the OAuth scopes requested on install.
    #[must_use]
    pub const fn scopes(&self) -> &AuthScopes {
        &self.scopes
    }

    /// Returns the ordered list of webhook topics registered on every install.
    ///
    /// Callers must not configure duplicate topics; the registrar preserves
    /// order and does not deduplicate.
    #[must_use]
    pub fn required_topics(&self) -> &[WebhookTopic] {
        &self.required_topics
    }

    /// Returns whether webhook registration is enabled.
    #[must_use]
    pub const fn webhooks_enabled(&self) -> bool {
        self.webhooks_enabled
    }

    /// Returns the timeout applied to outbound HTTP calls.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the Admin API base override, if configured.
    ///
    /// When set, platform requests go to this base instead of
    /// `https://{shop-domain}`. Used for proxy deployments and tests.
    #[must_use]
    pub const fn admin_api_base(&self) -> Option<&HostUrl> {
        self.admin_api_base.as_ref()
    }
}

/// Builder for [`AppConfig`].
///
/// Required fields: `api_key` and `api_secret_key`. Everything else has a
/// sensible default.
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_key: Option<ApiKey>,
    api_secret_key: Option<ApiSecretKey>,
    old_api_secret_key: Option<ApiSecretKey>,
    host: Option<HostUrl>,
    callback_path: Option<String>,
    scopes: Option<AuthScopes>,
    required_topics: Vec<WebhookTopic>,
    webhooks_enabled: Option<bool>,
    request_timeout: Option<Duration>,
    admin_api_base: Option<HostUrl>,
}

impl AppConfigBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Sets the API secret key (required).
    #[must_use]
    pub fn api_secret_key(mut self, api_secret_key: ApiSecretKey) -> Self {
        self.api_secret_key = Some(api_secret_key);
        self
    }

    /// Sets the previous API secret key for rotation fallback.
    #[must_use]
    pub fn old_api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.old_api_secret_key = Some(key);
        self
    }

    /// Sets the public host URL of the application.
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the OAuth callback path (default: `/auth/callback`).
    #[must_use]
    pub fn callback_path(mut self, path: impl Into<String>) -> Self {
        self.callback_path = Some(path.into());
        self
    }

    /// Sets the OAuth scopes requested on install.
    #[must_use]
    pub fn scopes(mut self, scopes: AuthScopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the ordered list of required webhook topics.
    #[must_use]
    pub fn required_topics(mut self, topics: Vec<WebhookTopic>) -> Self {
        self.required_topics = topics;
        self
    }

    /// Enables or disables webhook registration (default: enabled).
    #[must_use]
    pub const fn webhooks_enabled(mut self, enabled: bool) -> Self {
        self.webhooks_enabled = Some(enabled);
        self
    }

    /// Sets the outbound request timeout (default: 10 seconds).
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the Admin API base override.
    #[must_use]
    pub fn admin_api_base(mut self, base: HostUrl) -> Self {
        self.admin_api_base = Some(base);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` or
    /// `api_secret_key` was not set.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let api_secret_key = self.api_secret_key.ok_or(ConfigError::MissingRequiredField {
            field: "api_secret_key",
        })?;

        Ok(AppConfig {
            api_key,
            api_secret_key,
            old_api_secret_key: self.old_api_secret_key,
            host: self.host,
            callback_path: self
                .callback_path
                .unwrap_or_else(|| DEFAULT_CALLBACK_PATH.to_string()),
            scopes: self.scopes.unwrap_or_default(),
            required_topics: self.required_topics,
            webhooks_enabled: self.webhooks_enabled.unwrap_or(true),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            admin_api_base: self.admin_api_base,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_builder() -> AppConfigBuilder {
        AppConfig::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            .api_secret_key(ApiSecretKey::new("test-secret").unwrap())
    }

    #[test]
    fn test_build_with_required_fields_only() {
        let config = minimal_builder().build().unwrap();

        assert_eq!(config.api_key().as_ref(), "test-key");
        assert_eq!(config.callback_path(), "/auth/callback");
        assert!(config.webhooks_enabled());
        assert!(config.required_topics().is_empty());
        assert!(config.host().is_none());
        assert!(config.admin_api_base().is_none());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_build_fails_without_api_key() {
        let result = AppConfig::builder()
            .api_secret_key(ApiSecretKey::new("secret").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_build_fails_without_api_secret_key() {
        let result = AppConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "api_secret_key"
            })
        ));
    }

    #[test]
    fn test_builder_sets_all_optional_fields() {
        let config = minimal_builder()
            .old_api_secret_key(ApiSecretKey::new("old-secret").unwrap())
            .host(HostUrl::new("https://myapp.example.com").unwrap())
            .callback_path("/oauth/done")
            .scopes("read_orders".parse().unwrap())
            .required_topics(vec![WebhookTopic::OrdersCreate])
            .webhooks_enabled(false)
            .request_timeout(Duration::from_secs(3))
            .admin_api_base(HostUrl::new("http://localhost:8080").unwrap())
            .build()
            .unwrap();

        assert!(config.old_api_secret_key().is_some());
        assert_eq!(
            config.host().map(AsRef::as_ref),
            Some("https://myapp.example.com")
        );
        assert_eq!(config.callback_path(), "/oauth/done");
        assert!(config.scopes().contains("read_orders"));
        assert_eq!(config.required_topics(), &[WebhookTopic::OrdersCreate]);
        assert!(!config.webhooks_enabled());
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert!(config.admin_api_base().is_some());
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppConfig>();
    }
}
