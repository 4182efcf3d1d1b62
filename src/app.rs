//! Application facade.
//!
//! [`App`] wires configuration, the shop store, the platform client, and
//! the notifier together and exposes one method per HTTP endpoint a host
//! framework mounts. The facade is framework-agnostic: it takes header
//! values and body bytes, and returns values the host maps onto responses.

use crate::auth::oauth::{authorize_url, AuthorizeRedirect, OAuthError};
use crate::config::{AppConfig, ShopDomain};
use crate::notify::{Notification, Notifier, NotifyKind};
use crate::platform::PlatformClient;
use crate::shops::{
    analytics, install_shop, InstallError, ShopStore, ShopSummary, StoreError,
};
use crate::webhooks::{dispatch, register_required, verify_signature};
use chrono::Duration;
use std::sync::Arc;
use tracing::{error, warn};

/// Outcome of a webhook delivery, mapped to an HTTP status by the host.
///
/// Signature failures must return 401 so the platform stops trusting the
/// delivery; processing failures return 500 so the platform redelivers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WebhookResponse {
    /// Delivery accepted (handled or deliberately ignored).
    Ok,
    /// Signature verification failed.
    Unauthorized,
    /// Verification passed but processing failed; safe to redeliver.
    ServerError,
}

impl WebhookResponse {
    /// The HTTP status code for this outcome.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Unauthorized => 401,
            Self::ServerError => 500,
        }
    }
}

/// The assembled application.
///
/// Cheap to clone; all components are behind `Arc`.
#[derive(Clone)]
pub struct App {
    config: AppConfig,
    store: Arc<dyn ShopStore>,
    platform: Arc<dyn PlatformClient>,
    notifier: Arc<dyn Notifier>,
}

impl App {
    /// Assembles the app from its components.
    #[must_use]
    pub fn new(
        config: AppConfig,
        store: Arc<dyn ShopStore>,
        platform: Arc<dyn PlatformClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            store,
            platform,
            notifier,
        }
    }

    /// The configuration this app was assembled with.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Starts an install: builds the authorization URL to redirect the
    /// merchant to.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::MissingHostConfig`] if no host is configured.
    pub fn authorize_url(
        &self,
        shop: &ShopDomain,
        state: Option<&str>,
    ) -> Result<AuthorizeRedirect, OAuthError> {
        authorize_url(&self.config, shop, state)
    }

    /// Completes an install from the OAuth callback.
    ///
    /// Exchanges the code, persists the shop, registers required webhooks,
    /// and announces the install. Webhook registration is best-effort; its
    /// outcome is reflected in the returned summary's `webhooks_configured`
    /// rather than failing the callback.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError`] when the code exchange or persistence fails.
    pub async fn oauth_callback(
        &self,
        shop_domain: &ShopDomain,
        code: &str,
    ) -> Result<ShopSummary, InstallError> {
        let shop = install_shop(
            &self.config,
            self.store.as_ref(),
            self.platform.as_ref(),
            shop_domain,
            code,
        )
        .await?;

        let registered = register_required(
            &self.config,
            self.store.as_ref(),
            self.platform.as_ref(),
            &shop,
        )
        .await?;

        let mut summary = match self.store.find_by_domain(shop_domain).await? {
            Some(current) => ShopSummary::from(&current),
            None => ShopSummary::from(&shop),
        };
        summary.webhooks_configured = registered;

        let notification = Notification::new(
            NotifyKind::Success,
            "Shop installed",
            format!("{shop_domain} installed the app"),
        )
        .field("Scopes", summary.scopes.to_string())
        .field("Webhooks", if registered { "registered" } else { "incomplete" });
        self.notifier.notify(&notification).await;

        Ok(summary)
    }

    /// Handles a webhook delivery.
    ///
    /// `topic_segment` comes from the delivery path, the other arguments
    /// from the `X-Shopify-Shop-Domain` and `X-Shopify-Hmac-SHA256` headers
    /// and the raw body. Verification runs before the body is interpreted;
    /// the old secret key, when configured, is tried as a rotation fallback.
    pub async fn handle_webhook(
        &self,
        topic_segment: &str,
        shop_domain_header: &str,
        signature: &str,
        body: &[u8],
    ) -> WebhookResponse {
        if !self.signature_ok(body, signature) {
            warn!(segment = %topic_segment, "Webhook signature verification failed");
            return WebhookResponse::Unauthorized;
        }

        let shop_domain = match ShopDomain::new(shop_domain_header) {
            Ok(domain) => domain,
            Err(e) => {
                // Signature already verified, so this is a platform bug or
                // a misrouted delivery, not an attack.
                warn!(header = %shop_domain_header, error = %e, "Malformed shop domain header");
                return WebhookResponse::ServerError;
            }
        };

        match dispatch(
            self.store.as_ref(),
            self.notifier.as_ref(),
            topic_segment,
            &shop_domain,
            body,
        )
        .await
        {
            Ok(_) => WebhookResponse::Ok,
            Err(e) => {
                error!(shop = %shop_domain, segment = %topic_segment, error = %e, "Webhook processing failed");
                WebhookResponse::ServerError
            }
        }
    }

    fn signature_ok(&self, body: &[u8], signature: &str) -> bool {
        if verify_signature(body, signature, self.config.api_secret_key().as_ref()) {
            return true;
        }
        self.config
            .old_api_secret_key()
            .is_some_and(|old| verify_signature(body, signature, old.as_ref()))
    }

    /// Number of shops with the app currently installed.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn active_shop_count(&self) -> Result<usize, StoreError> {
        analytics::active_shop_count(self.store.as_ref()).await
    }

    /// Active shops installed within the last `window`, newest first.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn recent_installs(&self, window: Duration) -> Result<Vec<ShopSummary>, StoreError> {
        analytics::recent_installs(self.store.as_ref(), window).await
    }

    /// Active shops whose required webhooks did not all register.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn shops_missing_webhooks(&self) -> Result<Vec<ShopSummary>, StoreError> {
        analytics::shops_missing_webhooks(self.store.as_ref()).await
    }
}
