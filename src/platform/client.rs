//! Admin API client.

use crate::config::{AccessToken, AppConfig, ShopDomain};
use crate::platform::error::PlatformError;
use crate::platform::types::{ShopEnvelope, ShopInfo, WebhookEnvelope};
use crate::webhooks::WebhookTopic;
use crate::BoxFuture;
use tracing::debug;

/// Admin API version pinned by this crate.
const API_VERSION: &str = "2024-07";

/// Outbound calls to the commerce platform.
///
/// A trait seam so the install flow and registrar can be tested against a
/// fake. The production implementation is [`AdminApiClient`].
pub trait PlatformClient: Send + Sync {
    /// Fetches shop metadata using the shop's access token.
    fn get_shop_info<'a>(
        &'a self,
        shop: &'a ShopDomain,
        token: &'a AccessToken,
    ) -> BoxFuture<'a, Result<ShopInfo, PlatformError>>;

    /// Creates a webhook subscription and returns its upstream id.
    fn create_webhook<'a>(
        &'a self,
        shop: &'a ShopDomain,
        token: &'a AccessToken,
        topic: WebhookTopic,
        address: &'a str,
    ) -> BoxFuture<'a, Result<String, PlatformError>>;
}

/// REST Admin API client backed by [`reqwest`].
///
/// Requests go to `https://{shop-domain}` unless an Admin API base override
/// is configured, in which case all requests go there instead. The shop's
/// access token is sent in the `X-Shopify-Access-Token` header.
#[derive(Clone, Debug)]
pub struct AdminApiClient {
    client: reqwest::Client,
    admin_api_base: Option<String>,
}

impl AdminApiClient {
    /// Creates a client using the configured request timeout and base
    /// override.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Network`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, PlatformError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| PlatformError::Network {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            admin_api_base: config
                .admin_api_base()
                .map(|base| base.as_ref().to_string()),
        })
    }

    fn base_for(&self, shop: &ShopDomain) -> String {
        self.admin_api_base
            .clone()
            .unwrap_or_else(|| format!("https://{shop}"))
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, PlatformError> {
        let response = request.send().await.map_err(|e| PlatformError::Network {
            message: format!("Request failed: {e}"),
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PlatformError::Status {
                code: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| PlatformError::Deserialize {
            message: e.to_string(),
        })
    }
}

impl PlatformClient for AdminApiClient {
    fn get_shop_info<'a>(
        &'a self,
        shop: &'a ShopDomain,
        token: &'a AccessToken,
    ) -> BoxFuture<'a, Result<ShopInfo, PlatformError>> {
        Box::pin(async move {
            let url = format!(
                "{}/admin/api/{API_VERSION}/shop.json",
                self.base_for(shop)
            );
            debug!(shop = %shop, "Fetching shop metadata");

            let request = self
                .client
                .get(&url)
                .header("X-Shopify-Access-Token", token.as_ref());

            let envelope: ShopEnvelope = Self::send_json(request).await?;
            Ok(envelope.shop)
        })
    }

    fn create_webhook<'a>(
        &'a self,
        shop: &'a ShopDomain,
        token: &'a AccessToken,
        topic: WebhookTopic,
        address: &'a str,
    ) -> BoxFuture<'a, Result<String, PlatformError>> {
        Box::pin(async move {
            let url = format!(
                "{}/admin/api/{API_VERSION}/webhooks.json",
                self.base_for(shop)
            );
            debug!(shop = %shop, topic = %topic, "Creating webhook subscription");

            let body = serde_json::json!({
                "webhook": {
                    "topic": topic.to_string(),
                    "address": address,
                    "format": "json",
                }
            });

            let request = self
                .client
                .post(&url)
                .header("X-Shopify-Access-Token", token.as_ref())
                .json(&body);

            let envelope: WebhookEnvelope = Self::send_json(request).await?;
            Ok(envelope.webhook.id.to_string())
        })
    }
}
