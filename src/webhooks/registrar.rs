//! Required webhook registration.
//!
//! After every successful install the registrar walks the configured topic
//! list in order and creates one subscription per topic. Registration is
//! best-effort: one topic failing does not stop the rest, and the aggregate
//! outcome is recorded on the shop as `webhooks_configured`.

use crate::config::AppConfig;
use crate::platform::PlatformClient;
use crate::shops::{Shop, ShopStore, StoreError, WebhookRecord};
use crate::webhooks::WebhookTopic;
use tracing::{info, warn};

/// Registers the configured required topics for a shop.
///
/// Returns `Ok(true)` when every topic registered, `Ok(false)` when any
/// failed. When registration is disabled or no topics are configured,
/// nothing is registered and the outcome is success.
///
/// The aggregate outcome is always persisted as `webhooks_configured` on
/// the shop, including the disabled and empty-list cases, so stored state
/// matches what the caller is told. If the shop is deleted while
/// registration is in flight, the outcome is still returned but nothing is
/// written back.
///
/// # Errors
///
/// Returns [`StoreError::Backend`] when the store itself fails. Upstream
/// registration failures are not errors; they surface as `Ok(false)`.
pub async fn register_required(
    config: &AppConfig,
    store: &dyn ShopStore,
    platform: &dyn PlatformClient,
    shop: &Shop,
) -> Result<bool, StoreError> {
    if !config.webhooks_enabled() || config.required_topics().is_empty() {
        persist_outcome(store, shop, true).await?;
        return Ok(true);
    }

    // A retry after partial success only re-attempts the topics that are
    // still missing; topics with a live record count as registered.
    let existing: Vec<WebhookTopic> = store
        .webhook_records(shop.id)
        .await?
        .into_iter()
        .filter(|r| r.is_active)
        .map(|r| r.topic)
        .collect();

    let mut all_ok = true;
    for &topic in config.required_topics() {
        if existing.contains(&topic) {
            continue;
        }
        if !register_one(config, store, platform, shop, topic).await? {
            all_ok = false;
        }
    }

    persist_outcome(store, shop, all_ok).await?;

    if all_ok {
        info!(shop = %shop.domain, topics = config.required_topics().len(), "All required webhooks registered");
    }

    Ok(all_ok)
}

/// Writes the aggregate flag back onto the stored shop, if it still exists.
async fn persist_outcome(
    store: &dyn ShopStore,
    shop: &Shop,
    all_ok: bool,
) -> Result<(), StoreError> {
    match store.find_by_domain(&shop.domain).await? {
        Some(mut current) => {
            current.webhooks_configured = all_ok;
            store.upsert(current).await?;
        }
        None => {
            warn!(shop = %shop.domain, "Shop deleted during webhook registration, outcome not persisted");
        }
    }
    Ok(())
}

/// Registers a single topic. Returns whether the upstream creation
/// succeeded; store races after a successful creation still count as
/// success.
async fn register_one(
    config: &AppConfig,
    store: &dyn ShopStore,
    platform: &dyn PlatformClient,
    shop: &Shop,
    topic: WebhookTopic,
) -> Result<bool, StoreError> {
    let Some(host) = config.host() else {
        warn!(shop = %shop.domain, topic = %topic, "No host configured, cannot build delivery address");
        return Ok(false);
    };
    let address = format!("{}/webhooks/{}", host.as_ref(), topic.path_segment());

    let upstream_id = match platform
        .create_webhook(&shop.domain, &shop.access_token, topic, &address)
        .await
    {
        Ok(id) => id,
        Err(e) => {
            warn!(shop = %shop.domain, topic = %topic, error = %e, "Webhook registration failed");
            return Ok(false);
        }
    };

    let record = WebhookRecord::new(shop.id, upstream_id, topic, address);
    match store.add_webhook_record(record).await {
        Ok(_) => Ok(true),
        Err(StoreError::ShopNotFound { .. }) => {
            warn!(shop = %shop.domain, topic = %topic, "Shop deleted after upstream registration, record dropped");
            Ok(true)
        }
        Err(e) => Err(e),
    }
}
