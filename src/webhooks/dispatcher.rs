//! Webhook dispatch.
//!
//! Takes a verified webhook (topic path segment, shop domain, raw body) and
//! routes it to the handler for its topic group. Any delivery for a known
//! shop bumps that shop's activity timestamp, whether or not the topic is
//! recognized.

use crate::config::ShopDomain;
use crate::notify::{Notification, Notifier, NotifyKind};
use crate::shops::ShopStore;
use crate::webhooks::errors::WebhookError;
use crate::webhooks::payloads::{OrderEvent, ProductEvent, UninstallEvent};
use crate::webhooks::topics::{TopicGroup, WebhookTopic};
use tracing::{info, warn};

/// What happened to a dispatched webhook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler processed the payload.
    Handled,
    /// The topic is not one this app handles; the delivery was dropped.
    Ignored,
}

/// Dispatches a verified webhook to its topic handler.
///
/// `topic_segment` is the hyphenated form from the delivery path
/// (`orders-create`). An unrecognized segment is logged and ignored rather
/// than failed, so stray subscriptions do not cause redelivery storms.
///
/// Handler failures produce one error notification before the error is
/// returned, so the operator hears about payloads that will be redelivered.
///
/// # Errors
///
/// Returns [`WebhookError::PayloadParse`] when the body does not parse for
/// its topic and [`WebhookError::Store`] when persistence fails.
pub async fn dispatch(
    store: &dyn ShopStore,
    notifier: &dyn Notifier,
    topic_segment: &str,
    shop_domain: &ShopDomain,
    body: &[u8],
) -> Result<DispatchOutcome, WebhookError> {
    touch_shop(store, shop_domain).await?;

    let Some(topic) = WebhookTopic::from_path_segment(topic_segment) else {
        warn!(shop = %shop_domain, segment = %topic_segment, "Unrecognized webhook topic, ignoring");
        return Ok(DispatchOutcome::Ignored);
    };

    let result = match topic.group() {
        TopicGroup::Order => handle_order(notifier, topic, shop_domain, body).await,
        TopicGroup::Product => handle_product(notifier, topic, shop_domain, body).await,
        TopicGroup::Uninstall => handle_uninstall(store, notifier, topic, shop_domain, body).await,
    };

    match result {
        Ok(()) => Ok(DispatchOutcome::Handled),
        Err(e) => {
            let notification = Notification::new(
                NotifyKind::Error,
                "Webhook processing failed",
                e.to_string(),
            )
            .field("Shop", shop_domain.as_ref())
            .field("Topic", topic.as_str());
            notifier.notify(&notification).await;
            Err(e)
        }
    }
}

/// Records that the shop is alive. A delivery for an unknown shop is normal
/// (uninstall webhooks can outlive the record) and is not an error.
async fn touch_shop(store: &dyn ShopStore, shop_domain: &ShopDomain) -> Result<(), WebhookError> {
    if let Some(mut shop) = store.find_by_domain(shop_domain).await? {
        shop.last_activity_at = chrono::Utc::now();
        store.upsert(shop).await?;
    }
    Ok(())
}

fn parse_payload<T: serde::de::DeserializeOwned>(
    topic: WebhookTopic,
    body: &[u8],
) -> Result<T, WebhookError> {
    serde_json::from_slice(body).map_err(|e| WebhookError::PayloadParse {
        topic: topic.as_str().to_string(),
        message: e.to_string(),
    })
}

/// Formats a human-readable order summary for the operator channel.
async fn handle_order(
    notifier: &dyn Notifier,
    topic: WebhookTopic,
    shop_domain: &ShopDomain,
    body: &[u8],
) -> Result<(), WebhookError> {
    let event: OrderEvent = parse_payload(topic, body)?;
    info!(
        shop = %shop_domain,
        topic = %topic,
        order = event.name.as_deref().unwrap_or("<unnamed>"),
        total = event.total_price.as_deref().unwrap_or("?"),
        "Order event"
    );

    let notification = Notification::new(
        NotifyKind::Info,
        format!("Order event: {topic}"),
        format!(
            "{} on {shop_domain}",
            event.name.as_deref().unwrap_or("<unnamed order>")
        ),
    )
    .field(
        "Total",
        format!(
            "{} {}",
            event.total_price.as_deref().unwrap_or("?"),
            event.currency.as_deref().unwrap_or("?")
        ),
    )
    .field(
        "Status",
        event.financial_status.as_deref().unwrap_or("?").to_string(),
    )
    .field(
        "Customer",
        event
            .customer
            .as_ref()
            .and_then(|c| c.email.as_deref())
            .unwrap_or("<no email>")
            .to_string(),
    );
    notifier.notify(&notification).await;

    Ok(())
}

/// Formats a human-readable product summary for the operator channel.
async fn handle_product(
    notifier: &dyn Notifier,
    topic: WebhookTopic,
    shop_domain: &ShopDomain,
    body: &[u8],
) -> Result<(), WebhookError> {
    let event: ProductEvent = parse_payload(topic, body)?;
    info!(
        shop = %shop_domain,
        topic = %topic,
        title = event.title.as_deref().unwrap_or("<untitled>"),
        variants = event.variant_count(),
        "Product event"
    );

    let notification = Notification::new(
        NotifyKind::Info,
        format!("Product event: {topic}"),
        format!(
            "{} on {shop_domain}",
            event.title.as_deref().unwrap_or("<untitled product>")
        ),
    )
    .field("Type", event.product_type.as_deref().unwrap_or("?").to_string())
    .field("Vendor", event.vendor.as_deref().unwrap_or("?").to_string())
    .field("Status", event.status.as_deref().unwrap_or("?").to_string())
    .field("Variants", event.variant_count().to_string());
    notifier.notify(&notification).await;

    Ok(())
}

/// Deactivates the shop. Runs to completion even when the shop record is
/// already gone, so the operator notification still goes out.
async fn handle_uninstall(
    store: &dyn ShopStore,
    notifier: &dyn Notifier,
    topic: WebhookTopic,
    shop_domain: &ShopDomain,
    body: &[u8],
) -> Result<(), WebhookError> {
    let event: UninstallEvent = parse_payload(topic, body)?;

    if let Some(mut shop) = store.find_by_domain(shop_domain).await? {
        shop.mark_uninstalled();
        let shop = store.upsert(shop).await?;
        // registration rows become history so a reinstall registers anew
        store.deactivate_webhook_records(shop.id).await?;
        info!(shop = %shop_domain, "Shop marked uninstalled");
    } else {
        warn!(shop = %shop_domain, "Uninstall for unknown shop");
    }

    let notification = Notification::new(
        NotifyKind::Info,
        "App uninstalled",
        format!("{shop_domain} uninstalled the app"),
    )
    .field(
        "Shop name",
        event.name.as_deref().unwrap_or("<unknown>").to_string(),
    );
    notifier.notify(&notification).await;

    Ok(())
}
