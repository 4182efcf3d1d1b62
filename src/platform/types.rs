//! Admin API response types.

use serde::Deserialize;

/// Shop metadata fetched from the Admin API after install.
///
/// Every field is optional; the platform omits fields depending on plan and
/// API version, and a missing field never fails an install.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ShopInfo {
    /// Display name of the shop.
    pub name: Option<String>,
    /// Contact email of the shop.
    pub email: Option<String>,
    /// Name of the shop owner.
    pub shop_owner: Option<String>,
    /// Billing plan identifier.
    pub plan_name: Option<String>,
    /// ISO country code.
    pub country_code: Option<String>,
    /// ISO currency code.
    pub currency: Option<String>,
}

/// Envelope for `GET /shop.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct ShopEnvelope {
    pub shop: ShopInfo,
}

/// Envelope for `POST /webhooks.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct WebhookEnvelope {
    pub webhook: CreatedWebhook,
}

/// The subset of the created webhook subscription we keep.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedWebhook {
    pub id: u64,
}
