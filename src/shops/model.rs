//! Shop and webhook subscription records.

use crate::auth::AuthScopes;
use crate::config::{AccessToken, ShopDomain};
use crate::platform::ShopInfo;
use crate::webhooks::WebhookTopic;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A shop that has installed the app.
///
/// One record per shop, keyed by domain. The record persists across
/// uninstall and reinstall; `is_active` and `uninstalled_at` track the
/// current install state.
#[derive(Clone, Debug)]
pub struct Shop {
    /// Store-assigned id. `0` until the store assigns one on first upsert.
    pub id: u64,
    /// The shop's myshopify domain.
    pub domain: ShopDomain,
    /// Offline access token for the shop.
    pub access_token: AccessToken,
    /// Scopes the merchant granted.
    pub scopes: AuthScopes,
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
    /// Whether the app is currently installed.
    pub is_active: bool,
    /// Whether all required webhooks were registered successfully.
    pub webhooks_configured: bool,
    /// When the current install completed.
    pub installed_at: DateTime<Utc>,
    /// Last time a webhook arrived for this shop.
    pub last_activity_at: DateTime<Utc>,
    /// When the app was last uninstalled, if ever.
    pub uninstalled_at: Option<DateTime<Utc>>,
    /// When the record was first created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Shop {
    /// Creates a fresh active shop record for a new install.
    #[must_use]
    pub fn new(domain: ShopDomain, access_token: AccessToken, scopes: AuthScopes) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            domain,
            access_token,
            scopes,
            name: None,
            email: None,
            shop_owner: None,
            plan_name: None,
            country_code: None,
            currency: None,
            is_active: true,
            webhooks_configured: false,
            installed_at: now,
            last_activity_at: now,
            uninstalled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copies platform metadata onto the record.
    ///
    /// Only fields present in `info` are overwritten; absent fields keep
    /// their current values.
    pub fn apply_metadata(&mut self, info: &ShopInfo) {
        if info.name.is_some() {
            self.name.clone_from(&info.name);
        }
        if info.email.is_some() {
            self.email.clone_from(&info.email);
        }
        if info.shop_owner.is_some() {
            self.shop_owner.clone_from(&info.shop_owner);
        }
        if info.plan_name.is_some() {
            self.plan_name.clone_from(&info.plan_name);
        }
        if info.country_code.is_some() {
            self.country_code.clone_from(&info.country_code);
        }
        if info.currency.is_some() {
            self.currency.clone_from(&info.currency);
        }
    }

    /// Marks the shop uninstalled as of now.
    pub fn mark_uninstalled(&mut self) {
        self.is_active = false;
        self.uninstalled_at = Some(Utc::now());
    }
}

/// A webhook subscription created upstream for a shop.
#[derive(Clone, Debug)]
pub struct WebhookRecord {
    /// Store-assigned id. `0` until the store assigns one.
    pub id: u64,
    /// The shop this subscription belongs to.
    pub shop_id: u64,
    /// Id assigned by the platform on creation.
    pub upstream_id: String,
    /// Topic the subscription delivers.
    pub topic: WebhookTopic,
    /// Delivery URL.
    pub address: String,
    /// Whether the subscription is believed live upstream.
    pub is_active: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl WebhookRecord {
    /// Creates an active record for a subscription just created upstream.
    #[must_use]
    pub fn new(
        shop_id: u64,
        upstream_id: impl Into<String>,
        topic: WebhookTopic,
        address: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            shop_id,
            upstream_id: upstream_id.into(),
            topic,
            address: address.into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Serializable projection of a [`Shop`] for boundary responses.
///
/// Deliberately excludes the access token.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ShopSummary {
    /// The shop's myshopify domain.
    pub domain: ShopDomain,
    /// Display name of the shop.
    pub name: Option<String>,
    /// Contact email of the shop.
    pub email: Option<String>,
    /// Scopes the merchant granted, comma-delimited.
    pub scopes: AuthScopes,
    /// Whether all required webhooks were registered.
    pub webhooks_configured: bool,
}

impl From<&Shop> for ShopSummary {
    fn from(shop: &Shop) -> Self {
        Self {
            domain: shop.domain.clone(),
            name: shop.name.clone(),
            email: shop.email.clone(),
            scopes: shop.scopes.clone(),
            webhooks_configured: shop.webhooks_configured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_shop() -> Shop {
        Shop::new(
            ShopDomain::new("test-shop").unwrap(),
            AccessToken::new("shpat_token").unwrap(),
            "read_orders".parse().unwrap(),
        )
    }

    #[test]
    fn test_new_shop_is_active_without_webhooks() {
        let shop = test_shop();
        assert_eq!(shop.id, 0);
        assert!(shop.is_active);
        assert!(!shop.webhooks_configured);
        assert!(shop.uninstalled_at.is_none());
    }

    #[test]
    fn test_apply_metadata_overwrites_only_present_fields() {
        let mut shop = test_shop();
        shop.name = Some("Old Name".to_string());
        shop.currency = Some("USD".to_string());

        shop.apply_metadata(&ShopInfo {
            name: Some("New Name".to_string()),
            email: Some("owner@example.com".to_string()),
            ..ShopInfo::default()
        });

        assert_eq!(shop.name.as_deref(), Some("New Name"));
        assert_eq!(shop.email.as_deref(), Some("owner@example.com"));
        // absent in the update, so preserved
        assert_eq!(shop.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_mark_uninstalled() {
        let mut shop = test_shop();
        shop.mark_uninstalled();
        assert!(!shop.is_active);
        assert!(shop.uninstalled_at.is_some());
    }

    #[test]
    fn test_summary_excludes_access_token() {
        let shop = test_shop();
        let summary = ShopSummary::from(&shop);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("shpat_token"));
        assert!(json.contains("test-shop.myshopify.com"));
    }
}
