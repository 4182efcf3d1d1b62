//! Install and reinstall handling.

use crate::auth::oauth::{exchange_token, OAuthError};
use crate::config::{AppConfig, ShopDomain};
use crate::platform::PlatformClient;
use crate::shops::model::Shop;
use crate::shops::store::{ShopStore, StoreError};
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while completing an install.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The OAuth code exchange failed.
    #[error(transparent)]
    OAuth(#[from] OAuthError),

    /// The shop store reported a failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Completes an install for a shop given the callback's authorization code.
///
/// Exchanges the code for an access token, then creates or revives the shop
/// record. A reinstall keeps the record's id and its original install and
/// creation times, but replaces the token and scopes, reactivates the shop,
/// and resets `webhooks_configured` so registration runs again.
///
/// Metadata enrichment is best-effort: if the shop fetch fails the install
/// still succeeds, with metadata fields left as they were.
///
/// # Errors
///
/// Returns [`InstallError::OAuth`] when the code exchange fails and
/// [`InstallError::Store`] when the shop cannot be persisted.
pub async fn install_shop(
    config: &AppConfig,
    store: &dyn ShopStore,
    platform: &dyn PlatformClient,
    shop_domain: &ShopDomain,
    code: &str,
) -> Result<Shop, InstallError> {
    let grant = exchange_token(config, shop_domain, code).await?;

    let mut shop = match store.find_by_domain(shop_domain).await? {
        Some(mut existing) => {
            info!(shop = %shop_domain, "Reinstalling existing shop");
            existing.access_token = grant.access_token;
            existing.scopes = grant.scopes;
            existing.is_active = true;
            existing.uninstalled_at = None;
            // installed_at stays at the first install
            existing.last_activity_at = chrono::Utc::now();
            existing.webhooks_configured = false;
            existing
        }
        None => {
            info!(shop = %shop_domain, "Installing new shop");
            Shop::new(shop_domain.clone(), grant.access_token, grant.scopes)
        }
    };

    match platform.get_shop_info(shop_domain, &shop.access_token).await {
        Ok(info) => shop.apply_metadata(&info),
        Err(e) => {
            warn!(shop = %shop_domain, error = %e, "Shop metadata fetch failed, continuing without it");
        }
    }

    let stored = store.upsert(shop).await?;
    Ok(stored)
}
