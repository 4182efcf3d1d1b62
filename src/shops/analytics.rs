//! Read-only queries over the shop store.

use crate::shops::model::{Shop, ShopSummary};
use crate::shops::store::{ShopStore, StoreError};
use chrono::{Duration, Utc};

/// Number of shops with the app currently installed.
///
/// # Errors
///
/// Propagates store failures.
pub async fn active_shop_count(store: &dyn ShopStore) -> Result<usize, StoreError> {
    let shops = store.all_shops().await?;
    Ok(shops.iter().filter(|s| s.is_active).count())
}

/// Active shops installed within the last `window`.
///
/// Sorted newest install first.
///
/// # Errors
///
/// Propagates store failures.
pub async fn recent_installs(
    store: &dyn ShopStore,
    window: Duration,
) -> Result<Vec<ShopSummary>, StoreError> {
    let cutoff = Utc::now() - window;
    let mut shops: Vec<Shop> = store
        .all_shops()
        .await?
        .into_iter()
        .filter(|s| s.is_active && s.installed_at >= cutoff)
        .collect();
    shops.sort_by(|a, b| b.installed_at.cmp(&a.installed_at));
    Ok(shops.iter().map(ShopSummary::from).collect())
}

/// Active shops whose required webhooks did not all register.
///
/// These are candidates for a registration retry.
///
/// # Errors
///
/// Propagates store failures.
pub async fn shops_missing_webhooks(
    store: &dyn ShopStore,
) -> Result<Vec<ShopSummary>, StoreError> {
    let shops = store.all_shops().await?;
    Ok(shops
        .iter()
        .filter(|s| s.is_active && !s.webhooks_configured)
        .map(ShopSummary::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, ShopDomain};
    use crate::shops::store::MemoryShopStore;

    fn shop(domain: &str) -> Shop {
        Shop::new(
            ShopDomain::new(domain).unwrap(),
            AccessToken::new("shpat_token").unwrap(),
            "read_orders".parse().unwrap(),
        )
    }

    #[tokio::test]
    async fn test_active_count_excludes_uninstalled() {
        let store = MemoryShopStore::new();
        store.upsert(shop("shop-a")).await.unwrap();
        let mut gone = shop("shop-b");
        gone.mark_uninstalled();
        store.upsert(gone).await.unwrap();

        assert_eq!(active_shop_count(&store).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_recent_installs_respects_window_and_order() {
        let store = MemoryShopStore::new();
        let mut old = shop("old-shop");
        old.installed_at = Utc::now() - Duration::days(30);
        store.upsert(old).await.unwrap();

        let mut earlier = shop("earlier-shop");
        earlier.installed_at = Utc::now() - Duration::hours(2);
        store.upsert(earlier).await.unwrap();
        store.upsert(shop("new-shop")).await.unwrap();

        let recent = recent_installs(&store, Duration::days(7)).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].domain.shop_name(), "new-shop");
        assert_eq!(recent[1].domain.shop_name(), "earlier-shop");
    }

    #[tokio::test]
    async fn test_missing_webhooks_only_lists_active_unconfigured() {
        let store = MemoryShopStore::new();
        let mut done = shop("configured-shop");
        done.webhooks_configured = true;
        store.upsert(done).await.unwrap();
        store.upsert(shop("pending-shop")).await.unwrap();
        let mut gone = shop("gone-shop");
        gone.mark_uninstalled();
        store.upsert(gone).await.unwrap();

        let missing = shops_missing_webhooks(&store).await.unwrap();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].domain.shop_name(), "pending-shop");
    }
}
