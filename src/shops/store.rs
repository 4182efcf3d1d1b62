//! Shop persistence.
//!
//! [`ShopStore`] is the trait seam for persistence; [`MemoryShopStore`] is
//! the bundled in-process implementation backed by a `RwLock`. Production
//! deployments swap in a database-backed store behind the same trait.

use crate::config::ShopDomain;
use crate::shops::model::{Shop, WebhookRecord};
use crate::BoxFuture;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use thiserror::Error;

/// Errors returned by a shop store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No shop with the given id exists.
    #[error("Shop {id} not found")]
    ShopNotFound {
        /// The missing shop id.
        id: u64,
    },

    /// The storage backend failed.
    #[error("Store backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },
}

/// Persistence for shops and their webhook subscription records.
///
/// Shops are keyed by domain. Implementations assign ids on insert and
/// refresh `updated_at` on every write.
pub trait ShopStore: Send + Sync {
    /// Looks up a shop by domain.
    fn find_by_domain<'a>(
        &'a self,
        domain: &'a ShopDomain,
    ) -> BoxFuture<'a, Result<Option<Shop>, StoreError>>;

    /// Inserts or replaces a shop, keyed by domain.
    ///
    /// A shop with id `0` gets a fresh id assigned; otherwise the stored
    /// record is replaced. Returns the stored shop with its id set.
    fn upsert<'a>(&'a self, shop: Shop) -> BoxFuture<'a, Result<Shop, StoreError>>;

    /// Deletes a shop and all of its webhook records.
    ///
    /// Returns `true` if a shop existed.
    fn delete<'a>(&'a self, domain: &'a ShopDomain) -> BoxFuture<'a, Result<bool, StoreError>>;

    /// Records a webhook subscription for a shop.
    ///
    /// Fails with [`StoreError::ShopNotFound`] if the shop id is unknown.
    fn add_webhook_record<'a>(
        &'a self,
        record: WebhookRecord,
    ) -> BoxFuture<'a, Result<WebhookRecord, StoreError>>;

    /// Returns all webhook records for a shop.
    fn webhook_records<'a>(
        &'a self,
        shop_id: u64,
    ) -> BoxFuture<'a, Result<Vec<WebhookRecord>, StoreError>>;

    /// Marks all of a shop's webhook records inactive.
    ///
    /// Used on uninstall: the rows stay as history, but no longer count as
    /// live registrations, so a reinstall registers from scratch.
    fn deactivate_webhook_records<'a>(
        &'a self,
        shop_id: u64,
    ) -> BoxFuture<'a, Result<(), StoreError>>;

    /// Returns every stored shop.
    fn all_shops<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Shop>, StoreError>>;
}

#[derive(Debug, Default)]
struct MemoryState {
    shops: HashMap<String, Shop>,
    records: Vec<WebhookRecord>,
    next_shop_id: u64,
    next_record_id: u64,
}

/// In-process [`ShopStore`] for tests and single-node deployments.
#[derive(Debug, Default)]
pub struct MemoryShopStore {
    state: RwLock<MemoryState>,
}

impl MemoryShopStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShopStore for MemoryShopStore {
    fn find_by_domain<'a>(
        &'a self,
        domain: &'a ShopDomain,
    ) -> BoxFuture<'a, Result<Option<Shop>, StoreError>> {
        Box::pin(async move {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            Ok(state.shops.get(domain.as_ref()).cloned())
        })
    }

    fn upsert<'a>(&'a self, mut shop: Shop) -> BoxFuture<'a, Result<Shop, StoreError>> {
        Box::pin(async move {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if shop.id == 0 {
                state.next_shop_id += 1;
                shop.id = state.next_shop_id;
            }
            shop.updated_at = Utc::now();
            state
                .shops
                .insert(shop.domain.as_ref().to_string(), shop.clone());
            Ok(shop)
        })
    }

    fn delete<'a>(&'a self, domain: &'a ShopDomain) -> BoxFuture<'a, Result<bool, StoreError>> {
        Box::pin(async move {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            match state.shops.remove(domain.as_ref()) {
                Some(shop) => {
                    state.records.retain(|r| r.shop_id != shop.id);
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    fn add_webhook_record<'a>(
        &'a self,
        mut record: WebhookRecord,
    ) -> BoxFuture<'a, Result<WebhookRecord, StoreError>> {
        Box::pin(async move {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if !state.shops.values().any(|s| s.id == record.shop_id) {
                return Err(StoreError::ShopNotFound {
                    id: record.shop_id,
                });
            }
            if record.id == 0 {
                state.next_record_id += 1;
                record.id = state.next_record_id;
            }
            record.updated_at = Utc::now();
            state.records.push(record.clone());
            Ok(record)
        })
    }

    fn webhook_records<'a>(
        &'a self,
        shop_id: u64,
    ) -> BoxFuture<'a, Result<Vec<WebhookRecord>, StoreError>> {
        Box::pin(async move {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            Ok(state
                .records
                .iter()
                .filter(|r| r.shop_id == shop_id)
                .cloned()
                .collect())
        })
    }

    fn deactivate_webhook_records<'a>(
        &'a self,
        shop_id: u64,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let now = Utc::now();
            for record in state.records.iter_mut().filter(|r| r.shop_id == shop_id) {
                record.is_active = false;
                record.updated_at = now;
            }
            Ok(())
        })
    }

    fn all_shops<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Shop>, StoreError>> {
        Box::pin(async move {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            Ok(state.shops.values().cloned().collect())
        })
    }
}
