//! Shop records, persistence, and the install flow.

pub mod analytics;
mod installer;
mod model;
mod store;

pub use installer::{install_shop, InstallError};
pub use model::{Shop, ShopSummary, WebhookRecord};
pub use store::{MemoryShopStore, ShopStore, StoreError};
