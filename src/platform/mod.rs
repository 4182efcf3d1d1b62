//! Commerce platform integration.
//!
//! [`PlatformClient`] is the trait seam for every outbound Admin API call;
//! [`AdminApiClient`] is the REST implementation.

mod client;
mod error;
mod types;

pub use client::{AdminApiClient, PlatformClient};
pub use error::PlatformError;
pub use types::ShopInfo;
