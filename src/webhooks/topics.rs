//! Webhook topic names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A webhook topic this app subscribes to.
///
/// The canonical wire form is `resource/event` (e.g. `orders/create`), as it
/// appears in the `X-Shopify-Topic` header and the webhook creation API.
/// Delivery URLs use the hyphenated [`path_segment`](Self::path_segment)
/// form instead, since slashes cannot appear in a single path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WebhookTopic {
    /// An order was created.
    OrdersCreate,
    /// An order was updated.
    OrdersUpdated,
    /// A product was created.
    ProductsCreate,
    /// A product was updated.
    ProductsUpdate,
    /// The app was uninstalled from the shop.
    AppUninstalled,
}

/// Coarse grouping of topics used to pick a dispatch path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopicGroup {
    /// Order lifecycle events.
    Order,
    /// Product lifecycle events.
    Product,
    /// App uninstall.
    Uninstall,
}

impl WebhookTopic {
    /// All topics this crate understands.
    pub const ALL: [Self; 5] = [
        Self::OrdersCreate,
        Self::OrdersUpdated,
        Self::ProductsCreate,
        Self::ProductsUpdate,
        Self::AppUninstalled,
    ];

    /// The canonical `resource/event` name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrdersCreate => "orders/create",
            Self::OrdersUpdated => "orders/updated",
            Self::ProductsCreate => "products/create",
            Self::ProductsUpdate => "products/update",
            Self::AppUninstalled => "app/uninstalled",
        }
    }

    /// The URL-safe form used in delivery paths (`orders-create`).
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::OrdersCreate => "orders-create",
            Self::OrdersUpdated => "orders-updated",
            Self::ProductsCreate => "products-create",
            Self::ProductsUpdate => "products-update",
            Self::AppUninstalled => "app-uninstalled",
        }
    }

    /// Parses a hyphenated path segment back into a topic.
    ///
    /// Case-insensitive, like [`FromStr`]. Returns `None` for segments that
    /// do not name a known topic.
    #[must_use]
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        let normalized = segment.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|topic| topic.path_segment() == normalized)
    }

    /// Returns the dispatch group for this topic.
    #[must_use]
    pub const fn group(self) -> TopicGroup {
        match self {
            Self::OrdersCreate | Self::OrdersUpdated => TopicGroup::Order,
            Self::ProductsCreate | Self::ProductsUpdate => TopicGroup::Product,
            Self::AppUninstalled => TopicGroup::Uninstall,
        }
    }
}

impl fmt::Display for WebhookTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookTopic {
    type Err = UnknownTopic;

    /// Parses the canonical `resource/event` form, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str() == normalized)
            .ok_or_else(|| UnknownTopic {
                topic: s.to_string(),
            })
    }
}

impl TryFrom<String> for WebhookTopic {
    type Error = UnknownTopic;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WebhookTopic> for String {
    fn from(topic: WebhookTopic) -> Self {
        topic.as_str().to_string()
    }
}

/// A topic name outside the set this app subscribes to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown webhook topic: '{topic}'")]
pub struct UnknownTopic {
    /// The unrecognized topic string.
    pub topic: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_form() {
        assert_eq!(
            "orders/create".parse::<WebhookTopic>().unwrap(),
            WebhookTopic::OrdersCreate
        );
        assert_eq!(
            "app/uninstalled".parse::<WebhookTopic>().unwrap(),
            WebhookTopic::AppUninstalled
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "Orders/Create".parse::<WebhookTopic>().unwrap(),
            WebhookTopic::OrdersCreate
        );
        assert_eq!(
            WebhookTopic::from_path_segment("ORDERS-CREATE"),
            Some(WebhookTopic::OrdersCreate)
        );
    }

    #[test]
    fn test_unknown_topic_is_an_error() {
        let result = "customers/create".parse::<WebhookTopic>();
        assert!(matches!(result, Err(UnknownTopic { .. })));
        assert!(WebhookTopic::from_path_segment("customers-create").is_none());
    }

    #[test]
    fn test_path_segment_round_trips() {
        for topic in WebhookTopic::ALL {
            assert_eq!(WebhookTopic::from_path_segment(topic.path_segment()), Some(topic));
        }
    }

    #[test]
    fn test_grouping() {
        assert_eq!(WebhookTopic::OrdersUpdated.group(), TopicGroup::Order);
        assert_eq!(WebhookTopic::ProductsCreate.group(), TopicGroup::Product);
        assert_eq!(WebhookTopic::AppUninstalled.group(), TopicGroup::Uninstall);
    }

    #[test]
    fn test_serde_uses_canonical_form() {
        let json = serde_json::to_string(&WebhookTopic::ProductsUpdate).unwrap();
        assert_eq!(json, r#""products/update""#);
        let topic: WebhookTopic = serde_json::from_str(r#""orders/updated""#).unwrap();
        assert_eq!(topic, WebhookTopic::OrdersUpdated);
    }
}
