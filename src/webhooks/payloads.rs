//! Typed webhook payloads.
//!
//! Each dispatch group has one payload type that extracts the fields this
//! app cares about; everything else in the body is ignored. Fields are
//! optional wherever the platform is known to omit them.

use serde::Deserialize;

/// Payload of `orders/create` and `orders/updated` webhooks.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct OrderEvent {
    /// Platform id of the order.
    pub id: Option<u64>,
    /// Human-readable order name (e.g. `#1001`).
    pub name: Option<String>,
    /// Total price as a decimal string.
    pub total_price: Option<String>,
    /// ISO currency code.
    pub currency: Option<String>,
    /// Payment state (e.g. `paid`, `pending`, `refunded`).
    pub financial_status: Option<String>,
    /// Customer on the order, if present.
    pub customer: Option<OrderCustomer>,
}

/// The customer block inside an order payload.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct OrderCustomer {
    /// Customer email address.
    pub email: Option<String>,
}

/// Payload of `products/create` and `products/update` webhooks.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ProductEvent {
    /// Platform id of the product.
    pub id: Option<u64>,
    /// Product title.
    pub title: Option<String>,
    /// Merchant-defined product type.
    pub product_type: Option<String>,
    /// Vendor name.
    pub vendor: Option<String>,
    /// Publication status (e.g. `active`, `draft`).
    pub status: Option<String>,
    /// Variants of the product; only the count is used downstream.
    #[serde(default)]
    pub variants: Vec<serde_json::Value>,
}

impl ProductEvent {
    /// Number of variants on the product.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}

/// Payload of the `app/uninstalled` webhook.
///
/// The body is a snapshot of the shop resource. All fields are optional;
/// uninstall handling must proceed even on an empty body.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct UninstallEvent {
    /// Platform id of the shop.
    pub id: Option<u64>,
    /// Display name of the shop.
    pub name: Option<String>,
    /// Contact email of the shop.
    pub email: Option<String>,
    /// Primary (non-myshopify) domain.
    pub domain: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_event_extracts_known_fields() {
        let event: OrderEvent = serde_json::from_str(
            r##"{
                "id": 820982911946154508,
                "name": "#1001",
                "total_price": "49.99",
                "currency": "USD",
                "financial_status": "paid",
                "customer": {"email": "buyer@example.com", "first_name": "Jo"},
                "line_items": [{"sku": "ignored"}]
            }"##,
        )
        .unwrap();

        assert_eq!(event.total_price.as_deref(), Some("49.99"));
        assert_eq!(event.financial_status.as_deref(), Some("paid"));
        assert_eq!(
            event.customer.unwrap().email.as_deref(),
            Some("buyer@example.com")
        );
    }

    #[test]
    fn test_order_event_tolerates_missing_fields() {
        let event: OrderEvent = serde_json::from_str("{}").unwrap();
        assert!(event.total_price.is_none());
        assert!(event.customer.is_none());
    }

    #[test]
    fn test_product_event_counts_variants() {
        let event: ProductEvent = serde_json::from_str(
            r#"{
                "id": 788032119674292922,
                "title": "Example Shirt",
                "product_type": "Shirts",
                "vendor": "Acme",
                "status": "active",
                "variants": [{"id": 1}, {"id": 2}, {"id": 3}]
            }"#,
        )
        .unwrap();

        assert_eq!(event.title.as_deref(), Some("Example Shirt"));
        assert_eq!(event.variant_count(), 3);
    }

    #[test]
    fn test_product_event_defaults_variants_to_empty() {
        let event: ProductEvent = serde_json::from_str(r#"{"title": "Bare"}"#).unwrap();
        assert_eq!(event.variant_count(), 0);
    }

    #[test]
    fn test_uninstall_event_parses_empty_body() {
        let event: UninstallEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event, UninstallEvent::default());
    }
}
