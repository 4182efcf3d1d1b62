//! Operator notifications.
//!
//! Lifecycle events (installs, uninstalls, handler failures) produce a
//! [`Notification`] that is delivered through a [`Notifier`]. Delivery is
//! best-effort: a failed notification is logged and swallowed, never
//! propagated to the webhook or install path that produced it.

mod discord;

pub use discord::DiscordNotifier;

use crate::BoxFuture;

/// Severity of a notification, mapped to presentation by the notifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyKind {
    /// Routine lifecycle event.
    Info,
    /// Something completed successfully.
    Success,
    /// Something failed and may need operator attention.
    Error,
}

/// A message for the operator channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub kind: NotifyKind,
    /// Short headline.
    pub title: String,
    /// Longer description.
    pub body: String,
    /// Key/value details rendered under the body.
    pub fields: Vec<(String, String)>,
}

impl Notification {
    /// Creates a notification with no detail fields.
    #[must_use]
    pub fn new(kind: NotifyKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a detail field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

/// Delivery channel for operator notifications.
///
/// Returns whether delivery succeeded; implementations log failures rather
/// than surfacing them.
pub trait Notifier: Send + Sync {
    /// Sends a notification, best-effort.
    fn notify<'a>(&'a self, notification: &'a Notification) -> BoxFuture<'a, bool>;
}

/// A [`Notifier`] that drops everything. Useful in tests and deployments
/// without an operator channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify<'a>(&'a self, _notification: &'a Notification) -> BoxFuture<'a, bool> {
        Box::pin(async { true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_appends_fields_in_order() {
        let n = Notification::new(NotifyKind::Success, "Installed", "A shop installed")
            .field("Shop", "test-shop.myshopify.com")
            .field("Plan", "basic");
        assert_eq!(n.fields.len(), 2);
        assert_eq!(n.fields[0].0, "Shop");
        assert_eq!(n.fields[1].1, "basic");
    }

    #[tokio::test]
    async fn test_null_notifier_reports_success() {
        let n = Notification::new(NotifyKind::Info, "t", "b");
        assert!(NullNotifier.notify(&n).await);
    }
}
