//! Discord webhook notifier.

use crate::notify::{Notification, Notifier, NotifyKind};
use crate::BoxFuture;
use serde::Serialize;
use tracing::{debug, warn};

const COLOR_INFO: u32 = 0x3498_db;
const COLOR_SUCCESS: u32 = 0x2ecc_71;
const COLOR_ERROR: u32 = 0xe74c_3c;

#[derive(Debug, Serialize)]
struct EmbedField<'a> {
    name: &'a str,
    value: &'a str,
    inline: bool,
}

#[derive(Debug, Serialize)]
struct Embed<'a> {
    title: &'a str,
    description: &'a str,
    color: u32,
    fields: Vec<EmbedField<'a>>,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    embeds: [Embed<'a>; 1],
}

/// Sends notifications to a Discord channel through an incoming webhook URL.
///
/// The webhook URL embeds a credential, so `Debug` redacts it.
#[derive(Clone)]
pub struct DiscordNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl std::fmt::Debug for DiscordNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordNotifier")
            .field("webhook_url", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Default timeout for notification delivery.
const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

impl DiscordNotifier {
    /// Creates a notifier posting to the given incoming webhook URL, with a
    /// 10 second delivery timeout.
    #[must_use]
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self::with_timeout(webhook_url, DEFAULT_TIMEOUT)
    }

    /// Creates a notifier with an explicit delivery timeout.
    #[must_use]
    pub fn with_timeout(webhook_url: impl Into<String>, timeout: std::time::Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }

    const fn color_for(kind: NotifyKind) -> u32 {
        match kind {
            NotifyKind::Info => COLOR_INFO,
            NotifyKind::Success => COLOR_SUCCESS,
            NotifyKind::Error => COLOR_ERROR,
        }
    }
}

impl Notifier for DiscordNotifier {
    fn notify<'a>(&'a self, notification: &'a Notification) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            let payload = WebhookPayload {
                embeds: [Embed {
                    title: &notification.title,
                    description: &notification.body,
                    color: Self::color_for(notification.kind),
                    fields: notification
                        .fields
                        .iter()
                        .map(|(name, value)| EmbedField {
                            name,
                            value,
                            inline: true,
                        })
                        .collect(),
                    timestamp: chrono::Utc::now().to_rfc3339(),
                }],
            };

            let result = self
                .client
                .post(&self.webhook_url)
                .json(&payload)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    debug!(title = %notification.title, "Notification delivered");
                    true
                }
                Ok(response) => {
                    warn!(
                        status = response.status().as_u16(),
                        title = %notification.title,
                        "Notification rejected"
                    );
                    false
                }
                Err(e) => {
                    warn!(error = %e, title = %notification.title, "Notification delivery failed");
                    false
                }
            }
        })
    }
}
