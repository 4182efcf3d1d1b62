//! Integration tests for the OAuth install flow.
//!
//! These run the full callback path through [`App`]: code exchange, shop
//! persistence, metadata enrichment, and webhook registration, against a
//! mock Admin API.

use shopify_lifecycle::notify::{Notification, Notifier, NotifyKind};
use shopify_lifecycle::shops::InstallError;
use shopify_lifecycle::ShopStore;
use shopify_lifecycle::webhooks::WebhookTopic;
use shopify_lifecycle::{
    AdminApiClient, ApiKey, ApiSecretKey, App, AppConfig, BoxFuture, HostUrl, MemoryShopStore,
    ShopDomain,
};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Notifier that records everything it is asked to send.
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify<'a>(&'a self, notification: &'a Notification) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            self.sent.lock().unwrap().push(notification.clone());
            true
        })
    }
}

fn test_config(server: &MockServer, topics: Vec<WebhookTopic>) -> AppConfig {
    AppConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .api_secret_key(ApiSecretKey::new("test-secret").unwrap())
        .host(HostUrl::new("https://myapp.example.com").unwrap())
        .scopes("read_orders,read_products".parse().unwrap())
        .required_topics(topics)
        .admin_api_base(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

fn build_app(
    config: &AppConfig,
) -> (App, Arc<MemoryShopStore>, Arc<RecordingNotifier>) {
    let store = Arc::new(MemoryShopStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let app = App::new(
        config.clone(),
        store.clone(),
        Arc::new(AdminApiClient::new(config).unwrap()),
        notifier.clone(),
    );
    (app, store, notifier)
}

async fn mock_token_exchange(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/admin/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "shpat_installed",
            "scope": "read_orders,read_products",
        })))
        .mount(server)
        .await;
}

async fn mock_shop_info(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/admin/api/[\d-]+/shop\.json$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "shop": {
                "name": "Test Shop",
                "email": "owner@example.com",
                "plan_name": "basic",
                "currency": "USD",
            }
        })))
        .mount(server)
        .await;
}

async fn mock_webhook_creation(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/admin/api/[\d-]+/webhooks\.json$"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "webhook": {"id": 1001}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_install_persists_shop_and_registers_webhooks() {
    let server = MockServer::start().await;
    mock_token_exchange(&server).await;
    mock_shop_info(&server).await;
    mock_webhook_creation(&server).await;

    let config = test_config(
        &server,
        vec![WebhookTopic::OrdersCreate, WebhookTopic::AppUninstalled],
    );
    let (app, store, notifier) = build_app(&config);
    let shop = ShopDomain::new("test-shop").unwrap();

    let summary = app.oauth_callback(&shop, "auth-code").await.unwrap();
    assert_eq!(summary.name.as_deref(), Some("Test Shop"));
    assert_eq!(summary.email.as_deref(), Some("owner@example.com"));
    assert!(summary.webhooks_configured);

    let stored = store.find_by_domain(&shop).await
        .unwrap()
        .unwrap();
    assert!(stored.is_active);
    assert!(stored.webhooks_configured);
    assert_eq!(stored.access_token.as_ref(), "shpat_installed");
    assert_eq!(stored.plan_name.as_deref(), Some("basic"));

    let records = store.webhook_records(stored.id).await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].topic, WebhookTopic::OrdersCreate);
    assert_eq!(
        records[0].address,
        "https://myapp.example.com/webhooks/orders-create"
    );

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, NotifyKind::Success);
    assert_eq!(sent[0].title, "Shop installed");
}

#[tokio::test]
async fn test_reinstall_keeps_id_and_refreshes_token() {
    let server = MockServer::start().await;
    mock_shop_info(&server).await;
    mock_webhook_creation(&server).await;

    Mock::given(method("POST"))
        .and(path("/admin/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "shpat_first",
            "scope": "read_orders",
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "shpat_second",
            "scope": "read_orders,write_products",
        })))
        .mount(&server)
        .await;

    let config = test_config(&server, vec![]);
    let (app, store, _) = build_app(&config);
    let shop = ShopDomain::new("test-shop").unwrap();

    app.oauth_callback(&shop, "code-1").await.unwrap();
    let first = store.find_by_domain(&shop).await
        .unwrap()
        .unwrap();

    app.oauth_callback(&shop, "code-2").await.unwrap();
    let second = store.find_by_domain(&shop).await
        .unwrap()
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.created_at, second.created_at);
    assert_eq!(first.installed_at, second.installed_at);
    assert_eq!(second.access_token.as_ref(), "shpat_second");
    assert!(second.scopes.contains("write_products"));
    assert!(second.is_active);
    assert!(second.uninstalled_at.is_none());

    let all = store.all_shops().await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_failed_code_exchange_fails_install() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/oauth/access_token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad code"))
        .mount(&server)
        .await;

    let config = test_config(&server, vec![]);
    let (app, store, notifier) = build_app(&config);
    let shop = ShopDomain::new("test-shop").unwrap();

    let result = app.oauth_callback(&shop, "bad-code").await;
    assert!(matches!(result, Err(InstallError::OAuth(_))));

    let all = store.all_shops().await
        .unwrap();
    assert!(all.is_empty());
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_metadata_fetch_failure_does_not_fail_install() {
    let server = MockServer::start().await;
    mock_token_exchange(&server).await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/admin/api/[\d-]+/shop\.json$"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config(&server, vec![]);
    let (app, store, _) = build_app(&config);
    let shop = ShopDomain::new("test-shop").unwrap();

    let summary = app.oauth_callback(&shop, "auth-code").await.unwrap();
    assert!(summary.name.is_none());

    let stored = store.find_by_domain(&shop).await
        .unwrap()
        .unwrap();
    assert!(stored.is_active);
    assert_eq!(stored.access_token.as_ref(), "shpat_installed");
}

#[tokio::test]
async fn test_authorize_url_uses_config() {
    let server = MockServer::start().await;
    let config = test_config(&server, vec![]);
    let (app, _, _) = build_app(&config);
    let shop = ShopDomain::new("test-shop").unwrap();

    let redirect = app.authorize_url(&shop, Some("opaque-state")).unwrap();
    assert!(redirect
        .auth_url
        .starts_with("https://test-shop.myshopify.com/admin/oauth/authorize?"));
    assert!(redirect.auth_url.contains("client_id=test-key"));
    assert!(redirect.auth_url.contains("state=opaque-state"));
    assert_eq!(redirect.state.as_ref(), "opaque-state");
}
