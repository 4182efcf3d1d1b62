//! OAuth authorization URL generation.
//!
//! First step of the install flow: build the URL on the shop's admin that
//! asks the merchant to grant the configured scopes.

use crate::auth::oauth::error::OAuthError;
use crate::auth::oauth::state::StateParam;
use crate::config::{AppConfig, ShopDomain};

/// Result of initiating an install.
///
/// Redirect the merchant to `auth_url`. The `state` value comes back on the
/// callback as an opaque pass-through.
#[derive(Clone, Debug)]
pub struct AuthorizeRedirect {
    /// The full authorization URL on the shop's admin.
    pub auth_url: String,

    /// The state parameter embedded in the URL.
    pub state: StateParam,
}

/// Builds the authorization URL for a shop.
///
/// The redirect URI is the configured host plus the callback path. When
/// `state` is `None` a random nonce is generated; a caller-provided state
/// is passed through unchanged.
///
/// # Errors
///
/// Returns [`OAuthError::MissingHostConfig`] if no host is configured.
///
/// # Example
///
/// ```rust
/// use shopify_lifecycle::{AppConfig, ApiKey, ApiSecretKey, HostUrl, ShopDomain};
/// use shopify_lifecycle::auth::oauth::authorize_url;
///
/// let config = AppConfig::builder()
///     .api_key(ApiKey::new("api-key").unwrap())
///     .api_secret_key(ApiSecretKey::new("secret").unwrap())
///     .host(HostUrl::new("https://myapp.example.com").unwrap())
///     .scopes("read_orders".parse().unwrap())
///     .build()
///     .unwrap();
///
/// let shop = ShopDomain::new("test-shop").unwrap();
/// let redirect = authorize_url(&config, &shop, None).unwrap();
/// assert!(redirect.auth_url.starts_with("https://test-shop.myshopify.com/admin/oauth/authorize?"));
/// assert!(redirect.auth_url.contains("client_id=api-key"));
/// assert!(redirect.auth_url.contains("scope=read_orders"));
/// ```
pub fn authorize_url(
    config: &AppConfig,
    shop: &ShopDomain,
    state: Option<&str>,
) -> Result<AuthorizeRedirect, OAuthError> {
    let host = config.host().ok_or(OAuthError::MissingHostConfig)?;

    let state = state.map_or_else(StateParam::generate, StateParam::from_raw);

    let redirect_uri = format!("{}{}", host.as_ref(), config.callback_path());

    let params = [
        ("client_id", config.api_key().as_ref()),
        ("scope", &config.scopes().to_string()),
        ("redirect_uri", &redirect_uri),
        ("state", state.as_ref()),
    ];

    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    let auth_url = format!("https://{shop}/admin/oauth/authorize?{query}");

    Ok(AuthorizeRedirect { auth_url, state })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, ApiSecretKey, HostUrl};

    fn config_with_host() -> AppConfig {
        AppConfig::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            .api_secret_key(ApiSecretKey::new("test-secret").unwrap())
            .host(HostUrl::new("https://myapp.example.com").unwrap())
            .scopes("read_orders,read_products".parse().unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_authorize_url_points_at_shop_admin() {
        let shop = ShopDomain::new("example-shop").unwrap();
        let redirect = authorize_url(&config_with_host(), &shop, None).unwrap();

        assert!(redirect
            .auth_url
            .starts_with("https://example-shop.myshopify.com/admin/oauth/authorize?"));
        assert!(redirect.auth_url.contains("client_id=test-key"));
    }

    #[test]
    fn test_redirect_uri_is_host_plus_callback_path_encoded() {
        let shop = ShopDomain::new("example-shop").unwrap();
        let redirect = authorize_url(&config_with_host(), &shop, None).unwrap();

        let expected = urlencoding::encode("https://myapp.example.com/auth/callback").into_owned();
        assert!(redirect.auth_url.contains(&expected));
    }

    #[test]
    fn test_generated_state_appears_in_url() {
        let shop = ShopDomain::new("example-shop").unwrap();
        let redirect = authorize_url(&config_with_host(), &shop, None).unwrap();

        assert_eq!(redirect.state.as_ref().len(), 15);
        assert!(redirect
            .auth_url
            .contains(&format!("state={}", redirect.state)));
    }

    #[test]
    fn test_caller_state_is_passed_through() {
        let shop = ShopDomain::new("example-shop").unwrap();
        let redirect =
            authorize_url(&config_with_host(), &shop, Some("my-opaque-state")).unwrap();

        assert_eq!(redirect.state.as_ref(), "my-opaque-state");
        assert!(redirect.auth_url.contains("state=my-opaque-state"));
    }

    #[test]
    fn test_missing_host_is_an_error() {
        let config = AppConfig::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            .api_secret_key(ApiSecretKey::new("test-secret").unwrap())
            .build()
            .unwrap();
        let shop = ShopDomain::new("example-shop").unwrap();

        let result = authorize_url(&config, &shop, None);
        assert!(matches!(result, Err(OAuthError::MissingHostConfig)));
    }
}
