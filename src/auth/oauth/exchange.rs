//! Authorization code exchange.
//!
//! Second step of the install flow: trade the single-use authorization code
//! from the callback for a permanent offline access token.

use crate::auth::oauth::error::OAuthError;
use crate::auth::AuthScopes;
use crate::config::{AccessToken, AppConfig, ShopDomain};
use serde::{Deserialize, Serialize};

/// Request body for the access token endpoint.
#[derive(Debug, Serialize)]
struct ExchangeRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

/// Raw response body from the access token endpoint.
#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    access_token: String,
    scope: String,
}

/// An access token granted by the platform, with the scopes actually granted.
///
/// The granted scopes can differ from the requested ones; callers should
/// persist what was granted, not what was asked for.
#[derive(Clone, Debug)]
pub struct TokenGrant {
    /// The offline access token for the shop.
    pub access_token: AccessToken,
    /// The scopes the merchant actually granted.
    pub scopes: AuthScopes,
}

/// Exchanges an authorization code for an access token.
///
/// POSTs to `/admin/oauth/access_token` on the shop's domain (or the
/// configured Admin API base override) with the app credentials and code.
///
/// # Errors
///
/// Returns [`OAuthError::ExchangeFailed`] when the request fails, the
/// platform returns a non-success status, or the response body cannot be
/// parsed. Network-level failures report status `0`.
pub async fn exchange_token(
    config: &AppConfig,
    shop: &ShopDomain,
    code: &str,
) -> Result<TokenGrant, OAuthError> {
    let base = config.admin_api_base().map_or_else(
        || format!("https://{shop}"),
        |base| base.as_ref().to_string(),
    );
    let url = format!("{base}/admin/oauth/access_token");

    let body = ExchangeRequest {
        client_id: config.api_key().as_ref(),
        client_secret: config.api_secret_key().as_ref(),
        code,
    };

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .map_err(|e| OAuthError::ExchangeFailed {
            status: 0,
            message: format!("Failed to build HTTP client: {e}"),
        })?;

    let response = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| OAuthError::ExchangeFailed {
            status: 0,
            message: format!("Request failed: {e}"),
        })?;

    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(OAuthError::ExchangeFailed {
            status: status.as_u16(),
            message,
        });
    }

    let parsed: ExchangeResponse =
        response.json().await.map_err(|e| OAuthError::ExchangeFailed {
            status: status.as_u16(),
            message: format!("Invalid token response: {e}"),
        })?;

    let access_token =
        AccessToken::new(parsed.access_token).map_err(|e| OAuthError::ExchangeFailed {
            status: status.as_u16(),
            message: e.to_string(),
        })?;

    let scopes: AuthScopes = parsed.scope.parse().map_err(
        |e: crate::error::ConfigError| OAuthError::ExchangeFailed {
            status: status.as_u16(),
            message: format!("Invalid granted scopes: {e}"),
        },
    )?;

    Ok(TokenGrant {
        access_token,
        scopes,
    })
}
