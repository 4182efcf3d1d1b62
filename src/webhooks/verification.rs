//! Webhook signature verification.
//!
//! The platform signs every webhook body with HMAC-SHA256 keyed by the app's
//! API secret and sends the base64-encoded signature in the
//! `X-Shopify-Hmac-SHA256` header. Verification recomputes the signature
//! over the raw body bytes and compares in constant time.
//!
//! Key rotation is handled one level up: the caller retries with the old
//! secret key when the primary fails.

use base64::prelude::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the base64-encoded HMAC-SHA256 signature of a payload.
///
/// Takes raw bytes so the exact body is signed without UTF-8 interpretation.
///
/// # Example
///
/// ```rust
/// use shopify_lifecycle::webhooks::compute_signature;
///
/// let sig = compute_signature(b"payload", "secret-key");
/// assert_eq!(sig.len(), 44); // 32 bytes of SHA256 output in base64
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(payload: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}

/// Verifies a webhook signature against a payload.
///
/// Returns `false` for a missing or malformed signature and for an empty
/// secret; never panics. The comparison is constant-time.
///
/// # Example
///
/// ```rust
/// use shopify_lifecycle::webhooks::{compute_signature, verify_signature};
///
/// let body = b"{\"id\":1}";
/// let sig = compute_signature(body, "secret");
/// assert!(verify_signature(body, &sig, "secret"));
/// assert!(!verify_signature(body, &sig, "other-secret"));
/// assert!(!verify_signature(body, "", "secret"));
/// ```
#[must_use]
pub fn verify_signature(payload: &[u8], signature: &str, secret: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    let expected = compute_signature(payload, secret);
    constant_time_eq(signature, &expected)
}

/// Constant-time string equality.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_signature_verifies() {
        let body = b"{\"order_id\": 42}";
        let sig = compute_signature(body, "my-secret");
        assert!(verify_signature(body, &sig, "my-secret"));
    }

    #[test]
    fn test_tampered_body_fails() {
        let sig = compute_signature(b"original", "my-secret");
        assert!(!verify_signature(b"tampered", &sig, "my-secret"));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let body = b"payload";
        let sig = compute_signature(body, "my-secret");
        assert!(!verify_signature(body, &sig, "another-secret"));
    }

    #[test]
    fn test_empty_signature_fails() {
        assert!(!verify_signature(b"payload", "", "my-secret"));
    }

    #[test]
    fn test_empty_secret_never_verifies() {
        let sig = compute_signature(b"payload", "");
        assert!(!verify_signature(b"payload", &sig, ""));
    }

    #[test]
    fn test_garbage_signature_does_not_panic() {
        assert!(!verify_signature(b"payload", "not base64 at all!!", "secret"));
    }

    #[test]
    fn test_empty_body_is_signable() {
        let sig = compute_signature(b"", "secret");
        assert!(verify_signature(b"", &sig, "secret"));
    }
}
