//! OAuth state parameter generation.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;

/// Opaque state parameter carried through the OAuth redirect.
///
/// When the caller supplies its own state it is passed through unchanged;
/// otherwise a random 15-character alphanumeric nonce is generated. The
/// value is returned to the app on the callback exactly as sent, and the
/// app treats it as opaque.
///
/// # Example
///
/// ```rust
/// use shopify_lifecycle::auth::oauth::StateParam;
///
/// let state = StateParam::generate();
/// assert_eq!(state.as_ref().len(), 15);
/// assert!(state.as_ref().chars().all(|c| c.is_ascii_alphanumeric()));
///
/// let passed = StateParam::from_raw("return-to:/dashboard");
/// assert_eq!(passed.as_ref(), "return-to:/dashboard");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateParam {
    value: String,
}

// Verify StateParam is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StateParam>();
};

impl StateParam {
    const NONCE_LENGTH: usize = 15;

    /// Generates a random alphanumeric nonce.
    #[must_use]
    pub fn generate() -> Self {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::NONCE_LENGTH)
            .map(char::from)
            .collect();
        Self { value }
    }

    /// Wraps a caller-provided state string without modification.
    #[must_use]
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_15_char_alphanumeric_nonce() {
        let state = StateParam::generate();
        assert_eq!(state.as_ref().len(), 15);
        assert!(state.as_ref().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_nonces_differ() {
        let a = StateParam::generate();
        let b = StateParam::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_raw_preserves_value() {
        let state = StateParam::from_raw("anything at all");
        assert_eq!(state.as_ref(), "anything at all");
        assert_eq!(state.to_string(), "anything at all");
    }
}
