use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Wrapper for sensitive string data that zeroes its memory on drop.
///
/// Used for the OAuth2 client secret and anything else that must never
/// leak through `Debug` or `Display` output: both render a masked form
/// instead of the actual value.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    /// Creates a new secure string from the provided value.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner string value.
    ///
    /// The returned reference should not be stored for extended periods
    /// to minimize exposure time of sensitive data.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if the secure string equals the given string slice without
    /// exposing the internal value.
    pub fn equals_str(&self, other: &str) -> bool {
        self.0 == other
    }

    /// Masks sensitive data for display/logging purposes.
    ///
    /// Counts characters rather than bytes so multi-byte UTF-8 secrets never
    /// split on a character boundary.
    fn mask_sensitive(value: &str) -> String {
        let count = value.chars().count();
        if count <= 8 {
            "***".to_string()
        } else {
            let prefix: String = value.chars().take(4).collect();
            let suffix: String = value.chars().skip(count - 4).collect();
            format!("{prefix}...{suffix}")
        }
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureString")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::mask_sensitive(&self.0))
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl Serialize for SecureString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecureString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_redact_debug_output() {
        let secret = SecureString::from("super-secret-value");
        let debug = format!("{secret:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret-value"));
    }

    #[test]
    fn should_mask_display_output() {
        let secret = SecureString::from("super-secret-value");
        assert_eq!(secret.to_string(), "supe...alue");

        let short = SecureString::from("tiny");
        assert_eq!(short.to_string(), "***");
    }

    #[test]
    fn should_mask_multibyte_secrets_on_char_boundaries() {
        let secret = SecureString::from("émeraude-secrète");
        assert_eq!(secret.to_string(), "émer...rète");
    }

    #[test]
    fn should_compare_without_exposing_value() {
        let secret = SecureString::from("value");
        assert!(secret.equals_str("value"));
        assert!(!secret.equals_str("other"));
    }

    #[test]
    fn should_roundtrip_serde() {
        let secret = SecureString::from("value");
        let json = serde_json::to_string(&secret).expect("serialize");
        assert_eq!(json, r#""value""#);
        let back: SecureString = serde_json::from_str(&json).expect("deserialize");
        assert!(back.equals_str("value"));
    }
}
