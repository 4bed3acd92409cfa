use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A bearer token with an absolute expiry instant.
///
/// Immutable once constructed; the cache replaces tokens wholesale, it
/// never mutates one in place. The [`empty`](AccessToken::empty) sentinel
/// stands in for "no valid token yet" and is expired at every instant.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken {
    value: String,
    #[zeroize(skip)]
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a token from a bearer value and its absolute expiry.
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// The empty sentinel: no value, expired since the dawn of time.
    ///
    /// Cached after a failed exchange so that the next caller retries the
    /// fetch instead of reusing a stale failure.
    pub fn empty() -> Self {
        Self {
            value: String::new(),
            expires_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    /// Returns the bearer credential, possibly the empty string.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the absolute instant after which the token must not be used.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Checks whether the token is still usable at `now`.
    ///
    /// The comparison is strict: a token is invalid at its exact expiry
    /// instant. The sentinel is never valid.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
