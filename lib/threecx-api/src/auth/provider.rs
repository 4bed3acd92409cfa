//! Token cache and refresh coordination.

use std::future::Future;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::token::AccessToken;

/// Source of bearer tokens for the [`TokenProvider`].
///
/// Implementations must never fail outward: a failed exchange is reported
/// through whatever observability the implementation carries and collapses
/// to [`AccessToken::empty`].
pub trait AcquireToken: Send + Sync {
    /// Exchanges credentials for a bearer token, or the empty sentinel on
    /// failure.
    fn acquire(&self) -> impl Future<Output = AccessToken> + Send;
}

/// Source of the current instant, injectable for tests.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time via [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Shared token cache serializing all refresh attempts.
///
/// One provider instance is shared for the lifetime of the process. The
/// cached [`AccessToken`] lives behind a single async [`Mutex`]; every
/// caller, cache hit or refresh, passes through the same critical section
/// so the expiry check and the fetch it may trigger are atomic with
/// respect to each other. If N callers observe an expired token at once,
/// exactly one performs the network exchange and all N receive the value
/// it produced.
pub struct TokenProvider<A, C = SystemClock> {
    acquirer: A,
    clock: C,
    cached: Mutex<AccessToken>,
}

impl<A> TokenProvider<A> {
    /// Creates a provider over the given acquirer, using wall-clock time.
    pub fn new(acquirer: A) -> Self {
        Self::with_clock(acquirer, SystemClock)
    }
}

impl<A, C> TokenProvider<A, C> {
    /// Creates a provider with an explicit clock.
    pub fn with_clock(acquirer: A, clock: C) -> Self {
        Self {
            acquirer,
            clock,
            cached: Mutex::new(AccessToken::empty()),
        }
    }
}

impl<A, C> TokenProvider<A, C>
where
    A: AcquireToken,
    C: Clock,
{
    /// Returns the current bearer token value, fetching one if needed.
    ///
    /// Inside the critical section: a token whose expiry is strictly in
    /// the future is returned as-is, without any network traffic.
    /// Otherwise the acquirer runs and whatever it returns, the sentinel
    /// included, becomes the new cached token. A cached sentinel is
    /// expired by construction, so failures are never sticky: the next
    /// call fetches again.
    ///
    /// Cancelling a caller (dropping its future) cannot corrupt the slot:
    /// the cached token is only ever replaced by a wholesale assignment
    /// after the fetch has completed, so waiters either see the previous
    /// token or a complete new one.
    pub async fn get_access_token(&self) -> String {
        let mut cached = self.cached.lock().await;

        if cached.is_valid_at(self.clock.now()) {
            tracing::debug!("token cache hit");
            return cached.value().to_owned();
        }

        *cached = self.acquirer.acquire().await;
        cached.value().to_owned()
    }
}

impl<A, C> std::fmt::Debug for TokenProvider<A, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider").finish_non_exhaustive()
    }
}
