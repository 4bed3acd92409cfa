//! OAuth2 client-credentials authentication pipeline.
//!
//! Three pieces cooperate to keep every request authenticated:
//!
//! - [`TokenEndpoint`] performs the client-credentials exchange against
//!   `POST /connect/token` and collapses every failure to the empty token.
//! - [`TokenProvider`] owns the cached [`AccessToken`] behind a single
//!   async mutex: the expiry check and the refresh happen inside the same
//!   critical section, so concurrent callers trigger at most one fetch.
//! - [`AuthenticationHandler`] decorates each outgoing request with
//!   `Authorization: Bearer <token>` before handing it to the transport.
//!
//! The provider is generic over [`AcquireToken`] and [`Clock`] so that
//! tests can count fetches and simulate the passage of time.

mod credentials;
mod endpoint;
mod handler;
mod provider;
mod secret;
mod token;

pub use self::credentials::Credentials;
pub use self::endpoint::TokenEndpoint;
pub use self::handler::{AuthenticationHandler, HttpTransport, RequestHandler};
pub use self::provider::{AcquireToken, Clock, SystemClock, TokenProvider};
pub use self::secret::SecureString;
pub use self::token::AccessToken;
