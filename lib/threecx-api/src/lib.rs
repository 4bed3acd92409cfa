//! # threecx-api
//!
//! Typed async client for the 3CX REST API.
//!
//! The crate wraps the PBX's call-control and configuration endpoints behind
//! typed methods, and handles OAuth2 client-credentials authentication
//! transparently: a bearer token is fetched on first use, cached until it
//! expires, refreshed exactly once per expiry (no matter how many requests
//! race for it), and injected into every outgoing request.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use threecx_api::{Credentials, MakeCallParameters, ThreeCxClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ThreeCxClient::builder()
//!     .with_base_url("https://pbx.example.com")
//!     .with_credentials(Credentials::new("client-id", "client-secret"))
//!     .build()?;
//!
//! // Token acquisition happens behind the scenes on the first call.
//! let states = client.call_control().state().await?;
//! for state in &states {
//!     println!("{}: {} participant(s)", state.dn, state.participants.len());
//! }
//!
//! let response = client
//!     .call_control()
//!     .make_call("100", &MakeCallParameters::to_destination("200"))
//!     .await?;
//! println!("call status: {}", response.final_status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Authentication
//!
//! The 3CX token endpoint (`POST /connect/token`) is called with the
//! configured client id and secret using the `client_credentials` grant.
//! Token acquisition never fails loudly: on any transport, status, or
//! deserialization failure the client keeps going with an empty bearer
//! token and lets the PBX reject the request, while the failure itself is
//! reported through [`tracing`] events. See [`auth`] for the moving parts.
//!
//! ## Error Handling
//!
//! Business calls return [`Error`] for transport failures, non-success
//! statuses, and payload mismatches. Errors from token acquisition are
//! never surfaced through these methods.

pub mod auth;
mod call_control;
mod client;
mod configuration;

pub use self::auth::{AccessToken, AcquireToken, Clock, Credentials, SecureString, SystemClock};
pub use self::call_control::{
    ActionResponse, CallControlApi, CallStatus, Device, DnState, MakeCallParameters, Participant,
    ParticipantActionParameters, PartyInfo,
};
pub use self::client::{Error, ThreeCxClient, ThreeCxClientBuilder};
pub use self::configuration::ConfigurationApi;
