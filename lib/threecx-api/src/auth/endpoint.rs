//! OAuth2 client-credentials exchange against the PBX token endpoint.

use chrono::{DateTime, Duration, Utc};
use http::StatusCode;
use http::header::CONTENT_TYPE;
use serde::Deserialize;
use url::Url;

use super::credentials::Credentials;
use super::provider::AcquireToken;
use super::token::AccessToken;

/// Fixed token endpoint path on the PBX base address.
const TOKEN_PATH: &str = "/connect/token";

/// Content type of the token request body.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Internal error taxonomy for a single token exchange.
///
/// Never leaves this module: the public contract of [`TokenEndpoint`] is
/// that every failure collapses to the empty [`AccessToken`] sentinel.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
enum TokenFetchError {
    /// Network-level failure or failure to read the response body.
    #[display("HTTP request failed: {_0}")]
    Transport(reqwest::Error),

    /// Token endpoint answered with a non-success status.
    #[display("token endpoint returned status {status}")]
    #[from(skip)]
    Status {
        /// The non-success status code.
        status: StatusCode,
    },

    /// Response body could not be parsed as a token payload.
    #[display("JSON deserialization failed: {_0}")]
    Json(serde_json::Error),

    /// Form body for the exchange could not be encoded.
    #[display("form encoding failed: {_0}")]
    Form(serde_urlencoded::ser::Error),

    /// Token endpoint answered with a lifetime no expiry instant can
    /// represent.
    #[display("token lifetime out of range: {expires_in} minutes")]
    #[from(skip)]
    Lifetime {
        /// The out-of-range `expires_in` value.
        expires_in: i64,
    },
}

/// Successful token response payload.
///
/// Only `access_token` and `expires_in` are consumed; everything else the
/// endpoint returns (`token_type`, `refresh_token`) is ignored.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    60
}

impl TokenResponse {
    /// Converts the wire payload into an [`AccessToken`] anchored at `now`.
    ///
    /// `expires_in` is applied as **minutes**, not seconds. That is the
    /// lifetime contract the PBX actually honors in production, so it must
    /// not be "corrected" to the conventional OAuth2 seconds.
    ///
    /// A lifetime that overflows the expiry arithmetic counts as a
    /// malformed payload; it must never panic.
    fn into_access_token(self, now: DateTime<Utc>) -> Result<AccessToken, TokenFetchError> {
        let out_of_range = TokenFetchError::Lifetime {
            expires_in: self.expires_in,
        };
        let expires_at = Duration::try_minutes(self.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(out_of_range)?;
        Ok(AccessToken::new(self.access_token, expires_at))
    }
}

/// Leaf component performing the OAuth2 client-credentials exchange.
///
/// One outbound HTTP call per invocation, no retries, no internal state
/// beyond configuration. Failures are reported through [`tracing`] and
/// collapse to [`AccessToken::empty`]; callers never see an error value.
#[derive(Debug, Clone)]
pub struct TokenEndpoint {
    client: reqwest::Client,
    token_url: Url,
    credentials: Credentials,
}

impl TokenEndpoint {
    /// Creates the exchange client for the given PBX base address.
    ///
    /// # Errors
    ///
    /// Returns an error if the token endpoint URL cannot be derived from
    /// the base address.
    pub fn new(
        client: reqwest::Client,
        base_url: &Url,
        credentials: Credentials,
    ) -> Result<Self, url::ParseError> {
        let token_url = base_url.join(TOKEN_PATH)?;
        Ok(Self {
            client,
            token_url,
            credentials,
        })
    }

    /// Exchanges the configured credentials for a bearer token.
    ///
    /// Returns the empty sentinel on any failure (transport, non-success
    /// status, malformed payload) after reporting it as a `tracing` error
    /// event.
    pub async fn request_access_token(&self) -> AccessToken {
        tracing::info!(
            client_id = self.credentials.client_id(),
            "requesting OAuth2 token"
        );

        match self.fetch().await {
            Ok(token) => token,
            Err(TokenFetchError::Transport(error)) => {
                tracing::error!(%error, "HTTP request failed");
                AccessToken::empty()
            }
            Err(TokenFetchError::Status { status }) => {
                tracing::error!(%status, "token endpoint returned non-success status");
                AccessToken::empty()
            }
            Err(TokenFetchError::Json(error)) => {
                tracing::error!(%error, "JSON deserialization failed");
                AccessToken::empty()
            }
            Err(TokenFetchError::Form(error)) => {
                tracing::error!(%error, "form encoding failed");
                AccessToken::empty()
            }
            Err(TokenFetchError::Lifetime { expires_in }) => {
                tracing::error!(expires_in, "token lifetime out of range");
                AccessToken::empty()
            }
        }
    }

    async fn fetch(&self) -> Result<AccessToken, TokenFetchError> {
        let form = [
            ("client_id", self.credentials.client_id()),
            ("client_secret", self.credentials.client_secret().as_str()),
            ("grant_type", self.credentials.grant_type()),
        ];
        let body = serde_urlencoded::to_string(form)?;

        let response = self
            .client
            .post(self.token_url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokenFetchError::Status { status });
        }

        let body = response.text().await?;
        let payload: TokenResponse = serde_json::from_str(&body)?;

        payload.into_access_token(Utc::now())
    }
}

impl AcquireToken for TokenEndpoint {
    async fn acquire(&self) -> AccessToken {
        self.request_access_token().await
    }
}
