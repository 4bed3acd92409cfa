use std::sync::Arc;

use url::Url;

use super::{Error, ThreeCxClient};
use crate::auth::{AuthenticationHandler, Credentials, HttpTransport, TokenEndpoint, TokenProvider};

/// Builder for [`ThreeCxClient`] instances.
///
/// Configuration is validated once in [`build`](Self::build): the base
/// address must be an absolute `http`/`https` URL and the credentials must
/// carry a non-empty client id and secret. An invalid configuration is a
/// construction-time error, never something the running client handles.
///
/// # Example
///
/// ```rust
/// use threecx_api::{Credentials, ThreeCxClient};
///
/// # fn example() -> Result<(), threecx_api::Error> {
/// let client = ThreeCxClient::builder()
///     .with_base_url("https://pbx.example.com")
///     .with_credentials(Credentials::new("client-id", "client-secret"))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ThreeCxClientBuilder {
    base_url: Option<String>,
    credentials: Option<Credentials>,
    http_client: Option<reqwest::Client>,
}

impl ThreeCxClientBuilder {
    /// Sets the PBX base address, e.g. `https://pbx.example.com`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the OAuth2 client credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Uses a pre-configured [`reqwest::Client`] instead of the default.
    ///
    /// The same client is shared by the token exchange and the business
    /// calls; authentication is attached per request, not client-wide.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Validates the configuration and builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUrl`] when the base address is missing,
    /// unparseable, relative, or not `http`/`https`, and
    /// [`Error::MissingCredential`] when the client id or secret is empty.
    pub fn build(self) -> Result<ThreeCxClient, Error> {
        let Self {
            base_url,
            credentials,
            http_client,
        } = self;

        let raw = base_url.unwrap_or_default();
        let base_url = Url::parse(&raw).map_err(|error| Error::InvalidBaseUrl {
            url: raw.clone(),
            reason: error.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.host_str().is_none() {
            return Err(Error::InvalidBaseUrl {
                url: raw,
                reason: "expected an absolute http(s) URL".to_string(),
            });
        }

        let credentials = credentials.ok_or(Error::MissingCredential { field: "client_id" })?;
        if credentials.client_id().is_empty() {
            return Err(Error::MissingCredential { field: "client_id" });
        }
        if credentials.client_secret().as_str().is_empty() {
            return Err(Error::MissingCredential {
                field: "client_secret",
            });
        }

        let http_client = http_client.unwrap_or_default();
        let endpoint = TokenEndpoint::new(http_client.clone(), &base_url, credentials)?;
        let provider = Arc::new(TokenProvider::new(endpoint));
        let handler = AuthenticationHandler::new(HttpTransport::new(http_client), provider);

        Ok(ThreeCxClient { base_url, handler })
    }
}
