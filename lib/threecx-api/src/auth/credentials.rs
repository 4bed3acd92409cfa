use serde::Deserialize;

use super::SecureString;

/// OAuth2 client-credentials configuration.
///
/// Supplied once at construction and read-only afterwards. The grant type
/// defaults to `client_credentials`, which is the only flow the PBX token
/// endpoint supports.
///
/// `Credentials` derives [`Deserialize`] so it can be loaded straight from
/// a configuration file; the secret lands in a [`SecureString`] and stays
/// redacted in any `Debug` output.
#[derive(Clone, Debug, Deserialize)]
pub struct Credentials {
    client_id: String,
    client_secret: SecureString,
    #[serde(default = "default_grant_type")]
    grant_type: String,
}

fn default_grant_type() -> String {
    "client_credentials".to_string()
}

impl Credentials {
    /// Creates credentials with the default `client_credentials` grant.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<SecureString>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            grant_type: default_grant_type(),
        }
    }

    /// Overrides the grant type sent to the token endpoint.
    #[must_use]
    pub fn with_grant_type(mut self, grant_type: impl Into<String>) -> Self {
        self.grant_type = grant_type.into();
        self
    }

    /// Returns the OAuth2 client identifier.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth2 client secret.
    pub fn client_secret(&self) -> &SecureString {
        &self.client_secret
    }

    /// Returns the OAuth2 grant type.
    pub fn grant_type(&self) -> &str {
        &self.grant_type
    }
}
