//! Configuration endpoints.

use http::Method;
use reqwest::Request;

use crate::client::{Error, ThreeCxClient};

/// Response header carrying the PBX version.
const VERSION_HEADER: &str = "X-3CX-Version";

/// Probe path whose response carries the version header.
const VERSION_PROBE_PATH: &str = "/xapi/v1/Defs";

/// Typed access to the PBX configuration endpoints.
///
/// Obtained from [`ThreeCxClient::configuration`].
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationApi<'a> {
    client: &'a ThreeCxClient,
}

impl<'a> ConfigurationApi<'a> {
    pub(crate) fn new(client: &'a ThreeCxClient) -> Self {
        Self { client }
    }

    /// Returns the PBX version string.
    ///
    /// The version travels in the `X-3CX-Version` response header of a
    /// cheap probe request; a successful response without the header
    /// yields an empty string.
    pub async fn version(&self) -> Result<String, Error> {
        let mut url = self.client.url_for(VERSION_PROBE_PATH)?;
        url.set_query(Some("$select=Id"));

        let response = self.client.send(Request::new(Method::GET, url)).await?;

        let version = response
            .headers()
            .get(VERSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        // Consume the body so status failures carry their payload.
        ThreeCxClient::read_body(VERSION_PROBE_PATH, response).await?;

        Ok(version.unwrap_or_default())
    }
}
