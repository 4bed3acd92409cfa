use http::Method;
use http::header::CONTENT_TYPE;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::{AuthenticationHandler, HttpTransport, RequestHandler, TokenEndpoint};
use crate::call_control::CallControlApi;
use crate::configuration::ConfigurationApi;

mod builder;
pub use self::builder::ThreeCxClientBuilder;

mod error;
pub use self::error::Error;

#[cfg(test)]
mod integration_tests;

/// The authenticating pipeline every business request goes through.
type Pipeline = AuthenticationHandler<HttpTransport, TokenEndpoint>;

/// Typed client for the 3CX REST API.
///
/// The client owns the PBX base address and the authenticating request
/// pipeline; endpoint groups are reached through [`call_control`](Self::call_control)
/// and [`configuration`](Self::configuration). Cloning is cheap and all
/// clones share the same token cache, so one process refreshes its bearer
/// token at most once per expiry no matter how many handles are in flight.
///
/// Use [`ThreeCxClientBuilder`] to create instances; see the
/// [crate documentation](crate) for a full example.
#[derive(Debug, Clone)]
pub struct ThreeCxClient {
    base_url: Url,
    handler: Pipeline,
}

impl ThreeCxClient {
    /// Creates a builder with default settings.
    pub fn builder() -> ThreeCxClientBuilder {
        ThreeCxClientBuilder::default()
    }

    /// Access to the call-control endpoints.
    pub fn call_control(&self) -> CallControlApi<'_> {
        CallControlApi::new(self)
    }

    /// Access to the configuration endpoints.
    pub fn configuration(&self) -> ConfigurationApi<'_> {
        ConfigurationApi::new(self)
    }
}

/// Percent-encodes a caller-supplied path segment (DN numbers, device
/// ids) so reserved characters cannot break out of their segment.
pub(crate) fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

// Request plumbing shared by the endpoint groups.
impl ThreeCxClient {
    pub(crate) fn url_for(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    pub(crate) async fn send(&self, request: Request) -> Result<Response, Error> {
        self.handler.execute(request).await
    }

    /// GET `path` and deserialize the JSON response.
    pub(crate) async fn get_json<T>(&self, path: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let request = Request::new(Method::GET, self.url_for(path)?);
        let response = self.send(request).await?;
        Self::read_json(path, response).await
    }

    /// POST a JSON `body` to `path` and deserialize the JSON response.
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = Request::new(Method::POST, self.url_for(path)?);
        request.headers_mut().insert(
            CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        *request.body_mut() = Some(serde_json::to_vec(body)?.into());

        let response = self.send(request).await?;
        Self::read_json(path, response).await
    }

    /// Reads the body, rejecting non-success statuses and carrying the
    /// offending payload in the error for diagnostics.
    pub(crate) async fn read_body(path: &str, response: Response) -> Result<String, Error> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                status,
                path: path.to_string(),
                body,
            });
        }
        Ok(body)
    }

    async fn read_json<T>(path: &str, response: Response) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let body = Self::read_body(path, response).await?;
        serde_json::from_str(&body).map_err(|error| Error::Json {
            path: path.to_string(),
            error,
            body,
        })
    }
}
