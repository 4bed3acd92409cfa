//! Request pipeline with bearer-token decoration.

use std::future::Future;
use std::sync::Arc;

use http::HeaderValue;
use http::header::AUTHORIZATION;
use reqwest::{Request, Response};

use super::provider::{AcquireToken, Clock, SystemClock, TokenProvider};
use crate::client::Error;

/// One stage of the outgoing request pipeline.
///
/// A stage receives a fully-constructed request and produces the response,
/// possibly after decorating the request and delegating to an inner stage.
pub trait RequestHandler: Send + Sync {
    /// Sends the request and returns the transport's response.
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response, Error>> + Send;
}

/// Terminal pipeline stage: hands the request to the HTTP client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates the terminal stage over the given client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl RequestHandler for HttpTransport {
    async fn execute(&self, request: Request) -> Result<Response, Error> {
        Ok(self.client.execute(request).await?)
    }
}

/// Pipeline stage that attaches `Authorization: Bearer <token>`.
///
/// The token comes from the shared [`TokenProvider`]; the header is set
/// unconditionally, so a persistently failing token endpoint still yields
/// `Bearer ` with an empty credential and the PBX answers with whatever it
/// returns for unauthenticated requests. The inner stage's response or
/// failure is passed through unmodified; there is no retry logic here.
#[derive(Debug, Clone)]
pub struct AuthenticationHandler<H, A, C = SystemClock> {
    inner: H,
    provider: Arc<TokenProvider<A, C>>,
}

impl<H, A, C> AuthenticationHandler<H, A, C> {
    /// Composes the authenticating stage in front of `inner`.
    pub fn new(inner: H, provider: Arc<TokenProvider<A, C>>) -> Self {
        Self { inner, provider }
    }
}

impl<H, A, C> RequestHandler for AuthenticationHandler<H, A, C>
where
    H: RequestHandler,
    A: AcquireToken,
    C: Clock,
{
    async fn execute(&self, mut request: Request) -> Result<Response, Error> {
        let token = self.provider.get_access_token().await;
        let value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        request.headers_mut().insert(AUTHORIZATION, value);

        self.inner.execute(request).await
    }
}
