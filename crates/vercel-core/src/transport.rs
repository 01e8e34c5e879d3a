//! HTTP transport abstraction and the bearer-token decorator.
//!
//! [`HttpTransport`] is the seam between resource clients and the network.
//! [`ReqwestTransport`] sends requests with a pooled `reqwest` client and
//! [`AuthTransport`] wraps any transport to attach Vercel credentials.

use crate::client::ClientConfig;
use crate::config::VercelClientConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Request, Response};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::debug;

/// Query parameter carrying the team scope.
pub const TEAM_ID_PARAM: &str = "teamId";

/// Sends a fully built HTTP request.
///
/// Implementations must be safe to share between concurrent calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and return the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be sent or no response arrived.
    async fn execute(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl<T> HttpTransport for Arc<T>
where
    T: HttpTransport + ?Sized,
{
    async fn execute(&self, request: Request) -> Result<Response> {
        (**self).execute(request).await
    }
}

/// Transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Build the underlying HTTP client from the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .gzip(config.enable_compression);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: Request) -> Result<Response> {
        self.http.execute(request).await.map_err(Error::from)
    }
}

/// Decorator that authenticates every request before delegating it.
///
/// Sets `Authorization: Bearer <token>` and `Content-Type: application/json`,
/// and appends `teamId=<team>` to the query string when a team is configured.
#[derive(Debug, Clone)]
pub struct AuthTransport<T> {
    inner: T,
    authorization: HeaderValue,
    team_id: Option<String>,
}

impl<T> AuthTransport<T> {
    /// Wrap `inner` with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingToken`] for an empty token and
    /// [`Error::ConfigError`] if the token cannot be sent as a header.
    pub fn new(inner: T, token: &SecretString, team_id: Option<String>) -> Result<Self> {
        let token = token.expose_secret();
        if token.is_empty() {
            return Err(Error::MissingToken);
        }

        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::ConfigError("API token is not a valid header value".into()))?;
        authorization.set_sensitive(true);

        Ok(Self {
            inner,
            authorization,
            team_id: team_id.filter(|team| !team.is_empty()),
        })
    }

    /// Wrap `inner` with the credentials held by a client configuration.
    ///
    /// # Errors
    ///
    /// See [`AuthTransport::new`].
    pub fn from_config(inner: T, config: &VercelClientConfig) -> Result<Self> {
        Self::new(inner, config.token(), config.team_id.clone())
    }

    /// The team scope applied to requests, if any.
    #[must_use]
    pub fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }

    /// Apply credentials to a request in place.
    ///
    /// Existing query pairs are kept; `teamId` is appended after them.
    pub fn decorate(&self, request: &mut Request) {
        let headers = request.headers_mut();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(team_id) = &self.team_id {
            request
                .url_mut()
                .query_pairs_mut()
                .append_pair(TEAM_ID_PARAM, team_id);
        }
    }
}

#[async_trait]
impl<T> HttpTransport for AuthTransport<T>
where
    T: HttpTransport,
{
    async fn execute(&self, mut request: Request) -> Result<Response> {
        self.decorate(&mut request);
        debug!(
            method = %request.method(),
            path = %request.url().path(),
            team_scoped = self.team_id.is_some(),
            "dispatching authenticated request"
        );
        self.inner.execute(request).await
    }
}
