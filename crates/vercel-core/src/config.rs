//! Configuration structures for Vercel clients.
//!
//! This module holds the credentials and endpoint settings a client is built
//! from. Credentials are passed explicitly; [`VercelClientConfig::from_env`]
//! is a convenience that reads them from the process environment.

use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Default Vercel API base URL.
pub const DEFAULT_API_URL: &str = "https://api.vercel.com";

/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "VERCEL_TOKEN";

/// Environment variable holding the optional team identifier.
pub const TEAM_ID_ENV_VAR: &str = "VERCEL_TEAM_ID";

/// Configuration for a Vercel client instance.
#[derive(Debug, Clone, Validate)]
pub struct VercelClientConfig {
    /// API base URL
    #[validate(url)]
    pub api_url: String,

    /// Bearer token used for every request
    pub token: SecretString,

    /// Optional team scope, sent as the `teamId` query parameter
    pub team_id: Option<String>,

    /// Whole-request timeout in seconds; unset means no client-side timeout
    #[validate(range(min = 1, max = 600))]
    pub request_timeout_secs: Option<u64>,
}

impl VercelClientConfig {
    /// Create a new client configuration from an API token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::MissingToken);
        }

        Ok(Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: SecretString::from(token),
            team_id: None,
            request_timeout_secs: None,
        })
    }

    /// Read credentials from `VERCEL_TOKEN` and `VERCEL_TEAM_ID`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingToken`] if `VERCEL_TOKEN` is unset or empty.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingToken`] if the token variable is unset or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV_VAR).ok_or(Error::MissingToken)?;
        let config = Self::new(token)?;

        Ok(match lookup(TEAM_ID_ENV_VAR) {
            Some(team_id) => config.with_team_id(team_id),
            None => config,
        })
    }

    /// Scope requests to a team. An empty identifier clears the scope.
    #[must_use]
    pub fn with_team_id(mut self, team_id: impl Into<String>) -> Self {
        let team_id = team_id.into();
        self.team_id = (!team_id.is_empty()).then_some(team_id);
        self
    }

    /// Point the client at a different API base URL.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set a whole-request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = Some(seconds);
        self
    }

    /// Get the request timeout as a Duration, if set.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// The bearer token.
    #[must_use]
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// The team scope, if any.
    #[must_use]
    pub fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }

    /// Validate the configuration and parse the API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the token is empty, or the URL
    /// cannot be used as a base.
    pub fn parse_api_url(&self) -> Result<Url, Error> {
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        if self.token.expose_secret().is_empty() {
            return Err(Error::MissingToken);
        }

        let url = Url::parse(&self.api_url)
            .map_err(|e| Error::ConfigError(format!("Invalid API URL: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(Error::ConfigError(format!(
                "API URL `{}` cannot be used as a base",
                self.api_url
            )));
        }

        Ok(url)
    }
}
