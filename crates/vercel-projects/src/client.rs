//! Asynchronous Vercel project client implementation.

use crate::models::{
    CreateDomainRequest, CreateProjectEnvRequest, CreateProjectOptions, CreateProjectRequest,
    Domain, Project, ProjectEnv, ProjectEnvList, UpdateProjectRequest,
};
use crate::Result;
use reqwest::{Body, Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;
use vercel_core::client::ClientConfig;
use vercel_core::error::ErrorResponse;
use vercel_core::query::QueryParams;
use vercel_core::{AuthTransport, Error, HttpTransport, ReqwestTransport, VercelClientConfig};

const USER_AGENT: &str = concat!("vercel-projects/", env!("CARGO_PKG_VERSION"));

/// Builder for [`ProjectClient`].
#[derive(Clone)]
pub struct ProjectClientBuilder {
    config: VercelClientConfig,
    http_config: ClientConfig,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl ProjectClientBuilder {
    /// Create a builder from a [`VercelClientConfig`].
    #[must_use]
    pub fn new(config: VercelClientConfig) -> Self {
        Self {
            config,
            http_config: ClientConfig::new().with_user_agent(USER_AGENT),
            transport: None,
        }
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, http_config: ClientConfig) -> Self {
        self.http_config = http_config;
        self
    }

    /// Send requests through a custom transport instead of the default
    /// `reqwest` one. Credentials are still applied on top of it.
    #[must_use]
    pub fn with_transport<T>(mut self, transport: T) -> Self
    where
        T: HttpTransport + 'static,
    {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the token is
    /// missing, or the HTTP client cannot be built.
    pub fn build(self) -> Result<ProjectClient> {
        let base_url = self.config.parse_api_url()?;

        let mut http_config = self.http_config;
        if let Some(timeout) = self.config.timeout() {
            http_config.timeout = Some(timeout);
        }

        let inner: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&http_config)?),
        };
        let transport = AuthTransport::from_config(inner, &self.config)?;

        Ok(ProjectClient {
            base_url,
            transport: Arc::new(transport),
        })
    }
}

/// Asynchronous client for Vercel projects, environment variables and domains.
///
/// Cloning is cheap and clones share the connection pool. Every method is a
/// single request; dropping the returned future (for example through
/// `tokio::time::timeout`) aborts the request in flight.
#[derive(Clone)]
pub struct ProjectClient {
    base_url: Url,
    transport: Arc<dyn HttpTransport>,
}

impl ProjectClient {
    /// Construct a client directly from the configuration.
    ///
    /// # Errors
    ///
    /// See [`ProjectClientBuilder::build`].
    pub fn new(config: VercelClientConfig) -> Result<Self> {
        ProjectClientBuilder::new(config).build()
    }

    /// Construct a client from `VERCEL_TOKEN` and `VERCEL_TEAM_ID`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingToken`] if no token is set.
    pub fn from_env() -> Result<Self> {
        Self::new(VercelClientConfig::from_env()?)
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub fn builder(config: VercelClientConfig) -> ProjectClientBuilder {
        ProjectClientBuilder::new(config)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Create a project.
    pub async fn create_project(&self, options: &CreateProjectOptions) -> Result<Project> {
        let body = CreateProjectRequest::from(options);
        self.send_json(
            Method::POST,
            &["v6", "projects"],
            &[],
            Some(&body),
            StatusCode::OK,
        )
        .await
    }

    /// Fetch a project by name or id.
    pub async fn get_project(&self, name: &str) -> Result<Project> {
        self.send_json::<(), _>(
            Method::GET,
            &["v1", "projects", name],
            &[],
            None,
            StatusCode::OK,
        )
        .await
    }

    /// Update a project's build settings.
    ///
    /// Only non-empty settings of `project` are sent; the rest stay untouched.
    pub async fn update_project(&self, name: &str, project: &Project) -> Result<Project> {
        let body = UpdateProjectRequest::from(project);
        self.send_json(
            Method::PATCH,
            &["v1", "projects", name],
            &[],
            Some(&body),
            StatusCode::OK,
        )
        .await
    }

    /// Delete a project.
    pub async fn delete_project(&self, name: &str) -> Result<()> {
        self.send::<()>(
            Method::DELETE,
            &["v1", "projects", name],
            &[],
            None,
            StatusCode::NO_CONTENT,
        )
        .await
        .map(|_| ())
    }

    /// Create an environment variable on a project.
    pub async fn create_project_env(
        &self,
        project_id: &str,
        request: &CreateProjectEnvRequest,
    ) -> Result<ProjectEnv> {
        self.send_json(
            Method::POST,
            &["v7", "projects", project_id, "env"],
            &[],
            Some(request),
            StatusCode::OK,
        )
        .await
    }

    /// List a project's environment variables, optionally with decrypted values.
    pub async fn get_project_envs(
        &self,
        project_id: &str,
        decrypt: bool,
    ) -> Result<Vec<ProjectEnv>> {
        let params = QueryParams::new().with("decrypt", decrypt).into_pairs();
        let list: ProjectEnvList = self
            .send_json::<(), _>(
                Method::GET,
                &["v7", "projects", project_id, "env"],
                &params,
                None,
                StatusCode::OK,
            )
            .await?;
        Ok(list.envs)
    }

    /// Replace an environment variable, addressed by `env.id`.
    pub async fn edit_project_env(
        &self,
        project_id: &str,
        env: &ProjectEnv,
    ) -> Result<ProjectEnv> {
        let body = CreateProjectEnvRequest::from(env);
        self.send_json(
            Method::PATCH,
            &["v7", "projects", project_id, "env", env.id.as_str()],
            &[],
            Some(&body),
            StatusCode::OK,
        )
        .await
    }

    /// Delete an environment variable.
    ///
    /// Unlike project deletion, the API answers `200 OK` here.
    pub async fn delete_project_env(&self, project_id: &str, env_id: &str) -> Result<()> {
        self.send::<()>(
            Method::DELETE,
            &["v7", "projects", project_id, "env", env_id],
            &[],
            None,
            StatusCode::OK,
        )
        .await
        .map(|_| ())
    }

    /// Bind a domain alias to a project.
    pub async fn add_domain(
        &self,
        project_id: &str,
        domain: &str,
        redirect: Option<&str>,
    ) -> Result<Vec<Domain>> {
        let body = CreateDomainRequest::new(domain, redirect);
        self.send_json(
            Method::POST,
            &["v1", "projects", project_id, "alias"],
            &[],
            Some(&body),
            StatusCode::OK,
        )
        .await
    }

    /// Change the redirect of a domain alias. `None` removes the redirect.
    pub async fn update_domain(
        &self,
        project_id: &str,
        domain: &str,
        redirect: Option<&str>,
    ) -> Result<Vec<Domain>> {
        let body = CreateDomainRequest::new(domain, redirect);
        self.send_json(
            Method::PATCH,
            &["v1", "projects", project_id, "alias"],
            &[],
            Some(&body),
            StatusCode::OK,
        )
        .await
    }

    /// Remove a domain alias from a project.
    pub async fn delete_domain(&self, project_id: &str, domain: &str) -> Result<Vec<Domain>> {
        let params = QueryParams::new().with("domain", domain).into_pairs();
        self.send_json::<(), _>(
            Method::DELETE,
            &["v1", "projects", project_id, "alias"],
            &params,
            None,
            StatusCode::OK,
        )
        .await
    }

    fn endpoint(&self, segments: &[&str], params: &[(&'static str, String)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidEndpoint(format!("`{}` cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }

    async fn send<B>(
        &self,
        method: Method,
        segments: &[&str],
        params: &[(&'static str, String)],
        body: Option<&B>,
        expected: StatusCode,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments, params)?;
        let path = url.path().to_owned();

        let mut request = Request::new(method.clone(), url);
        if let Some(payload) = body {
            let bytes = serde_json::to_vec(payload).map_err(|err| {
                Error::InvalidRequest(format!("Failed to encode body for `{path}`: {err}"))
            })?;
            *request.body_mut() = Some(Body::from(bytes));
        }

        debug!(method = %method, path = %path, "sending Vercel request");
        let response = self.transport.execute(request).await?;
        let status = response.status();

        if status == expected {
            return Ok(response);
        }

        let text = response.bytes().await?;
        let error = ErrorResponse::decode(status.as_u16(), &text);
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            code = error.error_code(),
            "Vercel request failed"
        );
        Err(error)
    }

    async fn send_json<B, R>(
        &self,
        method: Method,
        segments: &[&str],
        params: &[(&'static str, String)],
        body: Option<&B>,
        expected: StatusCode,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(method, segments, params, body, expected).await?;
        let path = response.url().path().to_owned();
        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes).map_err(|err| {
            Error::DecodeError(format!("Failed to decode response for `{path}`: {err}"))
        })
    }
}

/// Entry point grouping the Vercel resource clients.
#[derive(Clone)]
pub struct VercelClient {
    /// Projects, environment variables and domain aliases.
    pub project: ProjectClient,
}

impl VercelClient {
    /// Build all resource clients from one configuration.
    ///
    /// # Errors
    ///
    /// See [`ProjectClientBuilder::build`].
    pub fn new(config: VercelClientConfig) -> Result<Self> {
        Ok(Self {
            project: ProjectClient::new(config)?,
        })
    }

    /// Build all resource clients from `VERCEL_TOKEN` and `VERCEL_TEAM_ID`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingToken`] if no token is set.
    pub fn from_env() -> Result<Self> {
        Self::new(VercelClientConfig::from_env()?)
    }
}
