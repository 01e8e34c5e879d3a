//! Vercel project models shared by the client and its tests.
//!
//! Response types are lenient: nullable fields decode as `Option` and
//! missing or `null` lists decode as empty. Project request types only
//! serialize the optional fields that were actually supplied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Empty strings mean "not supplied".
fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn non_empty_opt(value: Option<&str>) -> Option<String> {
    value.and_then(non_empty)
}

/// A hosted project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project identifier (`prj_...`).
    #[serde(default)]
    pub id: String,
    /// Project name.
    #[serde(default)]
    pub name: String,
    /// Framework preset, e.g. `nextjs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    /// Directory the build runs in, relative to the repository root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_directory: Option<String>,
    /// Node.js version used for builds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_version: Option<String>,
    /// Owning account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Last update time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Domain aliases bound to the project.
    #[serde(default, deserialize_with = "null_as_default")]
    pub alias: Vec<Domain>,
    /// Linked source repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<RepositoryLink>,
    /// Custom build command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,
    /// Custom output directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<String>,
    /// Command deciding whether a build step is skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_for_ignoring_build_step: Option<String>,
}

/// Link between a project and a source-control repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryLink {
    /// Provider, e.g. `github`.
    #[serde(rename = "type", default)]
    pub repo_type: String,
    /// Repository name.
    #[serde(default)]
    pub repo: String,
    /// Owning organization.
    #[serde(default)]
    pub org: String,
}

/// Kind of an environment variable.
///
/// Types this crate does not know decode as [`EnvType::Other`] and encode
/// back to the same wire name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnvType {
    /// Stored and shown in plain text.
    Plain,
    /// Reference to a secret.
    Secret,
    /// Encrypted at rest.
    Encrypted,
    /// Provided by the platform.
    System,
    /// Encrypted and never readable after creation.
    Sensitive,
    /// Any other type reported by the API.
    Other(String),
}

impl EnvType {
    /// Wire name of the type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain => "plain",
            Self::Secret => "secret",
            Self::Encrypted => "encrypted",
            Self::System => "system",
            Self::Sensitive => "sensitive",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for EnvType {
    fn from(name: &str) -> Self {
        match name {
            "plain" => Self::Plain,
            "secret" => Self::Secret,
            "encrypted" => Self::Encrypted,
            "system" => Self::System,
            "sensitive" => Self::Sensitive,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for EnvType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EnvType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EnvType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from(name.as_str()))
    }
}

/// One environment variable of a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectEnv {
    /// Variable identifier.
    #[serde(default)]
    pub id: String,
    /// Variable type.
    #[serde(rename = "type")]
    pub env_type: EnvType,
    /// Variable name.
    pub key: String,
    /// Variable value; encrypted values are only returned when decrypting.
    #[serde(default)]
    pub value: String,
    /// Target environments, e.g. `production`, `preview`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: Vec<String>,
}

/// A domain alias of a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Domain {
    /// Domain name.
    pub domain: String,
    /// Domain this alias redirects to, if any.
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Caller input for creating a project.
///
/// Empty strings mean "not supplied" and are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateProjectOptions {
    /// Project name.
    pub name: String,
    /// Framework preset.
    pub framework: String,
    /// Repository provider, e.g. `github`.
    pub repository_type: String,
    /// Repository in `owner/name` form.
    pub repository_name: String,
    /// Root directory.
    pub root_directory: String,
    /// Build command.
    pub build_command: String,
    /// Output directory.
    pub output_directory: String,
    /// Ignored build step command.
    pub command_for_ignoring_build_step: String,
}

impl CreateProjectOptions {
    /// Options for a project with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the framework preset.
    #[must_use]
    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = framework.into();
        self
    }

    /// Link a source repository.
    #[must_use]
    pub fn with_repository(
        mut self,
        repository_type: impl Into<String>,
        repository_name: impl Into<String>,
    ) -> Self {
        self.repository_type = repository_type.into();
        self.repository_name = repository_name.into();
        self
    }

    /// Set the root directory.
    #[must_use]
    pub fn with_root_directory(mut self, root_directory: impl Into<String>) -> Self {
        self.root_directory = root_directory.into();
        self
    }

    /// Set the build command.
    #[must_use]
    pub fn with_build_command(mut self, build_command: impl Into<String>) -> Self {
        self.build_command = build_command.into();
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn with_output_directory(mut self, output_directory: impl Into<String>) -> Self {
        self.output_directory = output_directory.into();
        self
    }

    /// Set the ignored build step command.
    #[must_use]
    pub fn with_ignore_command(mut self, command: impl Into<String>) -> Self {
        self.command_for_ignoring_build_step = command.into();
        self
    }
}

/// Repository to connect when creating a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitRepositoryRequest {
    /// Repository provider.
    #[serde(rename = "type")]
    pub repo_type: String,
    /// Repository in `owner/name` form.
    pub repo: String,
}

/// Request body for `POST /v6/projects`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    /// Project name.
    pub name: String,
    /// Framework preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    /// Repository to connect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_repository: Option<GitRepositoryRequest>,
    /// Root directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_directory: Option<String>,
    /// Build command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,
    /// Output directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<String>,
    /// Ignored build step command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_for_ignoring_build_step: Option<String>,
}

impl From<&CreateProjectOptions> for CreateProjectRequest {
    fn from(options: &CreateProjectOptions) -> Self {
        // a repository is only linked when both halves are known
        let git_repository = match (
            non_empty(&options.repository_type),
            non_empty(&options.repository_name),
        ) {
            (Some(repo_type), Some(repo)) => Some(GitRepositoryRequest { repo_type, repo }),
            _ => None,
        };

        Self {
            name: options.name.clone(),
            framework: non_empty(&options.framework),
            git_repository,
            root_directory: non_empty(&options.root_directory),
            build_command: non_empty(&options.build_command),
            output_directory: non_empty(&options.output_directory),
            command_for_ignoring_build_step: non_empty(&options.command_for_ignoring_build_step),
        }
    }
}

/// Request body for `PATCH /v1/projects/{name}`.
///
/// Absent fields are left unchanged by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    /// Framework preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    /// Root directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_directory: Option<String>,
    /// Build command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,
    /// Output directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<String>,
    /// Ignored build step command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_for_ignoring_build_step: Option<String>,
}

impl From<&Project> for UpdateProjectRequest {
    fn from(project: &Project) -> Self {
        Self {
            framework: non_empty_opt(project.framework.as_deref()),
            root_directory: non_empty_opt(project.root_directory.as_deref()),
            build_command: non_empty_opt(project.build_command.as_deref()),
            output_directory: non_empty_opt(project.output_directory.as_deref()),
            command_for_ignoring_build_step: non_empty_opt(
                project.command_for_ignoring_build_step.as_deref(),
            ),
        }
    }
}

/// Request body for creating or editing an environment variable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateProjectEnvRequest {
    /// Variable type.
    #[serde(rename = "type")]
    pub env_type: EnvType,
    /// Variable name.
    pub key: String,
    /// Variable value.
    pub value: String,
    /// Target environments.
    pub target: Vec<String>,
}

impl CreateProjectEnvRequest {
    /// Build a request.
    #[must_use]
    pub fn new<K, V, I, S>(env_type: EnvType, key: K, value: V, target: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            env_type,
            key: key.into(),
            value: value.into(),
            target: target.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&ProjectEnv> for CreateProjectEnvRequest {
    fn from(env: &ProjectEnv) -> Self {
        Self {
            env_type: env.env_type.clone(),
            key: env.key.clone(),
            value: env.value.clone(),
            target: env.target.clone(),
        }
    }
}

/// Response body of `GET /v7/projects/{id}/env`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProjectEnvList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) envs: Vec<ProjectEnv>,
}

/// Request body for adding or updating a domain alias.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDomainRequest {
    /// Domain name.
    pub domain: String,
    /// Redirect target. Always sent; `null` removes an existing redirect.
    #[serde(default)]
    pub redirect: Option<String>,
}

impl CreateDomainRequest {
    /// Build a request. An empty redirect counts as none and is sent as `null`.
    #[must_use]
    pub fn new(domain: impl Into<String>, redirect: Option<&str>) -> Self {
        Self {
            domain: domain.into(),
            redirect: non_empty_opt(redirect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_with_name_only() {
        let request = CreateProjectRequest::from(&CreateProjectOptions::new("demo"));
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"name": "demo"}));
    }

    #[test]
    fn create_request_includes_supplied_framework() {
        let options = CreateProjectOptions::new("demo").with_framework("nextjs");
        let request = CreateProjectRequest::from(&options);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"name": "demo", "framework": "nextjs"})
        );
    }

    #[test]
    fn create_request_links_repository_only_when_complete() {
        let partial = CreateProjectOptions {
            repository_type: "github".into(),
            ..CreateProjectOptions::new("demo")
        };
        assert!(CreateProjectRequest::from(&partial).git_repository.is_none());

        let full = CreateProjectOptions::new("demo").with_repository("github", "acme/site");
        assert_eq!(
            serde_json::to_value(CreateProjectRequest::from(&full)).unwrap(),
            json!({
                "name": "demo",
                "gitRepository": {"type": "github", "repo": "acme/site"}
            })
        );
    }

    #[test]
    fn create_request_uses_camel_case_fields() {
        let options = CreateProjectOptions::new("demo")
            .with_root_directory("web")
            .with_build_command("npm run build")
            .with_output_directory("dist")
            .with_ignore_command("exit 0");

        assert_eq!(
            serde_json::to_value(CreateProjectRequest::from(&options)).unwrap(),
            json!({
                "name": "demo",
                "rootDirectory": "web",
                "buildCommand": "npm run build",
                "outputDirectory": "dist",
                "commandForIgnoringBuildStep": "exit 0"
            })
        );
    }

    #[test]
    fn update_request_omits_empty_fields() {
        let project = Project {
            name: "demo".into(),
            framework: Some(String::new()),
            build_command: None,
            ..Project::default()
        };
        let request = UpdateProjectRequest::from(&project);
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({}));
    }

    #[test]
    fn update_request_includes_supplied_framework() {
        let project = Project {
            framework: Some("go".into()),
            output_directory: Some("public".into()),
            ..Project::default()
        };
        assert_eq!(
            serde_json::to_value(UpdateProjectRequest::from(&project)).unwrap(),
            json!({"framework": "go", "outputDirectory": "public"})
        );
    }

    #[test]
    fn project_env_request_decodes_as_project_env() {
        let request = CreateProjectEnvRequest::new(
            EnvType::Encrypted,
            "API_URL",
            "https://example.com",
            ["production", "preview"],
        );
        let encoded = serde_json::to_string(&request).unwrap();
        let env: ProjectEnv = serde_json::from_str(&encoded).unwrap();

        assert_eq!(env.key, request.key);
        assert_eq!(env.value, request.value);
        assert_eq!(env.env_type, request.env_type);
        assert_eq!(env.target, request.target);
        assert!(env.id.is_empty());
    }

    #[test]
    fn env_type_wire_names() {
        assert_eq!(serde_json::to_value(EnvType::Plain).unwrap(), json!("plain"));
        assert_eq!(
            serde_json::from_value::<EnvType>(json!("sensitive")).unwrap(),
            EnvType::Sensitive
        );
        assert_eq!(EnvType::Secret.to_string(), "secret");
    }

    #[test]
    fn unknown_env_type_round_trips() {
        let env_type: EnvType = serde_json::from_value(json!("flags")).unwrap();
        assert_eq!(env_type, EnvType::Other("flags".into()));
        assert_eq!(serde_json::to_value(&env_type).unwrap(), json!("flags"));
    }

    #[test]
    fn env_list_keeps_entries_of_unknown_type() {
        let list: ProjectEnvList = serde_json::from_value(json!({
            "envs": [
                {
                    "id": "env_1",
                    "type": "plain",
                    "key": "REGION",
                    "value": "us-east",
                    "target": ["production"]
                },
                {
                    "id": "env_2",
                    "type": "flags",
                    "key": "FEATURES",
                    "value": "",
                    "target": ["preview"]
                }
            ]
        }))
        .unwrap();

        assert_eq!(list.envs.len(), 2);
        assert_eq!(list.envs[0].env_type, EnvType::Plain);
        assert_eq!(list.envs[1].env_type, EnvType::Other("flags".into()));

        let request = CreateProjectEnvRequest::from(&list.envs[1]);
        assert_eq!(serde_json::to_value(&request).unwrap()["type"], json!("flags"));
    }

    #[test]
    fn project_tolerates_null_collections() {
        let project: Project = serde_json::from_value(json!({
            "id": "prj_1",
            "name": "demo",
            "framework": null,
            "alias": null,
            "link": null,
            "createdAt": 1_700_000_000_000_i64
        }))
        .unwrap();

        assert!(project.framework.is_none());
        assert!(project.alias.is_empty());
        assert_eq!(
            project.created_at.unwrap().timestamp_millis(),
            1_700_000_000_000
        );
    }

    #[test]
    fn domain_request_always_sends_redirect() {
        let request = CreateDomainRequest::new("example.com", Some(""));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"domain": "example.com", "redirect": null})
        );

        let request = CreateDomainRequest::new("example.com", None);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"domain": "example.com", "redirect": null})
        );

        let request = CreateDomainRequest::new("www.example.com", Some("example.com"));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"domain": "www.example.com", "redirect": "example.com"})
        );
    }
}
