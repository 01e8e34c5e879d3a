//! Vercel project API client and data models.
//!
//! Provides typed structures and an asynchronous client for managing Vercel
//! projects, their environment variables and their domain aliases.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{ProjectClient, ProjectClientBuilder, VercelClient};
pub use models::{
    CreateDomainRequest, CreateProjectEnvRequest, CreateProjectOptions, CreateProjectRequest,
    Domain, EnvType, GitRepositoryRequest, Project, ProjectEnv, RepositoryLink,
    UpdateProjectRequest,
};

/// Convenient result alias that reuses the shared Vercel error type.
pub type Result<T> = vercel_core::Result<T>;
