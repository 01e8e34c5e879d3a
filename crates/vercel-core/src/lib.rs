//! # vercel-core
//!
//! Core types and utilities for talking to the Vercel REST API.
//!
//! This crate provides the shared error type, client configuration and the
//! authenticating HTTP transport used by the resource clients.
//!
//! ## Modules
//!
//! - [`error`] - Error types and remote error envelope decoding
//! - [`config`] - Credentials and client configuration
//! - [`client`] - HTTP client settings
//! - [`query`] - Query parameter helper
//! - [`transport`] - Transport trait and the bearer-token decorator

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod transport;

// Re-export commonly used types
pub use config::VercelClientConfig;
pub use error::{Error, Result};
pub use transport::{AuthTransport, HttpTransport, ReqwestTransport};
