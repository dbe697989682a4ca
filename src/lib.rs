// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! MCP bootstrap - connection descriptors for AgentCore-hosted MCP servers.
//!
//! Resolves a logical MCP type (`basic`, `use_aws`, `kb-retriever`, ...) into
//! the descriptor an MCP client needs: a local launch command, or a remote
//! streamable HTTP endpoint with a Cognito bearer token. Missing configuration
//! is discovered from AWS and written back to `config.json` as it is found.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`error`] - Error types and result aliases
//! - [`config`] - The configuration document, its store, and its initializer
//! - [`context`] - The loaded configuration passed between operations
//! - [`cloud`] - Identity, secret, and resource directory traits (AWS SDK backed)
//! - [`auth`] - Bearer token retrieval, validation, and refresh
//! - [`mcp`] - MCP types, descriptors, and the descriptor builder
//! - [`telemetry`] - Logging setup
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_bootstrap::{bootstrap_aws, ConfigStore};
//!
//! let mut builder = bootstrap_aws(ConfigStore::in_dir("application")).await?;
//! let servers = builder.build_selection(&["basic", "use_aws (runtime)"]).await;
//! println!("{}", servers.to_json_pretty()?);
//! ```

pub mod auth;
pub mod bootstrap;
pub mod cloud;
pub mod config;
pub mod context;
pub mod error;
pub mod mcp;
pub mod telemetry;

// Re-export commonly used types at crate root
#[cfg(feature = "aws")]
pub use bootstrap::bootstrap_aws;
pub use bootstrap::bootstrap;
pub use config::{CognitoConfig, ConfigInitializer, ConfigStore, Configuration};
pub use context::BootstrapContext;
pub use error::{BootstrapError, CloudError, ConfigError, Result};
pub use mcp::{DescriptorBuilder, McpConfig, McpError, McpType, ServerDescriptor};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
