// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Model Context Protocol (MCP) server descriptors.
//!
//! Maps a requested [`McpType`] to the descriptor an MCP client needs to reach
//! the server: a local launch command, a local container endpoint, or an
//! AgentCore runtime endpoint with a bearer token.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  DescriptorBuilder                    │
//! │   Basic / AgentcoreCoder ──► local command            │
//! │   *Docker ───────────────► http://127.0.0.1:8000/mcp  │
//! │   *Runtime ──┬──► ResourceDirectory (runtime ARN)     │
//! │              └──► TokenManager (bearer token)         │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_bootstrap::mcp::DescriptorBuilder;
//!
//! let servers = builder.build_selection(&["basic", "kb-retriever (runtime)"]).await;
//! println!("{}", servers.to_json_pretty()?);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod types;

pub use builder::{encode_arn, runtime_url, DescriptorBuilder, DEFAULT_PYTHON, DOCKER_ENDPOINT};
pub use config::McpConfig;
pub use error::McpError;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let _ = std::any::type_name::<McpConfig>();
        let _ = std::any::type_name::<McpError>();
        let _ = std::any::type_name::<DescriptorBuilder>();
    }
}
