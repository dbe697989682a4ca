// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! MCP server collections.
//!
//! The collection is what MCP clients consume:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "search": {
//!       "command": "python",
//!       "args": ["/opt/app/mcp_server_basic.py"]
//!     },
//!     "kb-retriever": {
//!       "type": "streamable_http",
//!       "url": "http://127.0.0.1:8000/mcp",
//!       "headers": {"Accept": "application/json, text/event-stream"}
//!     }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::error::McpError;
use super::types::ServerDescriptor;

/// Named MCP server descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpConfig {
    /// Map of server name to descriptor.
    #[serde(rename = "mcpServers", default)]
    pub servers: BTreeMap<String, ServerDescriptor>,
}

impl McpConfig {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection holding one server.
    pub fn single(name: impl Into<String>, descriptor: ServerDescriptor) -> Self {
        let mut config = Self::new();
        config.add_server(name, descriptor);
        config
    }

    /// Load a collection from a JSON or YAML file (chosen by extension).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, McpError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Parse a collection from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, McpError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a collection from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, McpError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, McpError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add or replace a server.
    pub fn add_server(&mut self, name: impl Into<String>, descriptor: ServerDescriptor) {
        self.servers.insert(name.into(), descriptor);
    }

    /// Remove a server.
    pub fn remove_server(&mut self, name: &str) -> Option<ServerDescriptor> {
        self.servers.remove(name)
    }

    /// Descriptor registered under `name`.
    pub fn get(&self, name: &str) -> Option<&ServerDescriptor> {
        self.servers.get(name)
    }

    /// Merge `other` into this collection; entries in `other` win.
    pub fn merge(&mut self, other: McpConfig) {
        self.servers.extend(other.servers);
    }

    /// Whether no servers are registered.
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Number of registered servers.
    pub fn len(&self) -> usize {
        self.servers.len()
    }
}
