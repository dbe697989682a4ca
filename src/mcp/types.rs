// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! MCP types and server descriptors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::error::McpError;

/// The MCP server variants a client can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum McpType {
    /// Local search server launched from a python script.
    Basic,
    /// Local AgentCore coding server launched from a python script.
    AgentcoreCoder,
    /// `use_aws` served by a local container.
    UseAwsDocker,
    /// `use_aws` served by an AgentCore runtime.
    UseAwsRuntime,
    /// `kb-retriever` served by a local container.
    KbRetrieverDocker,
    /// `kb-retriever` served by an AgentCore runtime.
    KbRetrieverRuntime,
    /// Servers supplied by the user.
    Custom,
}

impl McpType {
    /// Every variant, in menu order.
    pub const ALL: [McpType; 7] = [
        McpType::Basic,
        McpType::UseAwsDocker,
        McpType::UseAwsRuntime,
        McpType::KbRetrieverDocker,
        McpType::KbRetrieverRuntime,
        McpType::AgentcoreCoder,
        McpType::Custom,
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::AgentcoreCoder => "agentcore_coder",
            Self::UseAwsDocker => "use_aws_docker",
            Self::UseAwsRuntime => "use_aws",
            Self::KbRetrieverDocker => "kb-retriever_docker",
            Self::KbRetrieverRuntime => "kb-retriever",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for McpType {
    type Err = McpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "basic" => Ok(Self::Basic),
            "agentcore_coder" => Ok(Self::AgentcoreCoder),
            "use_aws_docker" | "use_aws (docker)" => Ok(Self::UseAwsDocker),
            "use_aws" | "use_aws (runtime)" => Ok(Self::UseAwsRuntime),
            "kb-retriever_docker" | "kb-retriever (docker)" => Ok(Self::KbRetrieverDocker),
            "kb-retriever" | "kb-retriever (runtime)" => Ok(Self::KbRetrieverRuntime),
            "custom" | "사용자 설정" => Ok(Self::Custom),
            other => Err(McpError::UnknownType(other.to_string())),
        }
    }
}

impl std::fmt::Display for McpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport type for remote MCP endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    /// Streamable HTTP transport.
    StreamableHttp,

    /// Server-Sent Events transport.
    Sse,
}

impl Default for TransportType {
    fn default() -> Self {
        Self::StreamableHttp
    }
}

impl std::fmt::Display for TransportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StreamableHttp => write!(f, "streamable_http"),
            Self::Sse => write!(f, "sse"),
        }
    }
}

/// How to reach or launch one MCP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerDescriptor {
    /// Launch a local process speaking MCP over stdio.
    Local {
        command: String,
        #[serde(default)]
        args: Vec<String>,
    },

    /// Connect to a remote HTTP endpoint.
    Remote {
        #[serde(rename = "type", default)]
        transport: TransportType,
        url: String,
        #[serde(default)]
        headers: BTreeMap<String, String>,
    },
}

/// Value of the `Accept` header sent to remote endpoints.
pub const ACCEPT_HEADER: &str = "application/json, text/event-stream";

impl ServerDescriptor {
    /// A local process descriptor.
    pub fn local(
        command: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::Local {
            command: command.into(),
            args: args.into_iter().map(|s| s.into()).collect(),
        }
    }

    /// A streamable HTTP descriptor with JSON content negotiation headers.
    pub fn remote(url: impl Into<String>) -> Self {
        let headers = BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), ACCEPT_HEADER.to_string()),
        ]);
        Self::Remote {
            transport: TransportType::StreamableHttp,
            url: url.into(),
            headers,
        }
    }

    /// Attach an `Authorization: Bearer` header. No-op for local descriptors.
    pub fn with_bearer_token(mut self, token: &str) -> Self {
        if let Self::Remote { headers, .. } = &mut self {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        self
    }

    /// Endpoint of a remote descriptor.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Remote { url, .. } => Some(url),
            Self::Local { .. } => None,
        }
    }

    /// Value of header `name` on a remote descriptor.
    pub fn header(&self, name: &str) -> Option<&str> {
        match self {
            Self::Remote { headers, .. } => headers.get(name).map(|s| s.as_str()),
            Self::Local { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_normalization() {
        assert_eq!("use_aws (docker)".parse::<McpType>().unwrap(), McpType::UseAwsDocker);
        assert_eq!("use_aws_docker".parse::<McpType>().unwrap(), McpType::UseAwsDocker);
        assert_eq!("use_aws (runtime)".parse::<McpType>().unwrap(), McpType::UseAwsRuntime);
        assert_eq!("use_aws".parse::<McpType>().unwrap(), McpType::UseAwsRuntime);
        assert_eq!(
            "kb-retriever (docker)".parse::<McpType>().unwrap(),
            McpType::KbRetrieverDocker
        );
        assert_eq!(
            "kb-retriever (runtime)".parse::<McpType>().unwrap(),
            McpType::KbRetrieverRuntime
        );
        assert_eq!("사용자 설정".parse::<McpType>().unwrap(), McpType::Custom);
    }

    #[test]
    fn test_unknown_type() {
        let err = "use_gcp".parse::<McpType>().unwrap_err();
        assert!(matches!(err, McpError::UnknownType(name) if name == "use_gcp"));
    }

    #[test]
    fn test_canonical_names_parse_back() {
        for mcp_type in McpType::ALL {
            assert_eq!(mcp_type.to_string().parse::<McpType>().unwrap(), mcp_type);
        }
    }

    #[test]
    fn test_descriptor_serialization() {
        let local = ServerDescriptor::local("python", ["/srv/mcp_server_basic.py"]);
        let json = serde_json::to_value(&local).unwrap();
        assert_eq!(json, serde_json::json!({"command": "python", "args": ["/srv/mcp_server_basic.py"]}));

        let remote = ServerDescriptor::remote("http://127.0.0.1:8000/mcp").with_bearer_token("abc");
        let json = serde_json::to_value(&remote).unwrap();
        assert_eq!(json["type"], "streamable_http");
        assert_eq!(json["url"], "http://127.0.0.1:8000/mcp");
        assert_eq!(json["headers"]["Authorization"], "Bearer abc");
        assert_eq!(json["headers"]["Accept"], ACCEPT_HEADER);
        assert_eq!(json["headers"]["Content-Type"], "application/json");
    }

    #[test]
    fn test_descriptor_deserialization() {
        let local: ServerDescriptor =
            serde_json::from_str(r#"{"command": "npx", "args": ["-y", "server"]}"#).unwrap();
        assert_eq!(local, ServerDescriptor::local("npx", ["-y", "server"]));

        let remote: ServerDescriptor =
            serde_json::from_str(r#"{"type": "sse", "url": "https://example.com/sse"}"#).unwrap();
        assert!(matches!(
            remote,
            ServerDescriptor::Remote { transport: TransportType::Sse, .. }
        ));
        assert_eq!(remote.header("Authorization"), None);
    }

    #[test]
    fn test_bearer_token_ignored_for_local() {
        let local = ServerDescriptor::local("python", ["x.py"]).with_bearer_token("abc");
        assert_eq!(local.header("Authorization"), None);
        assert_eq!(local.url(), None);
    }

    #[test]
    fn test_transport_display() {
        assert_eq!(TransportType::StreamableHttp.to_string(), "streamable_http");
        assert_eq!(TransportType::Sse.to_string(), "sse");
    }
}
