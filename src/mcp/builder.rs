// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Resolves MCP types into server descriptors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::auth::TokenManager;
use crate::cloud::ResourceDirectory;
use crate::context::BootstrapContext;

use super::config::McpConfig;
use super::types::{McpType, ServerDescriptor};

/// Interpreter used to launch the local servers.
pub const DEFAULT_PYTHON: &str = "python";

/// Endpoint of a locally running MCP container.
pub const DOCKER_ENDPOINT: &str = "http://127.0.0.1:8000/mcp";

/// Escape an ARN for use as a single URL path segment.
///
/// Only `:` and `/` are rewritten.
pub fn encode_arn(arn: &str) -> String {
    arn.replace(':', "%3A").replace('/', "%2F")
}

/// Invocation URL of an AgentCore runtime.
pub fn runtime_url(region: &str, arn: &str) -> String {
    format!(
        "https://bedrock-agentcore.{}.amazonaws.com/runtimes/{}/invocations?qualifier=DEFAULT",
        region,
        encode_arn(arn)
    )
}

/// Builds MCP server descriptors, resolving runtimes and tokens on demand.
pub struct DescriptorBuilder {
    ctx: BootstrapContext,
    resources: Arc<dyn ResourceDirectory>,
    tokens: TokenManager,
    script_dir: PathBuf,
    python: String,
    user_servers: McpConfig,
}

impl DescriptorBuilder {
    /// Local server scripts are expected next to the config file.
    pub fn new(
        ctx: BootstrapContext,
        resources: Arc<dyn ResourceDirectory>,
        tokens: TokenManager,
    ) -> Self {
        let script_dir = ctx.store().dir().to_path_buf();
        Self {
            ctx,
            resources,
            tokens,
            script_dir,
            python: DEFAULT_PYTHON.to_string(),
            user_servers: McpConfig::new(),
        }
    }

    /// Directory holding the local server scripts.
    pub fn with_script_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.script_dir = dir.into();
        self
    }

    /// Interpreter used for local servers.
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// Servers returned for [`McpType::Custom`].
    pub fn with_user_servers(mut self, servers: McpConfig) -> Self {
        self.user_servers = servers;
        self
    }

    /// The bootstrap context, including any ids discovered so far.
    pub fn context(&self) -> &BootstrapContext {
        &self.ctx
    }

    /// The token manager used for runtime descriptors.
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Directory holding the local server scripts.
    pub fn script_dir(&self) -> &Path {
        &self.script_dir
    }

    /// Descriptors for one MCP type, or `None` if it cannot be served.
    #[instrument(skip(self))]
    pub async fn build(&mut self, mcp_type: McpType) -> Option<McpConfig> {
        match mcp_type {
            McpType::Basic => Some(self.local("search", "mcp_server_basic.py")),
            McpType::AgentcoreCoder => {
                Some(self.local("agentcore_coder", "mcp_server_agentcore_coder.py"))
            }
            McpType::UseAwsDocker | McpType::KbRetrieverDocker => Some(McpConfig::single(
                "kb-retriever",
                ServerDescriptor::remote(DOCKER_ENDPOINT),
            )),
            McpType::UseAwsRuntime => self.runtime("use_aws", "use_aws").await,
            McpType::KbRetrieverRuntime => self.runtime("kb-retriever", "kb-retriever").await,
            McpType::Custom => {
                if self.user_servers.is_empty() {
                    debug!("No user servers configured");
                    None
                } else {
                    Some(self.user_servers.clone())
                }
            }
        }
    }

    /// Descriptors for every name in `names`, merged by server name.
    ///
    /// Unknown names and types that cannot be served are skipped. When two
    /// types produce the same server name the later one wins.
    pub async fn build_selection<S: AsRef<str>>(&mut self, names: &[S]) -> McpConfig {
        let mut merged = McpConfig::new();
        for name in names {
            let name = name.as_ref();
            let mcp_type = match name.parse::<McpType>() {
                Ok(t) => t,
                Err(e) => {
                    warn!(error = %e, "Skipping MCP type");
                    continue;
                }
            };
            match self.build(mcp_type).await {
                Some(servers) => merged.merge(servers),
                None => debug!(mcp_type = %name, "No descriptor"),
            }
        }
        info!(servers = ?merged.servers.keys().collect::<Vec<_>>(), "Loaded MCP servers");
        merged
    }

    fn local(&self, server: &str, script: &str) -> McpConfig {
        let script = self.script_dir.join(script);
        McpConfig::single(
            server,
            ServerDescriptor::local(&self.python, [script.display().to_string()]),
        )
    }

    async fn runtime(&mut self, server: &str, runtime_type: &str) -> Option<McpConfig> {
        let project = self.ctx.project_name().to_string();
        let arn = match self.resources.find_agent_runtime(runtime_type, &project).await {
            Ok(Some(arn)) => arn,
            Ok(None) => {
                error!(mcp_type = runtime_type, "Agent runtime not found");
                return None;
            }
            Err(e) => {
                error!(mcp_type = runtime_type, error = %e, "Failed to list agent runtimes");
                return None;
            }
        };

        let token = self.tokens.ensure_valid(&mut self.ctx).await?;
        let url = runtime_url(self.ctx.region(), &arn);
        debug!(url = %url, "Resolved runtime endpoint");

        Some(McpConfig::single(
            server,
            ServerDescriptor::remote(url).with_bearer_token(&token),
        ))
    }
}
