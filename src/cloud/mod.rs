// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Cloud directory services used by the bootstrapper.
//!
//! Each service is a thin request/response trait so the orchestration code can
//! run against the AWS SDK (see [`aws`]) or an in-memory implementation in
//! tests. The primitive methods map one-to-one onto service calls; the lookup
//! helpers built on top of them are provided methods.
//!
//! - [`IdentityDirectory`] - Cognito user pools, clients, and tokens
//! - [`SecretStore`] - Secrets Manager JSON secrets
//! - [`ResourceDirectory`] - knowledge bases, IAM roles, and agent runtimes

#[cfg(feature = "aws")]
pub mod aws;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::CloudError;

/// A Cognito user pool summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPool {
    pub id: String,
    pub name: String,
}

/// A Cognito app client summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolClient {
    pub id: String,
    pub name: String,
}

/// A Bedrock knowledge base summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    pub id: String,
    pub name: String,
}

/// An AgentCore runtime summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRuntime {
    pub name: String,
    pub arn: String,
}

/// Identity provider queries.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// List up to `max_results` user pools.
    async fn list_user_pools(&self, max_results: i32) -> Result<Vec<UserPool>, CloudError>;

    /// List the app clients of a user pool.
    async fn list_user_pool_clients(&self, pool_id: &str) -> Result<Vec<PoolClient>, CloudError>;

    /// Validate an access token, returning the username it belongs to.
    ///
    /// Fails with [`CloudError::Auth`] when the token is invalid or expired.
    async fn get_user(&self, access_token: &str) -> Result<String, CloudError>;

    /// Exchange username and password for an access token.
    ///
    /// Fails with [`CloudError::Auth`] on bad credentials.
    async fn initiate_auth(
        &self,
        client_id: &str,
        username: &str,
        password: &str,
    ) -> Result<String, CloudError>;
}

/// Description attached to secrets created by [`SecretStore::put`].
pub const SECRET_DESCRIPTION: &str = "MCP Server Cognito credentials with bearer key and token";

/// Named JSON secrets.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Raw secret string. Fails with [`CloudError::NotFound`] if the secret does not exist.
    async fn get_secret_string(&self, name: &str) -> Result<String, CloudError>;

    /// Whether a secret with this name exists.
    async fn secret_exists(&self, name: &str) -> Result<bool, CloudError>;

    /// Create a new secret.
    async fn create_secret(&self, name: &str, value: &str, description: &str)
        -> Result<(), CloudError>;

    /// Replace the value of an existing secret.
    async fn update_secret(&self, name: &str, value: &str) -> Result<(), CloudError>;

    /// Read a secret and parse it as JSON.
    async fn get(&self, name: &str) -> Result<Value, CloudError> {
        let raw = self.get_secret_string(name).await?;
        serde_json::from_str(&raw)
            .map_err(|e| CloudError::InvalidResponse(format!("secret {} is not JSON: {}", name, e)))
    }

    /// Write a JSON secret, creating it if absent.
    ///
    /// The existence check and the write are separate calls; a concurrent
    /// writer between them can make the create or update fail.
    async fn put(&self, name: &str, value: &Value) -> Result<(), CloudError> {
        let value = value.to_string();
        if self.secret_exists(name).await? {
            self.update_secret(name, &value).await?;
            info!(secret = name, "Secret updated");
        } else {
            self.create_secret(name, &value, SECRET_DESCRIPTION).await?;
            info!(secret = name, "Secret created");
        }
        Ok(())
    }
}

/// Auxiliary resource lookups.
#[async_trait]
pub trait ResourceDirectory: Send + Sync {
    /// List knowledge bases (first page).
    async fn list_knowledge_bases(&self) -> Result<Vec<KnowledgeBase>, CloudError>;

    /// ARN of an IAM role. Fails with [`CloudError::NotFound`] if the role does not exist.
    async fn role_arn(&self, role_name: &str) -> Result<String, CloudError>;

    /// List up to `max_results` agent runtimes.
    async fn list_agent_runtimes(&self, max_results: i32) -> Result<Vec<AgentRuntime>, CloudError>;

    /// Id of the knowledge base with exactly this name.
    async fn find_knowledge_base(&self, name: &str) -> Result<Option<String>, CloudError> {
        let bases = self.list_knowledge_bases().await?;
        Ok(bases.into_iter().find(|kb| kb.name == name).map(|kb| kb.id))
    }

    /// ARN of an IAM role that must exist.
    async fn find_role_arn(&self, role_name: &str) -> Result<String, CloudError> {
        self.role_arn(role_name).await
    }

    /// ARN of the runtime serving `mcp_type` for `project`.
    ///
    /// Runtimes are registered as `{project}_{type}` by project deployments and
    /// as `mcp_{type}` by the shared ones; the project name wins when both exist.
    async fn find_agent_runtime(
        &self,
        mcp_type: &str,
        project: &str,
    ) -> Result<Option<String>, CloudError> {
        let (primary, secondary) = runtime_names(mcp_type, project);
        let runtimes = self.list_agent_runtimes(MAX_AGENT_RUNTIMES).await?;
        debug!(count = runtimes.len(), primary = %primary, "Listed agent runtimes");

        for name in [&primary, &secondary] {
            if let Some(runtime) = runtimes.iter().find(|r| &r.name == name) {
                info!(name = %runtime.name, arn = %runtime.arn, "Found agent runtime");
                return Ok(Some(runtime.arn.clone()));
            }
        }
        Ok(None)
    }
}

/// Page size used when listing agent runtimes.
pub const MAX_AGENT_RUNTIMES: i32 = 100;

/// Primary and secondary runtime names for an MCP type.
pub fn runtime_names(mcp_type: &str, project: &str) -> (String, String) {
    let suffix = mcp_type.replace('-', "_");
    (
        format!("{}_{}", project.to_lowercase(), suffix),
        format!("mcp_{}", suffix),
    )
}
