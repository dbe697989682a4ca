// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Fills in missing configuration fields from the cloud directories.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::cloud::{IdentityDirectory, ResourceDirectory};
use crate::context::BootstrapContext;
use crate::error::Result;

use super::cognito::populate_cognito;
use super::types::{fill_once, is_unset};

/// Role name the knowledge base executes as.
pub fn knowledge_base_role_name(project: &str) -> String {
    format!("AmazonBedrockExecutionRoleForKnowledgeBase_{}", project)
}

/// Default Secrets Manager secret for the bearer token.
pub fn default_secret_name(project: &str) -> String {
    format!("{}/credentials", project)
}

/// Populates unset configuration fields and persists the result.
pub struct ConfigInitializer {
    identity: Arc<dyn IdentityDirectory>,
    resources: Arc<dyn ResourceDirectory>,
}

impl ConfigInitializer {
    /// Create an initializer over the given directories.
    pub fn new(identity: Arc<dyn IdentityDirectory>, resources: Arc<dyn ResourceDirectory>) -> Self {
        Self { identity, resources }
    }

    /// Fill unset fields, then save if anything changed.
    ///
    /// Fields that already hold a value are never touched, so a complete
    /// configuration costs no service calls and no write. A missing knowledge
    /// base role is fatal.
    #[instrument(skip_all, fields(project = %ctx.project_name()))]
    pub async fn initialize(&self, ctx: &mut BootstrapContext) -> Result<bool> {
        let project = ctx.project_name().to_string();
        let before = ctx.config.clone();
        let config = &mut ctx.config;

        fill_once(&mut config.knowledge_base_name, project.as_str());

        if is_unset(&config.knowledge_base_id) {
            let id = match self.resources.find_knowledge_base(&project).await {
                Ok(Some(id)) => id,
                Ok(None) => String::new(),
                Err(e) => {
                    warn!(error = %e, "Failed to list knowledge bases");
                    String::new()
                }
            };
            info!(knowledge_base_id = %id, "Resolved knowledge base");
            config.knowledge_base_id = Some(id);
        }

        if is_unset(&config.knowledge_base_role) {
            let role_name = knowledge_base_role_name(&project);
            let arn = self.resources.find_role_arn(&role_name).await?;
            info!(knowledge_base_role = %arn, "Resolved knowledge base role");
            fill_once(&mut config.knowledge_base_role_name, role_name);
            config.knowledge_base_role = Some(arn);
        }

        if config.secret_name.is_none() {
            let secret_name = default_secret_name(&project);
            info!(secret_name = %secret_name, "Using default secret name");
            config.secret_name = Some(secret_name);
        }

        if config.cognito.is_empty() {
            populate_cognito(self.identity.as_ref(), &mut config.cognito, &project).await;
        }

        let changed = ctx.config != before;
        if changed {
            ctx.persist()?;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::{AgentRuntime, KnowledgeBase, PoolClient, UserPool};
    use crate::config::{CognitoConfig, ConfigStore, Configuration};
    use crate::error::{BootstrapError, CloudError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[derive(Default)]
    struct Directory {
        calls: AtomicUsize,
        missing_role: bool,
    }

    impl Directory {
        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl IdentityDirectory for Directory {
        async fn list_user_pools(&self, _max: i32) -> std::result::Result<Vec<UserPool>, CloudError> {
            self.hit();
            Ok(vec![UserPool { id: "pool-1".to_string(), name: "demo-agentcore-user-pool".to_string() }])
        }

        async fn list_user_pool_clients(&self, _pool: &str) -> std::result::Result<Vec<PoolClient>, CloudError> {
            self.hit();
            Ok(vec![PoolClient { id: "client-1".to_string(), name: "demo-agentcore-client".to_string() }])
        }

        async fn get_user(&self, _token: &str) -> std::result::Result<String, CloudError> {
            self.hit();
            Ok("user".to_string())
        }

        async fn initiate_auth(&self, _c: &str, _u: &str, _p: &str) -> std::result::Result<String, CloudError> {
            self.hit();
            Ok("token".to_string())
        }
    }

    #[async_trait]
    impl ResourceDirectory for Directory {
        async fn list_knowledge_bases(&self) -> std::result::Result<Vec<KnowledgeBase>, CloudError> {
            self.hit();
            Ok(vec![KnowledgeBase { id: "KB123".to_string(), name: "demo".to_string() }])
        }

        async fn role_arn(&self, role_name: &str) -> std::result::Result<String, CloudError> {
            self.hit();
            if self.missing_role {
                Err(CloudError::not_found("IAM role", role_name))
            } else {
                Ok(format!("arn:aws:iam::123456789012:role/{}", role_name))
            }
        }

        async fn list_agent_runtimes(&self, _max: i32) -> std::result::Result<Vec<AgentRuntime>, CloudError> {
            self.hit();
            Ok(Vec::new())
        }
    }

    fn context(temp: &TempDir, config: Configuration) -> BootstrapContext {
        BootstrapContext::new(config, ConfigStore::in_dir(temp.path()))
    }

    fn initializer(dir: &Arc<Directory>) -> ConfigInitializer {
        ConfigInitializer::new(dir.clone(), dir.clone())
    }

    fn demo_config() -> Configuration {
        Configuration {
            project_name: Some("demo".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_initialize_fills_everything() {
        let temp = TempDir::new().unwrap();
        let dir = Arc::new(Directory::default());
        let mut ctx = context(&temp, demo_config());

        assert!(initializer(&dir).initialize(&mut ctx).await.unwrap());

        let config = &ctx.config;
        assert_eq!(config.knowledge_base_name.as_deref(), Some("demo"));
        assert_eq!(config.knowledge_base_id.as_deref(), Some("KB123"));
        assert_eq!(
            config.knowledge_base_role_name.as_deref(),
            Some("AmazonBedrockExecutionRoleForKnowledgeBase_demo")
        );
        assert_eq!(
            config.knowledge_base_role.as_deref(),
            Some("arn:aws:iam::123456789012:role/AmazonBedrockExecutionRoleForKnowledgeBase_demo")
        );
        assert_eq!(config.secret_name.as_deref(), Some("demo/credentials"));
        assert_eq!(config.cognito.client_id.as_deref(), Some("client-1"));

        let saved = ctx.store().load().unwrap();
        assert_eq!(&saved, config);
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = Arc::new(Directory::default());
        let mut ctx = context(&temp, demo_config());
        let init = initializer(&dir);

        init.initialize(&mut ctx).await.unwrap();
        let calls = dir.calls.load(Ordering::SeqCst);
        let snapshot = ctx.config.clone();
        std::fs::remove_file(ctx.store().path()).unwrap();

        assert!(!init.initialize(&mut ctx).await.unwrap());
        assert_eq!(dir.calls.load(Ordering::SeqCst), calls);
        assert_eq!(ctx.config, snapshot);
        assert!(!ctx.store().path().exists());
    }

    #[tokio::test]
    async fn test_initialize_never_overwrites_present_fields() {
        let temp = TempDir::new().unwrap();
        let dir = Arc::new(Directory::default());
        let config = Configuration {
            project_name: Some("demo".to_string()),
            knowledge_base_name: Some("my-kb".to_string()),
            knowledge_base_id: Some("KBFIXED".to_string()),
            knowledge_base_role: Some("arn:aws:iam::1:role/custom".to_string()),
            secret_name: Some("custom/secret".to_string()),
            cognito: CognitoConfig {
                client_id: Some("pinned".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut ctx = context(&temp, config.clone());

        initializer(&dir).initialize(&mut ctx).await.unwrap();
        assert_eq!(ctx.config, config);
        assert_eq!(dir.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_initialize_missing_knowledge_base_leaves_empty_id() {
        let temp = TempDir::new().unwrap();
        let dir = Arc::new(Directory::default());
        let mut ctx = context(
            &temp,
            Configuration {
                project_name: Some("other".to_string()),
                ..Default::default()
            },
        );

        initializer(&dir).initialize(&mut ctx).await.unwrap();
        assert_eq!(ctx.config.knowledge_base_id.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_initialize_missing_role_is_fatal() {
        let temp = TempDir::new().unwrap();
        let dir = Arc::new(Directory {
            missing_role: true,
            ..Default::default()
        });
        let mut ctx = context(&temp, demo_config());

        let err = initializer(&dir).initialize(&mut ctx).await.unwrap_err();
        assert!(matches!(err, BootstrapError::Cloud(CloudError::NotFound { .. })));
        assert!(!ctx.store().path().exists());
    }
}
