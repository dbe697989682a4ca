// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! AWS SDK implementations of the cloud directory traits.
//!
//! [`AwsCloud`] bundles the Cognito, Secrets Manager, IAM, Bedrock Agent, and
//! AgentCore control clients for one region and implements all three traits.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cognitoidentityprovider::types::AuthFlowType;
use tracing::{debug, instrument};

use super::{
    AgentRuntime, IdentityDirectory, KnowledgeBase, PoolClient, ResourceDirectory, SecretStore,
    UserPool,
};
use crate::error::CloudError;

/// AWS-backed cloud directory.
#[derive(Debug, Clone)]
pub struct AwsCloud {
    cognito: aws_sdk_cognitoidentityprovider::Client,
    secrets: aws_sdk_secretsmanager::Client,
    iam: aws_sdk_iam::Client,
    bedrock_agent: aws_sdk_bedrockagent::Client,
    agentcore: aws_sdk_bedrockagentcorecontrol::Client,
}

impl AwsCloud {
    /// Build clients from the default credential chain for `region`.
    pub async fn from_region(region: impl Into<String>) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.into()))
            .load()
            .await;
        Self::from_sdk_config(&sdk_config)
    }

    /// Build clients from an already loaded SDK configuration.
    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            cognito: aws_sdk_cognitoidentityprovider::Client::new(sdk_config),
            secrets: aws_sdk_secretsmanager::Client::new(sdk_config),
            iam: aws_sdk_iam::Client::new(sdk_config),
            bedrock_agent: aws_sdk_bedrockagent::Client::new(sdk_config),
            agentcore: aws_sdk_bedrockagentcorecontrol::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl IdentityDirectory for AwsCloud {
    async fn list_user_pools(&self, max_results: i32) -> Result<Vec<UserPool>, CloudError> {
        let output = self
            .cognito
            .list_user_pools()
            .max_results(max_results)
            .send()
            .await
            .map_err(|e| CloudError::service("cognito-idp", e.into_service_error()))?;

        Ok(output
            .user_pools()
            .iter()
            .filter_map(|pool| {
                Some(UserPool {
                    id: pool.id()?.to_string(),
                    name: pool.name()?.to_string(),
                })
            })
            .collect())
    }

    async fn list_user_pool_clients(&self, pool_id: &str) -> Result<Vec<PoolClient>, CloudError> {
        let output = self
            .cognito
            .list_user_pool_clients()
            .user_pool_id(pool_id)
            .send()
            .await
            .map_err(|e| CloudError::service("cognito-idp", e.into_service_error()))?;

        Ok(output
            .user_pool_clients()
            .iter()
            .filter_map(|client| {
                Some(PoolClient {
                    id: client.client_id()?.to_string(),
                    name: client.client_name()?.to_string(),
                })
            })
            .collect())
    }

    #[instrument(skip_all)]
    async fn get_user(&self, access_token: &str) -> Result<String, CloudError> {
        let output = self
            .cognito
            .get_user()
            .access_token(access_token)
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_not_authorized_exception() || err.is_user_not_found_exception() {
                    CloudError::Auth(err.to_string())
                } else {
                    CloudError::service("cognito-idp", err)
                }
            })?;

        Ok(output.username().to_string())
    }

    #[instrument(skip(self, password))]
    async fn initiate_auth(
        &self,
        client_id: &str,
        username: &str,
        password: &str,
    ) -> Result<String, CloudError> {
        let output = self
            .cognito
            .initiate_auth()
            .client_id(client_id)
            .auth_flow(AuthFlowType::UserPasswordAuth)
            .auth_parameters("USERNAME", username)
            .auth_parameters("PASSWORD", password)
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_not_authorized_exception() || err.is_user_not_found_exception() {
                    CloudError::Auth(err.to_string())
                } else {
                    CloudError::service("cognito-idp", err)
                }
            })?;

        output
            .authentication_result()
            .and_then(|result| result.access_token())
            .map(str::to_string)
            .ok_or_else(|| {
                CloudError::InvalidResponse("InitiateAuth returned no access token".to_string())
            })
    }
}

#[async_trait]
impl SecretStore for AwsCloud {
    async fn get_secret_string(&self, name: &str) -> Result<String, CloudError> {
        let output = self
            .secrets
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_resource_not_found_exception() {
                    CloudError::not_found("secret", name)
                } else {
                    CloudError::service("secretsmanager", err)
                }
            })?;

        output
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| CloudError::InvalidResponse(format!("secret {} has no string value", name)))
    }

    async fn secret_exists(&self, name: &str) -> Result<bool, CloudError> {
        match self.secrets.describe_secret().secret_id(name).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                let err = e.into_service_error();
                if err.is_resource_not_found_exception() {
                    Ok(false)
                } else {
                    Err(CloudError::service("secretsmanager", err))
                }
            }
        }
    }

    async fn create_secret(
        &self,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<(), CloudError> {
        self.secrets
            .create_secret()
            .name(name)
            .secret_string(value)
            .description(description)
            .send()
            .await
            .map_err(|e| CloudError::service("secretsmanager", e.into_service_error()))?;
        Ok(())
    }

    async fn update_secret(&self, name: &str, value: &str) -> Result<(), CloudError> {
        self.secrets
            .put_secret_value()
            .secret_id(name)
            .secret_string(value)
            .send()
            .await
            .map_err(|e| CloudError::service("secretsmanager", e.into_service_error()))?;
        Ok(())
    }
}

#[async_trait]
impl ResourceDirectory for AwsCloud {
    async fn list_knowledge_bases(&self) -> Result<Vec<KnowledgeBase>, CloudError> {
        let output = self
            .bedrock_agent
            .list_knowledge_bases()
            .send()
            .await
            .map_err(|e| CloudError::service("bedrock-agent", e.into_service_error()))?;

        Ok(output
            .knowledge_base_summaries()
            .iter()
            .map(|kb| KnowledgeBase {
                id: kb.knowledge_base_id().to_string(),
                name: kb.name().to_string(),
            })
            .collect())
    }

    async fn role_arn(&self, role_name: &str) -> Result<String, CloudError> {
        let output = self
            .iam
            .get_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_no_such_entity_exception() {
                    CloudError::not_found("IAM role", role_name)
                } else {
                    CloudError::service("iam", err)
                }
            })?;

        output
            .role()
            .map(|role| role.arn().to_string())
            .ok_or_else(|| CloudError::not_found("IAM role", role_name))
    }

    async fn list_agent_runtimes(&self, max_results: i32) -> Result<Vec<AgentRuntime>, CloudError> {
        let output = self
            .agentcore
            .list_agent_runtimes()
            .max_results(max_results)
            .send()
            .await
            .map_err(|e| CloudError::service("bedrock-agentcore-control", e.into_service_error()))?;

        let runtimes: Vec<AgentRuntime> = output
            .agent_runtimes()
            .iter()
            .map(|runtime| AgentRuntime {
                name: runtime.agent_runtime_name().to_string(),
                arn: runtime.agent_runtime_arn().to_string(),
            })
            .collect();
        debug!(count = runtimes.len(), "Listed agent runtimes");
        Ok(runtimes)
    }
}
