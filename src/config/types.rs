// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration type definitions.
//!
//! Defines the structure of the bootstrap configuration document. Fields are
//! filled once: automation only writes a field that is absent or empty.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Region used when the configuration does not name one.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Project name used when the configuration does not name one.
pub const DEFAULT_PROJECT_NAME: &str = "mcp";

/// Bootstrap configuration, persisted as `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// AWS region for every service call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Project name, used to derive resource names
    #[serde(rename = "projectName", skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    /// Bedrock knowledge base name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_base_name: Option<String>,

    /// Bedrock knowledge base id (empty when lookup found nothing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_base_id: Option<String>,

    /// IAM role name used by the knowledge base
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_base_role_name: Option<String>,

    /// IAM role ARN used by the knowledge base
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_base_role: Option<String>,

    /// Secrets Manager secret holding the bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,

    /// Cognito user pool and test credentials
    #[serde(default, skip_serializing_if = "CognitoConfig::is_empty")]
    pub cognito: CognitoConfig,

    /// Keys this crate does not interpret, kept for round trips
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Configuration {
    /// Region, falling back to [`DEFAULT_REGION`].
    pub fn region(&self) -> &str {
        non_empty(&self.region).unwrap_or(DEFAULT_REGION)
    }

    /// Project name, falling back to [`DEFAULT_PROJECT_NAME`].
    pub fn project_name(&self) -> &str {
        non_empty(&self.project_name).unwrap_or(DEFAULT_PROJECT_NAME)
    }
}

/// The `cognito` section of [`Configuration`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CognitoConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_pool_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_pool_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Placeholder account used to mint bearer tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_password: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CognitoConfig {
    /// True when no field at all is present.
    pub fn is_empty(&self) -> bool {
        self.user_pool_name.is_none()
            && self.user_pool_id.is_none()
            && self.client_name.is_none()
            && self.client_id.is_none()
            && self.test_username.is_none()
            && self.test_password.is_none()
            && self.extra.is_empty()
    }
}

/// Returns the value when it is present and not empty.
pub fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}

/// True when the field is absent or empty.
pub fn is_unset(field: &Option<String>) -> bool {
    non_empty(field).is_none()
}

/// Fill-once assignment: writes `value` only when the field is unset.
///
/// Returns whether the field was written.
pub fn fill_once(field: &mut Option<String>, value: impl Into<String>) -> bool {
    if is_unset(field) {
        *field = Some(value.into());
        true
    } else {
        false
    }
}
