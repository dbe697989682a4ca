// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error types for the MCP bootstrapper.
//!
//! This module provides strongly-typed errors for the configuration file, the
//! cloud directories, and descriptor building, using `thiserror` for ergonomic
//! error definitions.

use thiserror::Error;

/// Errors returned by the cloud directory services.
#[derive(Error, Debug)]
pub enum CloudError {
    /// A required cloud resource (role, secret, agent runtime) does not exist.
    #[error("{resource} not found: {name}")]
    NotFound { resource: String, name: String },

    /// Credential validation or exchange failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Any other failure reported by the service or the transport.
    #[error("{service} error: {message}")]
    Service { service: String, message: String },

    /// The service answered, but not with what we expected.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CloudError {
    /// Create a not-found error.
    pub fn not_found(resource: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            name: name.into(),
        }
    }

    /// Create a generic service error.
    pub fn service(service: impl Into<String>, message: impl ToString) -> Self {
        Self::Service {
            service: service.into(),
            message: message.to_string(),
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

/// Errors that can occur during configuration loading and saving.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("IO error reading config: {0}")]
    IoError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::IoError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

/// Top-level error for bootstrap operations.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cloud error: {0}")]
    Cloud(#[from] CloudError),

    #[error("MCP error: {0}")]
    Mcp(#[from] crate::mcp::McpError),
}

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_error_helpers() {
        let err = CloudError::not_found("IAM role", "AmazonBedrockExecutionRoleForKnowledgeBase_mcp");
        assert!(err.is_not_found());
        assert!(!err.is_auth());
        assert!(err.to_string().contains("IAM role"));

        let err = CloudError::Auth("token expired".to_string());
        assert!(err.is_auth());

        let err = CloudError::service("cognito-idp", "throttled");
        assert_eq!(err.to_string(), "cognito-idp error: throttled");
    }

    #[test]
    fn test_config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let config_err: ConfigError = io_err.into();
        assert!(matches!(config_err, ConfigError::NotFound(_)));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let config_err: ConfigError = io_err.into();
        assert!(matches!(config_err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_config_error_from_json() {
        let result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid json");
        let json_err = result.unwrap_err();
        let config_err: ConfigError = json_err.into();
        assert!(matches!(config_err, ConfigError::JsonError(_)));
    }

    #[test]
    fn test_bootstrap_error_from_cloud() {
        let err: BootstrapError = CloudError::not_found("IAM role", "missing").into();
        assert!(matches!(err, BootstrapError::Cloud(CloudError::NotFound { .. })));
        assert!(err.to_string().contains("missing"));
    }
}
