// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Population of the `cognito` configuration section.
//!
//! Pool and client ids are discovered by name. Discovery is best-effort:
//! failures are logged and leave the id unset.

use tracing::{debug, info, warn};

use crate::cloud::IdentityDirectory;
use crate::error::CloudError;

use super::types::{fill_once, is_unset, non_empty, CognitoConfig};

/// Password given to the placeholder test user.
pub const DEFAULT_TEST_PASSWORD: &str = "TestPassword123!";

/// Page size used when listing user pools.
pub const USER_POOL_LIST_LIMIT: i32 = 60;

/// User pool name used when none is configured.
pub fn default_user_pool_name(project: &str) -> String {
    format!("{}-agentcore-user-pool", project)
}

/// App client name used when none is configured.
pub fn default_client_name(project: &str) -> String {
    format!("{}-agentcore-client", project)
}

/// Placeholder test user written when credentials are missing.
pub fn default_test_username(project: &str) -> String {
    format!("{}-test-user@example.com", project)
}

/// Fill the unset fields of `cognito` with defaults and discovered ids.
///
/// Returns whether anything was written.
pub async fn populate_cognito(
    identity: &dyn IdentityDirectory,
    cognito: &mut CognitoConfig,
    project: &str,
) -> bool {
    let before = cognito.clone();

    // A pool named by the user is trusted as-is; only the default name is looked up.
    if fill_once(&mut cognito.user_pool_name, default_user_pool_name(project)) {
        info!(user_pool_name = ?cognito.user_pool_name, "Using default user pool name");

        if is_unset(&cognito.user_pool_id) {
            let pool_name = default_user_pool_name(project);
            match find_user_pool(identity, &pool_name).await {
                Ok(Some(id)) => {
                    info!(user_pool_id = %id, "Found cognito user pool");
                    cognito.user_pool_id = Some(id);
                }
                Ok(None) => debug!(pool = %pool_name, "No user pool with this name"),
                Err(e) => warn!(error = %e, "Failed to list user pools"),
            }
        }
    }

    if fill_once(&mut cognito.client_name, default_client_name(project)) {
        info!(client_name = ?cognito.client_name, "Using default client name");
    }

    if is_unset(&cognito.client_id) {
        let client_name = non_empty(&cognito.client_name).unwrap_or_default().to_string();
        match non_empty(&cognito.user_pool_id).map(str::to_string) {
            Some(pool_id) => match find_pool_client(identity, &pool_id, &client_name).await {
                Ok(Some(id)) => {
                    info!(client_id = %id, "Found cognito client");
                    cognito.client_id = Some(id);
                }
                Ok(None) => debug!(client = %client_name, "No app client with this name"),
                Err(e) => warn!(error = %e, "Failed to list user pool clients"),
            },
            None => debug!("User pool unknown, skipping client lookup"),
        }
    }

    if is_unset(&cognito.test_username) || is_unset(&cognito.test_password) {
        warn!(
            "No test credentials in config, using placeholder user; update test_username and test_password"
        );
        cognito.test_username = Some(default_test_username(project));
        cognito.test_password = Some(DEFAULT_TEST_PASSWORD.to_string());
    }

    *cognito != before
}

/// Id of the user pool named `name`.
pub async fn find_user_pool(
    identity: &dyn IdentityDirectory,
    name: &str,
) -> Result<Option<String>, CloudError> {
    let pools = identity.list_user_pools(USER_POOL_LIST_LIMIT).await?;
    Ok(pools.into_iter().find(|p| p.name == name).map(|p| p.id))
}

/// Id of the app client named `client_name` in pool `pool_id`.
pub async fn find_pool_client(
    identity: &dyn IdentityDirectory,
    pool_id: &str,
    client_name: &str,
) -> Result<Option<String>, CloudError> {
    let clients = identity.list_user_pool_clients(pool_id).await?;
    Ok(clients.into_iter().find(|c| c.name == client_name).map(|c| c.id))
}

/// Id of the app client named `client_name`, searching every listed pool.
///
/// A pool whose clients cannot be listed is skipped.
pub async fn find_client_in_any_pool(
    identity: &dyn IdentityDirectory,
    client_name: &str,
) -> Result<Option<String>, CloudError> {
    for pool in identity.list_user_pools(USER_POOL_LIST_LIMIT).await? {
        match find_pool_client(identity, &pool.id, client_name).await {
            Ok(Some(id)) => {
                debug!(pool = %pool.id, client_id = %id, "Found app client");
                return Ok(Some(id));
            }
            Ok(None) => {}
            Err(e) => warn!(pool = %pool.id, error = %e, "Failed to list clients"),
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::{PoolClient, UserPool};
    use async_trait::async_trait;

    struct Pools {
        fail_listing: bool,
    }

    #[async_trait]
    impl IdentityDirectory for Pools {
        async fn list_user_pools(&self, _max: i32) -> Result<Vec<UserPool>, CloudError> {
            if self.fail_listing {
                return Err(CloudError::service("cognito-idp", "unavailable"));
            }
            Ok(vec![
                UserPool { id: "pool-a".to_string(), name: "other-pool".to_string() },
                UserPool { id: "pool-b".to_string(), name: "demo-agentcore-user-pool".to_string() },
            ])
        }

        async fn list_user_pool_clients(&self, pool_id: &str) -> Result<Vec<PoolClient>, CloudError> {
            match pool_id {
                "pool-b" => Ok(vec![PoolClient {
                    id: "client-1".to_string(),
                    name: "demo-agentcore-client".to_string(),
                }]),
                "pool-a" => Err(CloudError::service("cognito-idp", "denied")),
                _ => Ok(Vec::new()),
            }
        }

        async fn get_user(&self, _token: &str) -> Result<String, CloudError> {
            Err(CloudError::Auth("unused".to_string()))
        }

        async fn initiate_auth(&self, _c: &str, _u: &str, _p: &str) -> Result<String, CloudError> {
            Err(CloudError::Auth("unused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_populate_empty_section() {
        let identity = Pools { fail_listing: false };
        let mut cognito = CognitoConfig::default();

        assert!(populate_cognito(&identity, &mut cognito, "demo").await);
        assert_eq!(cognito.user_pool_name.as_deref(), Some("demo-agentcore-user-pool"));
        assert_eq!(cognito.user_pool_id.as_deref(), Some("pool-b"));
        assert_eq!(cognito.client_name.as_deref(), Some("demo-agentcore-client"));
        assert_eq!(cognito.client_id.as_deref(), Some("client-1"));
        assert_eq!(cognito.test_username.as_deref(), Some("demo-test-user@example.com"));
        assert_eq!(cognito.test_password.as_deref(), Some(DEFAULT_TEST_PASSWORD));
    }

    #[tokio::test]
    async fn test_populate_keeps_existing_fields() {
        let identity = Pools { fail_listing: false };
        let mut cognito = CognitoConfig {
            user_pool_name: Some("custom-pool".to_string()),
            client_id: Some("pinned".to_string()),
            test_username: Some("me@example.com".to_string()),
            test_password: Some("hunter2".to_string()),
            ..Default::default()
        };

        populate_cognito(&identity, &mut cognito, "demo").await;
        assert_eq!(cognito.user_pool_name.as_deref(), Some("custom-pool"));
        assert_eq!(cognito.user_pool_id, None);
        assert_eq!(cognito.client_id.as_deref(), Some("pinned"));
        assert_eq!(cognito.test_username.as_deref(), Some("me@example.com"));
        assert_eq!(cognito.test_password.as_deref(), Some("hunter2"));
    }

    #[tokio::test]
    async fn test_populate_skips_pool_search_for_named_pool() {
        let identity = Pools { fail_listing: false };
        let mut cognito = CognitoConfig {
            user_pool_name: Some("demo-agentcore-user-pool".to_string()),
            ..Default::default()
        };

        populate_cognito(&identity, &mut cognito, "demo").await;
        assert_eq!(cognito.user_pool_id, None);
        assert_eq!(cognito.client_id, None);
        assert_eq!(cognito.client_name.as_deref(), Some("demo-agentcore-client"));
    }

    #[tokio::test]
    async fn test_populate_resets_partial_credentials() {
        let identity = Pools { fail_listing: false };
        let mut cognito = CognitoConfig {
            test_username: Some("me@example.com".to_string()),
            ..Default::default()
        };

        populate_cognito(&identity, &mut cognito, "demo").await;
        assert_eq!(cognito.test_username.as_deref(), Some("demo-test-user@example.com"));
        assert_eq!(cognito.test_password.as_deref(), Some(DEFAULT_TEST_PASSWORD));
    }

    #[tokio::test]
    async fn test_populate_tolerates_listing_failure() {
        let identity = Pools { fail_listing: true };
        let mut cognito = CognitoConfig::default();

        populate_cognito(&identity, &mut cognito, "demo").await;
        assert_eq!(cognito.user_pool_id, None);
        assert_eq!(cognito.client_id, None);
        assert_eq!(cognito.client_name.as_deref(), Some("demo-agentcore-client"));
    }

    #[tokio::test]
    async fn test_find_client_in_any_pool_skips_failing_pool() {
        let identity = Pools { fail_listing: false };
        let id = find_client_in_any_pool(&identity, "demo-agentcore-client").await.unwrap();
        assert_eq!(id.as_deref(), Some("client-1"));

        let id = find_client_in_any_pool(&identity, "nope").await.unwrap();
        assert_eq!(id, None);
    }
}
