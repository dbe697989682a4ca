// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Bearer token retrieval, validation, and refresh.
//!
//! The token lives in a Secrets Manager secret shaped as
//! `{"bearer_key": ..., "bearer_token": ...}`. A stored token is checked against
//! Cognito before use; when the check fails a fresh token is minted with the
//! configured test user and written back to the secret.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::cloud::{IdentityDirectory, SecretStore};
use crate::config::{default_client_name, find_client_in_any_pool, find_pool_client, non_empty};
use crate::context::BootstrapContext;

/// Label stored next to the token in the secret.
pub const BEARER_KEY: &str = "mcp_server_bearer_token";

/// Number of token characters that may appear in logs.
const TOKEN_PREVIEW_CHARS: usize = 12;

/// Contents of the bearer token secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerSecret {
    /// Optional label; secrets written by other tools may carry only the token.
    #[serde(default)]
    pub bearer_key: String,
    pub bearer_token: String,
}

impl BearerSecret {
    /// A secret carrying `token` under the standard key label.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            bearer_key: BEARER_KEY.to_string(),
            bearer_token: token.into(),
        }
    }
}

/// Where the cached token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenState {
    /// No usable token.
    #[default]
    NoToken,
    /// Read from the secret store, not yet checked.
    Retrieved,
    /// Read from the secret store and accepted by the identity provider.
    Validated,
    /// Minted by a fresh sign-in.
    Refreshed,
}

/// A log-safe prefix of a token.
pub fn token_preview(token: &str) -> String {
    let mut preview: String = token.chars().take(TOKEN_PREVIEW_CHARS).collect();
    if token.chars().count() > TOKEN_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

/// Keeps one valid bearer token for the lifetime of the manager.
pub struct TokenManager {
    secrets: Arc<dyn SecretStore>,
    identity: Arc<dyn IdentityDirectory>,
    cached: Option<String>,
    state: TokenState,
}

impl TokenManager {
    /// Create a manager with an empty cache.
    pub fn new(secrets: Arc<dyn SecretStore>, identity: Arc<dyn IdentityDirectory>) -> Self {
        Self {
            secrets,
            identity,
            cached: None,
            state: TokenState::NoToken,
        }
    }

    /// Where the current token came from.
    pub fn state(&self) -> TokenState {
        self.state
    }

    /// The memoized token, if one has been accepted.
    pub fn cached(&self) -> Option<&str> {
        self.cached.as_deref()
    }

    /// Forget the memoized token so the next request re-validates.
    pub fn invalidate(&mut self) {
        self.cached = None;
        self.state = TokenState::NoToken;
    }

    /// Read the stored token. Missing or malformed secrets yield `None`.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, secret_name: &str) -> Option<String> {
        let value = match self.secrets.get(secret_name).await {
            Ok(value) => value,
            Err(e) => {
                info!(error = %e, "Error getting stored token");
                return None;
            }
        };

        match serde_json::from_value::<BearerSecret>(value) {
            Ok(secret) if !secret.bearer_token.is_empty() => {
                debug!(token = %token_preview(&secret.bearer_token), "Bearer token from secret store");
                Some(secret.bearer_token)
            }
            Ok(_) | Err(_) => {
                info!("No bearer token found in secret store");
                None
            }
        }
    }

    /// Whether the identity provider accepts `token`.
    pub async fn validate(&self, token: Option<&str>) -> bool {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return false;
        };

        match self.identity.get_user(token).await {
            Ok(username) => {
                debug!(username = %username, "Bearer token is valid");
                true
            }
            Err(e) => {
                info!(error = %e, token = %token_preview(token), "Bearer token rejected");
                false
            }
        }
    }

    /// Sign in with the configured test user and return a fresh access token.
    ///
    /// When the config has no client id it is looked up by client name and
    /// saved back to the config file (best-effort).
    #[instrument(skip_all)]
    pub async fn refresh(&self, ctx: &mut BootstrapContext) -> Option<String> {
        let cognito = &ctx.config.cognito;
        let (Some(username), Some(password)) = (
            non_empty(&cognito.test_username).map(str::to_string),
            non_empty(&cognito.test_password).map(str::to_string),
        ) else {
            warn!("No test credentials configured, cannot mint a token");
            return None;
        };

        let configured = non_empty(&cognito.client_id).map(str::to_string);
        let client_id = match configured {
            Some(id) => id,
            None => self.discover_client_id(ctx).await?,
        };

        match self.identity.initiate_auth(&client_id, &username, &password).await {
            Ok(token) => {
                info!(token = %token_preview(&token), "Obtained fresh Cognito token");
                Some(token)
            }
            Err(e) => {
                warn!(error = %e, "Error getting Cognito token");
                None
            }
        }
    }

    async fn discover_client_id(&self, ctx: &mut BootstrapContext) -> Option<String> {
        let project = ctx.project_name().to_string();
        let cognito = &ctx.config.cognito;
        let client_name = non_empty(&cognito.client_name)
            .map(str::to_string)
            .unwrap_or_else(|| default_client_name(&project));

        let found = match non_empty(&cognito.user_pool_id) {
            Some(pool_id) => find_pool_client(self.identity.as_ref(), pool_id, &client_name).await,
            None => find_client_in_any_pool(self.identity.as_ref(), &client_name).await,
        };

        let client_id = match found {
            Ok(Some(id)) => id,
            Ok(None) => {
                warn!(client = %client_name, "No app client found");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to look up app client");
                return None;
            }
        };

        info!(client_id = %client_id, "Existing app client found");
        ctx.config.cognito.client_id = Some(client_id.clone());
        if let Err(e) = ctx.persist() {
            warn!(error = %e, "Failed to save client id to config");
        }
        Some(client_id)
    }

    /// Write `token` to the secret store. Failures are logged and ignored.
    pub async fn store(&self, secret_name: &str, token: &str) {
        let value = match serde_json::to_value(BearerSecret::new(token)) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to encode bearer secret");
                return;
            }
        };
        if let Err(e) = self.secrets.put(secret_name, &value).await {
            warn!(error = %e, secret = secret_name, "Error saving bearer token");
        }
    }

    /// A token the identity provider accepts, or `None` if none can be had.
    ///
    /// Once a token is accepted it is reused without further checks.
    pub async fn ensure_valid(&mut self, ctx: &mut BootstrapContext) -> Option<String> {
        if let Some(token) = &self.cached {
            return Some(token.clone());
        }

        let secret_name = ctx.config.secret_name.clone();
        let stored = match secret_name.as_deref() {
            Some(name) => self.retrieve(name).await,
            None => None,
        };
        if stored.is_some() {
            self.state = TokenState::Retrieved;
        }

        if self.validate(stored.as_deref()).await {
            self.state = TokenState::Validated;
            self.cached = stored;
            return self.cached.clone();
        }

        info!("Getting fresh bearer token from Cognito");
        let Some(token) = self.refresh(ctx).await else {
            warn!("Failed to get bearer token from Cognito");
            self.state = TokenState::NoToken;
            return None;
        };

        match secret_name.as_deref() {
            Some(name) => self.store(name, &token).await,
            None => warn!("No secret name configured, keeping token in memory only"),
        }
        self.state = TokenState::Refreshed;
        self.cached = Some(token);
        self.cached.clone()
    }
}
