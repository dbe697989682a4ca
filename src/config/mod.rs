// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration module for the bootstrapper.
//!
//! Handles the `config.json` document and its lazy population:
//! - Loading and saving the document ([`ConfigStore`])
//! - Typed access with fill-once helpers ([`Configuration`], [`CognitoConfig`])
//! - Discovery of missing fields from the cloud ([`ConfigInitializer`])
//!
//! Region and project name default to `us-west-2` and `mcp` and are read from
//! the document only, never from the process environment.

mod cognito;
mod initializer;
mod store;
mod types;

pub use cognito::{
    default_client_name, default_test_username, default_user_pool_name, find_client_in_any_pool,
    find_pool_client, find_user_pool, populate_cognito, DEFAULT_TEST_PASSWORD,
    USER_POOL_LIST_LIMIT,
};
pub use initializer::{default_secret_name, knowledge_base_role_name, ConfigInitializer};
pub use store::{ConfigStore, CONFIG_FILE};
pub use types::{
    fill_once, is_unset, non_empty, CognitoConfig, Configuration, DEFAULT_PROJECT_NAME,
    DEFAULT_REGION,
};
