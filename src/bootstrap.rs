// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! One-call setup: load the config, fill it in, and hand back a builder.

use std::sync::Arc;

use tracing::info;

use crate::auth::TokenManager;
use crate::cloud::{IdentityDirectory, ResourceDirectory, SecretStore};
use crate::config::{ConfigInitializer, ConfigStore};
use crate::context::BootstrapContext;
use crate::error::Result;
use crate::mcp::DescriptorBuilder;

/// Load the configuration from `store`, populate it through `cloud`, and
/// return a [`DescriptorBuilder`] over the result.
///
/// Fails only when the configuration file cannot be read or written, or when
/// the knowledge base role does not exist.
pub async fn bootstrap<C>(store: ConfigStore, cloud: Arc<C>) -> Result<DescriptorBuilder>
where
    C: IdentityDirectory + SecretStore + ResourceDirectory + 'static,
{
    let mut ctx = BootstrapContext::load(store)?;
    info!(
        path = %ctx.store().path().display(),
        region = %ctx.region(),
        project = %ctx.project_name(),
        "Loaded config"
    );

    let identity: Arc<dyn IdentityDirectory> = cloud.clone();
    let secrets: Arc<dyn SecretStore> = cloud.clone();
    let resources: Arc<dyn ResourceDirectory> = cloud;

    ConfigInitializer::new(identity.clone(), resources.clone())
        .initialize(&mut ctx)
        .await?;

    let tokens = TokenManager::new(secrets, identity);
    Ok(DescriptorBuilder::new(ctx, resources, tokens))
}

/// [`bootstrap`] against AWS in the configured region.
#[cfg(feature = "aws")]
pub async fn bootstrap_aws(store: ConfigStore) -> Result<DescriptorBuilder> {
    let region = store.load()?.region().to_string();
    let cloud = Arc::new(crate::cloud::aws::AwsCloud::from_region(region).await);
    bootstrap(store, cloud).await
}
