//! Collaborator wiring for the lifecycle handler

use anyhow::Context;
use smtpcred_core::SmtpRegion;
use smtpcred_lifecycle::{HandlerConfig, LifecycleHandler};
use smtpcred_ssm::{EphemeralParameterStore, ParameterStore};
use smtpcred_sts::{AccountResolver, StaticAccountResolver};
use std::sync::Arc;
use tracing::info;

use crate::config::{BackendConfig, HandlerSettings};

type Collaborators = (Arc<dyn ParameterStore>, Arc<dyn AccountResolver>);

/// Validate the settings and build a handler with its collaborators
pub async fn build_handler(
    settings: HandlerSettings,
    backend: &BackendConfig,
) -> anyhow::Result<LifecycleHandler> {
    let region = settings
        .region
        .context("a region is required (--region or SMTPCRED_REGION)")?;
    let prefix = settings
        .parameter_prefix
        .context("a parameter prefix is required (--parameter-prefix or SMTPCRED_PARAMETER_PREFIX)")?;

    let config = HandlerConfig::new(&region, prefix, settings.kms_key_id)?;

    let (store, identity) = match backend {
        BackendConfig::Ephemeral { account_id } => ephemeral_backend(account_id)?,
        BackendConfig::Aws => aws_backend(config.region()).await?,
    };

    info!(
        region = %config.region(),
        prefix = %config.parameter_prefix(),
        backend = ?backend,
        "Lifecycle handler ready"
    );

    Ok(LifecycleHandler::new(config, store, identity))
}

fn ephemeral_backend(account_id: &str) -> anyhow::Result<Collaborators> {
    let identity = StaticAccountResolver::new(account_id)?;
    Ok((Arc::new(EphemeralParameterStore::new()), Arc::new(identity)))
}

#[cfg(feature = "aws")]
async fn aws_backend(region: SmtpRegion) -> anyhow::Result<Collaborators> {
    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.as_str()))
        .load()
        .await;

    Ok((
        Arc::new(smtpcred_ssm::SsmParameterStore::from_conf(&sdk_config)),
        Arc::new(smtpcred_sts::StsAccountResolver::from_conf(&sdk_config)),
    ))
}

#[cfg(not(feature = "aws"))]
async fn aws_backend(_region: SmtpRegion) -> anyhow::Result<Collaborators> {
    anyhow::bail!("the aws backend requires building with `--features aws`")
}
