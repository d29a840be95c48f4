//! Lifecycle event handler

use secrecy::ExposeSecret;
use smtpcred_auth::derive_smtp_password_for;
use smtpcred_core::{parameter_arn, SmtpRegion};
use smtpcred_ssm::{ParameterStore, PutParameterOptions, StoreError};
use smtpcred_sts::AccountResolver;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::HandlerConfig;
use crate::error::HandlerError;
use crate::event::{EventKind, LifecycleEvent, LifecycleResponse, ParameterKind, ResourceProperties, ResponseData};

/// Converges the stored SMTP credential to the state an event describes.
///
/// Create and Update overwrite the parameter; Delete removes it and accepts an
/// already absent parameter. Every branch returns the same ARN for the same
/// parameter, so retried events converge.
pub struct LifecycleHandler {
    config: HandlerConfig,
    store: Arc<dyn ParameterStore>,
    identity: Arc<dyn AccountResolver>,
}

impl LifecycleHandler {
    pub fn new(
        config: HandlerConfig,
        store: Arc<dyn ParameterStore>,
        identity: Arc<dyn AccountResolver>,
    ) -> Self {
        Self {
            config,
            store,
            identity,
        }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Process one lifecycle event
    pub async fn handle(&self, event: &LifecycleEvent) -> Result<LifecycleResponse, HandlerError> {
        let kind: EventKind = event.request_type.parse().map_err(|err| {
            warn!(request_type = %event.request_type, "Unrecognized lifecycle event");
            err
        })?;

        let properties = event.resource_properties()?;
        let name = self.config.parameter_name(properties.parameter_kind);

        info!(
            event_kind = %kind,
            parameter = %name,
            logical_resource_id = event.logical_resource_id.as_deref().unwrap_or("-"),
            "Handling lifecycle event"
        );

        match kind {
            EventKind::Create | EventKind::Update => self.put_credential(&name, properties).await?,
            EventKind::Delete => self.delete_credential(&name).await?,
        }

        let response = self.respond(name).await?;

        if let Some(previous) = event.physical_resource_id.as_deref() {
            if kind == EventKind::Update && previous != response.physical_resource_id {
                info!(
                    previous = %previous,
                    current = %response.physical_resource_id,
                    "Resource identifier changed; orchestrator will delete the previous parameter"
                );
            }
        }

        Ok(response)
    }

    /// Region the password is derived for: the per-resource override or the
    /// handler's own region
    fn smtp_region(&self, properties: &ResourceProperties) -> Result<SmtpRegion, HandlerError> {
        match properties.region.as_deref() {
            Some(region) if !region.is_empty() => Ok(region.parse()?),
            _ => Ok(self.config.region()),
        }
    }

    async fn put_credential(
        &self,
        name: &str,
        properties: &ResourceProperties,
    ) -> Result<(), HandlerError> {
        // Validate everything before touching the store
        let region = self.smtp_region(properties)?;

        let key = properties
            .key
            .as_ref()
            .map(|key| key.expose_secret())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| HandlerError::InvalidProperties("Key is required".to_string()))?;

        let value = match properties.parameter_kind {
            ParameterKind::Username => key.to_string(),
            ParameterKind::Password => derive_smtp_password_for(key, region),
        };

        let output = self
            .store
            .put_parameter(
                name,
                &value,
                PutParameterOptions::secure(self.config.kms_key_id().map(str::to_string)),
            )
            .await?;

        info!(
            parameter = %name,
            kind = %properties.parameter_kind,
            region = %region,
            version = output.version,
            "Stored SMTP credential"
        );
        Ok(())
    }

    async fn delete_credential(&self, name: &str) -> Result<(), HandlerError> {
        match self.store.delete_parameter(name).await {
            Ok(()) => {
                info!(parameter = %name, "Deleted SMTP credential");
                Ok(())
            }
            Err(StoreError::ParameterNotFound(_)) => {
                warn!(parameter = %name, "Parameter already absent, treating delete as complete");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn respond(&self, name: String) -> Result<LifecycleResponse, HandlerError> {
        let account_id = self.identity.resolve_account_id().await?;
        let arn = parameter_arn(self.config.region(), &account_id, &name);

        Ok(LifecycleResponse {
            physical_resource_id: arn.clone(),
            data: ResponseData {
                arn,
                parameter_name: name,
            },
        })
    }
}
