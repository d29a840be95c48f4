//! AWS SDK backed parameter store

use async_trait::async_trait;
use aws_sdk_ssm::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_ssm::types;
use tracing::debug;

use crate::storage::{
    ParameterStore, ParameterTier, ParameterType, PutParameterOptions, PutParameterOutput,
    StoreError, StoredParameter,
};

/// Parameter store backed by AWS Systems Manager
#[derive(Debug, Clone)]
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }

    pub fn from_conf(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_ssm::Client::new(sdk_config))
    }
}

impl From<ParameterType> for types::ParameterType {
    fn from(value: ParameterType) -> Self {
        match value {
            ParameterType::String => types::ParameterType::String,
            ParameterType::StringList => types::ParameterType::StringList,
            ParameterType::SecureString => types::ParameterType::SecureString,
        }
    }
}

impl From<ParameterTier> for types::ParameterTier {
    fn from(value: ParameterTier) -> Self {
        match value {
            ParameterTier::Standard => types::ParameterTier::Standard,
            ParameterTier::Advanced => types::ParameterTier::Advanced,
            ParameterTier::IntelligentTiering => types::ParameterTier::IntelligentTiering,
        }
    }
}

fn parameter_type_from_sdk(value: Option<&types::ParameterType>) -> ParameterType {
    match value {
        Some(types::ParameterType::String) => ParameterType::String,
        Some(types::ParameterType::StringList) => ParameterType::StringList,
        _ => ParameterType::SecureString,
    }
}

fn tier_from_sdk(value: Option<&types::ParameterTier>) -> ParameterTier {
    match value {
        Some(types::ParameterTier::Advanced) => ParameterTier::Advanced,
        Some(types::ParameterTier::IntelligentTiering) => ParameterTier::IntelligentTiering,
        _ => ParameterTier::Standard,
    }
}

/// Map errors the SDK does not model per operation
fn service_error<E>(name: &str, err: &E) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    match err.code() {
        Some("AccessDeniedException") => StoreError::AccessDenied(name.to_string()),
        _ => StoreError::Service(DisplayErrorContext(err).to_string()),
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn put_parameter(
        &self,
        name: &str,
        value: &str,
        options: PutParameterOptions,
    ) -> Result<PutParameterOutput, StoreError> {
        let output = self
            .client
            .put_parameter()
            .name(name)
            .value(value)
            .r#type(options.parameter_type.into())
            .tier(options.tier.into())
            .set_key_id(options.key_id)
            .overwrite(options.overwrite)
            .send()
            .await
            .map_err(|err| {
                let err = err.into_service_error();
                if err.is_parameter_already_exists() {
                    StoreError::ParameterAlreadyExists(name.to_string())
                } else if err.is_invalid_key_id() {
                    StoreError::InvalidKeyId(name.to_string())
                } else {
                    service_error(name, &err)
                }
            })?;

        debug!(parameter = %name, version = output.version(), "Stored SSM parameter");

        Ok(PutParameterOutput {
            version: output.version(),
            tier: tier_from_sdk(output.tier()),
        })
    }

    /// Read a parameter with decryption.
    ///
    /// `GetParameter` does not return the tier or the KMS key, so the result
    /// always reports `Standard` and no `key_id`. Use `DescribeParameters`
    /// when those matter.
    async fn get_parameter(&self, name: &str) -> Result<StoredParameter, StoreError> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|err| {
                let err = err.into_service_error();
                if err.is_parameter_not_found() {
                    StoreError::ParameterNotFound(name.to_string())
                } else {
                    service_error(name, &err)
                }
            })?;

        let parameter = output
            .parameter()
            .ok_or_else(|| StoreError::ParameterNotFound(name.to_string()))?;

        Ok(StoredParameter {
            name: parameter.name().unwrap_or(name).to_string(),
            value: parameter.value().unwrap_or_default().to_string(),
            parameter_type: parameter_type_from_sdk(parameter.r#type()),
            // Not part of the GetParameter response
            tier: ParameterTier::Standard,
            key_id: None,
            version: parameter.version(),
            last_modified: parameter
                .last_modified_date()
                .and_then(|d| chrono::DateTime::from_timestamp(d.secs(), d.subsec_nanos())),
        })
    }

    async fn delete_parameter(&self, name: &str) -> Result<(), StoreError> {
        self.client
            .delete_parameter()
            .name(name)
            .send()
            .await
            .map_err(|err| {
                let err = err.into_service_error();
                if err.is_parameter_not_found() {
                    StoreError::ParameterNotFound(name.to_string())
                } else {
                    service_error(name, &err)
                }
            })?;

        debug!(parameter = %name, "Deleted SSM parameter");
        Ok(())
    }
}
