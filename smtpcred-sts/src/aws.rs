//! STS backed account resolver

use async_trait::async_trait;
use aws_sdk_sts::error::DisplayErrorContext;
use tracing::debug;

use crate::identity::{AccountResolver, IdentityError};

/// Resolves the account via `sts:GetCallerIdentity`
#[derive(Debug, Clone)]
pub struct StsAccountResolver {
    client: aws_sdk_sts::Client,
}

impl StsAccountResolver {
    pub fn new(client: aws_sdk_sts::Client) -> Self {
        Self { client }
    }

    pub fn from_conf(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_sts::Client::new(sdk_config))
    }
}

#[async_trait]
impl AccountResolver for StsAccountResolver {
    async fn resolve_account_id(&self) -> Result<String, IdentityError> {
        let output = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(|err| IdentityError::Service(DisplayErrorContext(&err).to_string()))?;

        let account = output.account().ok_or(IdentityError::MissingAccount)?;
        debug!(account = %account, "Resolved caller account");
        Ok(account.to_string())
    }
}
