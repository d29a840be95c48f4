//! Parameter store traits

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use smtpcred_core::ErrorCode;
use thiserror::Error;

/// Errors from parameter store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Parameter not found: {0}")]
    ParameterNotFound(String),

    #[error("Parameter already exists: {0}")]
    ParameterAlreadyExists(String),

    #[error("Invalid parameter name: {0}")]
    InvalidName(String),

    #[error("Invalid KMS key id: {0}")]
    InvalidKeyId(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Parameter store error: {0}")]
    Service(String),
}

impl StoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ParameterNotFound(_) => ErrorCode::ParameterNotFound,
            Self::ParameterAlreadyExists(_) | Self::InvalidName(_) => {
                ErrorCode::ValidationException
            }
            Self::InvalidKeyId(_) => ErrorCode::InvalidKeyId,
            Self::AccessDenied(_) => ErrorCode::AccessDenied,
            Self::Service(_) => ErrorCode::ServiceUnavailable,
        }
    }
}

/// SSM parameter type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    String,
    StringList,
    SecureString,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::StringList => "StringList",
            Self::SecureString => "SecureString",
        }
    }
}

/// SSM parameter tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterTier {
    #[default]
    Standard,
    Advanced,
    IntelligentTiering,
}

impl ParameterTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Advanced => "Advanced",
            Self::IntelligentTiering => "Intelligent-Tiering",
        }
    }
}

/// Options for a PUT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutParameterOptions {
    pub parameter_type: ParameterType,
    pub tier: ParameterTier,
    /// KMS key used for SecureString encryption; `None` uses the account default
    pub key_id: Option<String>,
    pub overwrite: bool,
}

impl PutParameterOptions {
    /// Encrypted, Standard tier, always overwriting
    pub fn secure(key_id: Option<String>) -> Self {
        Self {
            parameter_type: ParameterType::SecureString,
            tier: ParameterTier::Standard,
            key_id,
            overwrite: true,
        }
    }
}

/// Result of a PUT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutParameterOutput {
    pub version: i64,
    pub tier: ParameterTier,
}

/// A stored parameter, decrypted
#[derive(Debug, Clone)]
pub struct StoredParameter {
    pub name: String,
    pub value: String,
    pub parameter_type: ParameterType,
    pub tier: ParameterTier,
    pub key_id: Option<String>,
    pub version: i64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Abstract parameter store
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Create or replace a parameter
    async fn put_parameter(
        &self,
        name: &str,
        value: &str,
        options: PutParameterOptions,
    ) -> Result<PutParameterOutput, StoreError>;

    /// Get a parameter with its value decrypted.
    ///
    /// Backends that cannot read back `tier` or `key_id` report `Standard`
    /// and `None`.
    async fn get_parameter(&self, name: &str) -> Result<StoredParameter, StoreError>;

    /// Delete a parameter
    async fn delete_parameter(&self, name: &str) -> Result<(), StoreError>;
}
