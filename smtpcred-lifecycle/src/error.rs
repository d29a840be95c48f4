//! Handler errors

use smtpcred_core::{ErrorCode, ServiceError, SmtpRegionError};
use smtpcred_ssm::StoreError;
use smtpcred_sts::IdentityError;
use thiserror::Error;

/// Errors returned by [`crate::LifecycleHandler`]
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    UnsupportedRegion(#[from] SmtpRegionError),

    #[error("Unrecognized lifecycle event: {0}")]
    UnrecognizedEvent(String),

    #[error("Invalid resource properties: {0}")]
    InvalidProperties(String),

    #[error("Invalid handler configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl HandlerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedRegion(_) => ErrorCode::UnsupportedRegion,
            Self::UnrecognizedEvent(_) => ErrorCode::UnrecognizedEvent,
            Self::InvalidProperties(_) => ErrorCode::ValidationException,
            Self::InvalidConfiguration(_) => ErrorCode::InvalidConfiguration,
            Self::Store(err) => err.code(),
            Self::Identity(err) => err.code(),
        }
    }

    pub fn to_service_error(&self) -> ServiceError {
        ServiceError::new(self.code(), self.to_string())
    }
}
