//! Account resolver trait and static implementation

use async_trait::async_trait;
use smtpcred_core::ErrorCode;
use thiserror::Error;

/// Account id used by local emulators
pub const DEFAULT_ACCOUNT_ID: &str = "000000000000";

/// Identity resolution errors
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Caller identity did not include an account id")]
    MissingAccount,

    #[error("Invalid account id: {0}")]
    InvalidAccount(String),

    #[error("Identity service error: {0}")]
    Service(String),
}

impl IdentityError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingAccount | Self::Service(_) => ErrorCode::ServiceUnavailable,
            Self::InvalidAccount(_) => ErrorCode::InvalidConfiguration,
        }
    }
}

/// Resolves the account the handler runs as
#[async_trait]
pub trait AccountResolver: Send + Sync {
    async fn resolve_account_id(&self) -> Result<String, IdentityError>;
}

/// Resolver returning a fixed, pre-validated account id
#[derive(Debug, Clone)]
pub struct StaticAccountResolver {
    account_id: String,
}

impl StaticAccountResolver {
    pub fn new(account_id: impl Into<String>) -> Result<Self, IdentityError> {
        let account_id = account_id.into();
        if account_id.len() != 12 || !account_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(IdentityError::InvalidAccount(account_id));
        }
        Ok(Self { account_id })
    }
}

impl Default for StaticAccountResolver {
    fn default() -> Self {
        Self {
            account_id: DEFAULT_ACCOUNT_ID.to_string(),
        }
    }
}

#[async_trait]
impl AccountResolver for StaticAccountResolver {
    async fn resolve_account_id(&self) -> Result<String, IdentityError> {
        Ok(self.account_id.clone())
    }
}
