//! Error codes and wire formatting

use serde::Serialize;
use thiserror::Error;

/// Error codes surfaced to the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Configuration / contract
    UnsupportedRegion,
    UnrecognizedEvent,
    ValidationException,
    InvalidConfiguration,

    // Parameter store
    ParameterNotFound,
    AccessDenied,
    InvalidKeyId,

    // Collaborators
    ServiceException,
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedRegion => "UnsupportedRegion",
            Self::UnrecognizedEvent => "UnrecognizedEvent",
            Self::ValidationException => "ValidationException",
            Self::InvalidConfiguration => "InvalidConfiguration",
            Self::ParameterNotFound => "ParameterNotFound",
            Self::AccessDenied => "AccessDeniedException",
            Self::InvalidKeyId => "InvalidKeyId",
            Self::ServiceException => "ServiceException",
            Self::ServiceUnavailable => "ServiceUnavailable",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            Self::UnsupportedRegion
            | Self::UnrecognizedEvent
            | Self::ValidationException
            | Self::InvalidConfiguration
            | Self::InvalidKeyId => 400,
            Self::AccessDenied => 403,
            Self::ParameterNotFound => 404,
            Self::ServiceException => 500,
            Self::ServiceUnavailable => 503,
        }
    }

    /// Whether a retry by the orchestrator can succeed without a config change
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ServiceException | Self::ServiceUnavailable)
    }
}

/// Error reported back to the orchestrator
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct ServiceError {
    pub code: ErrorCode,
    pub message: String,
    pub request_id: String,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ServiceError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    /// Format as a JSON error body
    pub fn to_json(&self) -> String {
        #[derive(Serialize)]
        struct JsonError<'a> {
            #[serde(rename = "__type")]
            error_type: &'a str,
            message: &'a str,
            #[serde(rename = "RequestId")]
            request_id: &'a str,
            #[serde(rename = "Retryable")]
            retryable: bool,
        }

        let error = JsonError {
            error_type: self.code.as_str(),
            message: &self.message,
            request_id: &self.request_id,
            retryable: self.code.is_retryable(),
        };

        serde_json::to_string(&error).unwrap_or_else(|_| {
            format!(
                r#"{{"__type":"{}","message":"{}"}}"#,
                self.code.as_str(),
                self.message
            )
        })
    }
}
