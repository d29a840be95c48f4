//! Handler configuration

use smtpcred_core::SmtpRegion;

use crate::error::HandlerError;
use crate::event::ParameterKind;

/// Deployment-wide settings, validated once when the handler is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    region: SmtpRegion,
    parameter_prefix: String,
    kms_key_id: Option<String>,
}

impl HandlerConfig {
    /// Validate and build a configuration.
    ///
    /// Fails with `UnsupportedRegion` when `region` has no SMTP endpoint.
    /// The prefix is normalized to a fully qualified path: a leading `/` is
    /// added when missing and a trailing `/` is dropped. An empty `kms_key_id`
    /// is treated as absent.
    pub fn new(
        region: &str,
        parameter_prefix: impl Into<String>,
        kms_key_id: Option<String>,
    ) -> Result<Self, HandlerError> {
        let region: SmtpRegion = region.parse()?;

        let raw_prefix = parameter_prefix.into();
        let trimmed = raw_prefix.trim_matches('/');
        if trimmed.is_empty() {
            return Err(HandlerError::InvalidConfiguration(
                "parameter prefix must not be empty".to_string(),
            ));
        }

        let parameter_prefix = format!("/{}", trimmed);

        let kms_key_id = kms_key_id.filter(|id| !id.trim().is_empty());

        Ok(Self {
            region,
            parameter_prefix,
            kms_key_id,
        })
    }

    pub fn region(&self) -> SmtpRegion {
        self.region
    }

    pub fn parameter_prefix(&self) -> &str {
        &self.parameter_prefix
    }

    pub fn kms_key_id(&self) -> Option<&str> {
        self.kms_key_id.as_deref()
    }

    /// Store key for a parameter kind: `{prefix}/{kind}`
    pub fn parameter_name(&self, kind: ParameterKind) -> String {
        format!("{}/{}", self.parameter_prefix, kind)
    }
}
