//! In-memory ephemeral parameter store

use super::traits::*;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

const MAX_NAME_LENGTH: usize = 2048;
const MAX_HIERARCHY_DEPTH: usize = 15;

/// Ephemeral (in-memory) parameter store.
///
/// Values are held in plain text; `key_id` is recorded but not used for
/// encryption.
#[derive(Debug, Default)]
pub struct EphemeralParameterStore {
    parameters: DashMap<String, StoredParameter>,
}

impl EphemeralParameterStore {
    pub fn new() -> Self {
        Self {
            parameters: DashMap::new(),
        }
    }

    /// Number of stored parameters
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    fn validate_name(name: &str) -> Result<(), StoreError> {
        if name.is_empty() || name.len() > MAX_NAME_LENGTH {
            return Err(StoreError::InvalidName(name.to_string()));
        }

        let valid_chars = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '/'));
        if !valid_chars || name.ends_with('/') || name.contains("//") {
            return Err(StoreError::InvalidName(name.to_string()));
        }

        // Hierarchical names must be fully qualified
        if name.contains('/') && !name.starts_with('/') {
            return Err(StoreError::InvalidName(name.to_string()));
        }

        let depth = name.trim_start_matches('/').split('/').count();
        if depth > MAX_HIERARCHY_DEPTH {
            return Err(StoreError::InvalidName(name.to_string()));
        }

        let lowered = name.trim_start_matches('/').to_ascii_lowercase();
        if lowered.starts_with("aws") || lowered.starts_with("ssm") {
            return Err(StoreError::InvalidName(name.to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl ParameterStore for EphemeralParameterStore {
    async fn put_parameter(
        &self,
        name: &str,
        value: &str,
        options: PutParameterOptions,
    ) -> Result<PutParameterOutput, StoreError> {
        Self::validate_name(name)?;

        if options.key_id.is_some() && options.parameter_type != ParameterType::SecureString {
            return Err(StoreError::InvalidKeyId(format!(
                "KeyId is only valid for SecureString parameters: {}",
                name
            )));
        }

        let parameter_type = options.parameter_type;
        let tier = options.tier;

        let version = match self.parameters.entry(name.to_string()) {
            Entry::Occupied(mut entry) => {
                if !options.overwrite {
                    return Err(StoreError::ParameterAlreadyExists(name.to_string()));
                }
                let existing = entry.get_mut();
                existing.value = value.to_string();
                existing.parameter_type = options.parameter_type;
                existing.tier = options.tier;
                existing.key_id = options.key_id;
                existing.version += 1;
                existing.last_modified = Some(Utc::now());
                existing.version
            }
            Entry::Vacant(entry) => {
                entry.insert(StoredParameter {
                    name: name.to_string(),
                    value: value.to_string(),
                    parameter_type: options.parameter_type,
                    tier: options.tier,
                    key_id: options.key_id,
                    version: 1,
                    last_modified: Some(Utc::now()),
                });
                1
            }
        };

        debug!(
            parameter = %name,
            version,
            parameter_type = parameter_type.as_str(),
            tier = tier.as_str(),
            "Stored parameter"
        );

        Ok(PutParameterOutput { version, tier })
    }

    async fn get_parameter(&self, name: &str) -> Result<StoredParameter, StoreError> {
        self.parameters
            .get(name)
            .map(|p| p.clone())
            .ok_or_else(|| StoreError::ParameterNotFound(name.to_string()))
    }

    async fn delete_parameter(&self, name: &str) -> Result<(), StoreError> {
        self.parameters
            .remove(name)
            .map(|_| debug!(parameter = %name, "Deleted parameter"))
            .ok_or_else(|| StoreError::ParameterNotFound(name.to_string()))
    }
}
