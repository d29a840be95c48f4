//! Configuration management

use serde::Deserialize;
use smtpcred_sts::DEFAULT_ACCOUNT_ID;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub handler: HandlerSettings,

    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Unvalidated handler settings; CLI flags take precedence
#[derive(Debug, Deserialize, Default)]
pub struct HandlerSettings {
    pub region: Option<String>,
    pub parameter_prefix: Option<String>,
    pub kms_key_id: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum BackendConfig {
    /// In-memory parameter store with a fixed account id
    #[serde(rename = "ephemeral")]
    Ephemeral {
        #[serde(default = "default_account_id")]
        account_id: String,
    },

    /// SSM and STS through the AWS SDK
    #[serde(rename = "aws")]
    Aws,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Ephemeral {
            account_id: default_account_id(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_account_id() -> String {
    DEFAULT_ACCOUNT_ID.to_string()
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Reads `smtpcred.toml` from the working directory unless `path` is
    /// given, then applies `SMTPCRED__SECTION__KEY` environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("smtpcred").required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("SMTPCRED")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize::<Config>()?)
    }
}
