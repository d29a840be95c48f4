//! Lifecycle event and response types

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HandlerError;

/// Lifecycle event kinds the handler acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Create,
    Update,
    Delete,
}

impl FromStr for EventKind {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Create" => Ok(Self::Create),
            "Update" => Ok(Self::Update),
            "Delete" => Ok(Self::Delete),
            _ => Err(HandlerError::UnrecognizedEvent(s.to_string())),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        };
        f.write_str(name)
    }
}

/// Which half of the SMTP credential a resource stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ParameterKind {
    /// The access key id, stored verbatim
    Username,
    /// The SMTP password derived from the secret access key
    Password,
}

impl ParameterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
        }
    }
}

impl FromStr for ParameterKind {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("username") {
            Ok(Self::Username)
        } else if s.eq_ignore_ascii_case("password") {
            Ok(Self::Password)
        } else {
            Err(HandlerError::InvalidProperties(format!(
                "unknown parameter kind: {}",
                s
            )))
        }
    }
}

impl TryFrom<String> for ParameterKind {
    type Error = HandlerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Properties of the managed credential resource
#[derive(Debug, Deserialize)]
pub struct ResourceProperties {
    #[serde(rename = "ParameterKind", alias = "parameterKind")]
    pub parameter_kind: ParameterKind,

    /// Access key id (username) or secret access key (password).
    /// Only required for Create and Update.
    #[serde(
        rename = "Key",
        alias = "key",
        default,
        deserialize_with = "deserialize_secret"
    )]
    pub key: Option<SecretString>,

    /// SES region to derive the password for, when it differs from the
    /// handler's region
    #[serde(rename = "Region", alias = "region", default)]
    pub region: Option<String>,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

/// Event delivered by the orchestrator.
///
/// Follows the custom resource request shape; only `RequestType` and
/// `ResourceProperties` drive behavior. Properties are decoded lazily so an
/// unknown `RequestType` is reported as such even when its properties are
/// missing or malformed.
#[derive(Debug, Deserialize)]
#[serde(from = "WireEvent")]
pub struct LifecycleEvent {
    /// Kept as a string so unknown kinds surface as `UnrecognizedEvent`
    pub request_type: String,
    pub request_id: Option<String>,
    pub stack_id: Option<String>,
    pub logical_resource_id: Option<String>,
    pub physical_resource_id: Option<String>,
    resource_properties: Result<ResourceProperties, String>,
}

impl LifecycleEvent {
    pub fn new(request_type: impl Into<String>, properties: ResourceProperties) -> Self {
        Self {
            request_type: request_type.into(),
            request_id: None,
            stack_id: None,
            logical_resource_id: None,
            physical_resource_id: None,
            resource_properties: Ok(properties),
        }
    }

    /// Decoded resource properties, or `InvalidProperties` when they were
    /// absent or did not match the expected shape
    pub fn resource_properties(&self) -> Result<&ResourceProperties, HandlerError> {
        self.resource_properties
            .as_ref()
            .map_err(|reason| HandlerError::InvalidProperties(reason.clone()))
    }
}

/// Envelope as it appears on the wire
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireEvent {
    #[serde(alias = "eventKind")]
    request_type: String,

    #[serde(default)]
    request_id: Option<String>,

    #[serde(default)]
    stack_id: Option<String>,

    #[serde(default)]
    logical_resource_id: Option<String>,

    #[serde(default)]
    physical_resource_id: Option<String>,

    #[serde(alias = "properties", default)]
    resource_properties: Option<serde_json::Value>,
}

impl From<WireEvent> for LifecycleEvent {
    fn from(wire: WireEvent) -> Self {
        let resource_properties = match wire.resource_properties {
            Some(value) => serde_json::from_value(value).map_err(|e| e.to_string()),
            None => Err("ResourceProperties is required".to_string()),
        };

        Self {
            request_type: wire.request_type,
            request_id: wire.request_id,
            stack_id: wire.stack_id,
            logical_resource_id: wire.logical_resource_id,
            physical_resource_id: wire.physical_resource_id,
            resource_properties,
        }
    }
}

impl ResourceProperties {
    pub fn new(parameter_kind: ParameterKind, key: impl Into<String>) -> Self {
        Self {
            parameter_kind,
            key: Some(SecretString::from(key.into())),
            region: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Attributes exposed to the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseData {
    pub arn: String,
    pub parameter_name: String,
}

/// Successful handler response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleResponse {
    pub physical_resource_id: String,
    pub data: ResponseData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_parse_custom_resource_event() {
        let event: LifecycleEvent = serde_json::from_str(
            r#"{
                "RequestType": "Create",
                "RequestId": "req-1",
                "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/mail/1",
                "LogicalResourceId": "SmtpPassword",
                "ResourceProperties": {
                    "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:smtpcred",
                    "ParameterKind": "password",
                    "Key": "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(event.request_type, "Create");
        assert_eq!(event.request_id.as_deref(), Some("req-1"));
        let properties = event.resource_properties().unwrap();
        assert_eq!(properties.parameter_kind, ParameterKind::Password);
        assert_eq!(
            properties.key.as_ref().unwrap().expose_secret(),
            "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY"
        );
        assert!(properties.region.is_none());
    }

    #[test]
    fn test_parse_camel_case_event() {
        let event: LifecycleEvent = serde_json::from_str(
            r#"{"eventKind": "Delete", "properties": {"parameterKind": "Username"}}"#,
        )
        .unwrap();

        assert_eq!(event.request_type, "Delete");
        let properties = event.resource_properties().unwrap();
        assert_eq!(properties.parameter_kind, ParameterKind::Username);
        assert!(properties.key.is_none());
    }

    #[test]
    fn test_unknown_parameter_kind_is_rejected() {
        let event: LifecycleEvent = serde_json::from_str(
            r#"{"RequestType": "Create", "ResourceProperties": {"ParameterKind": "token", "Key": "x"}}"#,
        )
        .unwrap();
        assert!(matches!(
            event.resource_properties(),
            Err(HandlerError::InvalidProperties(_))
        ));
    }

    #[test]
    fn test_missing_properties_keep_request_type() {
        for json in [
            r#"{"RequestType": "Rollback"}"#,
            r#"{"RequestType": "Rollback", "ResourceProperties": null}"#,
            r#"{"RequestType": "Rollback", "ResourceProperties": "oops"}"#,
        ] {
            let event: LifecycleEvent = serde_json::from_str(json).unwrap();
            assert_eq!(event.request_type, "Rollback");
            assert!(matches!(
                event.resource_properties(),
                Err(HandlerError::InvalidProperties(_))
            ));
        }
    }

    #[test]
    fn test_missing_request_type_is_malformed() {
        let result = serde_json::from_str::<LifecycleEvent>(
            r#"{"ResourceProperties": {"ParameterKind": "password", "Key": "x"}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_event_kind_parse() {
        assert_eq!("Create".parse::<EventKind>().unwrap(), EventKind::Create);
        assert_eq!("Update".parse::<EventKind>().unwrap(), EventKind::Update);
        assert_eq!("Delete".parse::<EventKind>().unwrap(), EventKind::Delete);
        assert!(matches!(
            "create".parse::<EventKind>(),
            Err(HandlerError::UnrecognizedEvent(kind)) if kind == "create"
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let properties = ResourceProperties::new(ParameterKind::Password, "super-secret-key");
        let debug = format!("{:?}", properties);
        assert!(!debug.contains("super-secret-key"));
    }

    #[test]
    fn test_response_serialization() {
        let response = LifecycleResponse {
            physical_resource_id: "arn:aws:ssm:us-east-1:123456789012:parameter/smtp/password".into(),
            data: ResponseData {
                arn: "arn:aws:ssm:us-east-1:123456789012:parameter/smtp/password".into(),
                parameter_name: "/smtp/password".into(),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json["PhysicalResourceId"],
            "arn:aws:ssm:us-east-1:123456789012:parameter/smtp/password"
        );
        assert_eq!(json["Data"]["ParameterName"], "/smtp/password");
        assert_eq!(
            json["Data"]["Arn"],
            "arn:aws:ssm:us-east-1:123456789012:parameter/smtp/password"
        );
    }
}
