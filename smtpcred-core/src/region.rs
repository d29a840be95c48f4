//! Regions that expose an SES SMTP endpoint

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::arn::Partition;

/// Region validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmtpRegionError {
    #[error("Region {0} does not offer an SES SMTP endpoint")]
    UnsupportedRegion(String),
}

/// A region known to expose an SES SMTP endpoint.
///
/// The set is closed: SMTP passwords are bound to the region they are derived
/// for, and the receiving service only verifies them in these regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SmtpRegion {
    UsEast2,
    UsEast1,
    UsWest1,
    UsWest2,
    ApSouth1,
    ApNortheast2,
    ApSoutheast1,
    ApSoutheast2,
    ApNortheast1,
    CaCentral1,
    EuCentral1,
    EuWest1,
    EuWest2,
    SaEast1,
    UsGovWest1,
}

impl SmtpRegion {
    /// Every supported region
    pub const ALL: [SmtpRegion; 15] = [
        Self::UsEast2,
        Self::UsEast1,
        Self::UsWest1,
        Self::UsWest2,
        Self::ApSouth1,
        Self::ApNortheast2,
        Self::ApSoutheast1,
        Self::ApSoutheast2,
        Self::ApNortheast1,
        Self::CaCentral1,
        Self::EuCentral1,
        Self::EuWest1,
        Self::EuWest2,
        Self::SaEast1,
        Self::UsGovWest1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UsEast2 => "us-east-2",
            Self::UsEast1 => "us-east-1",
            Self::UsWest1 => "us-west-1",
            Self::UsWest2 => "us-west-2",
            Self::ApSouth1 => "ap-south-1",
            Self::ApNortheast2 => "ap-northeast-2",
            Self::ApSoutheast1 => "ap-southeast-1",
            Self::ApSoutheast2 => "ap-southeast-2",
            Self::ApNortheast1 => "ap-northeast-1",
            Self::CaCentral1 => "ca-central-1",
            Self::EuCentral1 => "eu-central-1",
            Self::EuWest1 => "eu-west-1",
            Self::EuWest2 => "eu-west-2",
            Self::SaEast1 => "sa-east-1",
            Self::UsGovWest1 => "us-gov-west-1",
        }
    }

    /// Partition the region belongs to
    pub fn partition(&self) -> Partition {
        match self {
            Self::UsGovWest1 => Partition::AwsUsGov,
            _ => Partition::Aws,
        }
    }
}

impl FromStr for SmtpRegion {
    type Err = SmtpRegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| SmtpRegionError::UnsupportedRegion(s.to_string()))
    }
}

impl TryFrom<String> for SmtpRegion {
    type Error = SmtpRegionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SmtpRegion> for String {
    fn from(region: SmtpRegion) -> Self {
        region.as_str().to_string()
    }
}

impl fmt::Display for SmtpRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_regions() {
        for region in SmtpRegion::ALL {
            assert_eq!(region.as_str().parse::<SmtpRegion>().unwrap(), region);
        }
    }

    #[test]
    fn test_unsupported_region() {
        let result = "af-south-1".parse::<SmtpRegion>();
        assert_eq!(
            result,
            Err(SmtpRegionError::UnsupportedRegion("af-south-1".to_string()))
        );

        assert!("US-EAST-1".parse::<SmtpRegion>().is_err());
        assert!("".parse::<SmtpRegion>().is_err());
    }

    #[test]
    fn test_partition() {
        assert_eq!(SmtpRegion::UsEast1.partition(), Partition::Aws);
        assert_eq!(SmtpRegion::UsGovWest1.partition(), Partition::AwsUsGov);
    }

    #[test]
    fn test_serde_rejects_unsupported_region() {
        let region: SmtpRegion = serde_json::from_str(r#""eu-west-1""#).unwrap();
        assert_eq!(region, SmtpRegion::EuWest1);

        let result = serde_json::from_str::<SmtpRegion>(r#""me-south-1""#);
        assert!(result.is_err());
    }
}
