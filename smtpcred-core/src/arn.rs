//! ARN formatting for stored parameters

use std::fmt;

use crate::region::SmtpRegion;

/// AWS partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Aws,
    AwsUsGov,
}

impl Partition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::AwsUsGov => "aws-us-gov",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the ARN of an SSM parameter.
///
/// `name` is either fully qualified (`/a/b`) and appended as-is, or flat
/// (no `/` at all) and given a separator. Names with a `/` but no leading
/// `/` are not valid SSM names and are appended unchanged.
pub fn parameter_arn(region: SmtpRegion, account_id: &str, name: &str) -> String {
    let separator = if name.contains('/') { "" } else { "/" };
    format!(
        "arn:{}:ssm:{}:{}:parameter{}{}",
        region.partition(),
        region,
        account_id,
        separator,
        name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchical_parameter_arn() {
        let arn = parameter_arn(SmtpRegion::UsEast1, "123456789012", "/mail/smtp/password");
        assert_eq!(
            arn,
            "arn:aws:ssm:us-east-1:123456789012:parameter/mail/smtp/password"
        );
    }

    #[test]
    fn test_flat_parameter_arn() {
        let arn = parameter_arn(SmtpRegion::EuWest1, "123456789012", "smtp-username");
        assert_eq!(
            arn,
            "arn:aws:ssm:eu-west-1:123456789012:parameter/smtp-username"
        );
    }

    #[test]
    fn test_distinct_names_give_distinct_arns() {
        let qualified = parameter_arn(SmtpRegion::UsEast1, "123456789012", "/mail/smtp/password");
        let relative = parameter_arn(SmtpRegion::UsEast1, "123456789012", "mail/smtp/password");
        assert_ne!(qualified, relative);
    }

    #[test]
    fn test_gov_cloud_partition() {
        let arn = parameter_arn(SmtpRegion::UsGovWest1, "123456789012", "/smtp/password");
        assert!(arn.starts_with("arn:aws-us-gov:ssm:us-gov-west-1:"));
    }
}
