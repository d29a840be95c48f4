//! SES SMTP password derivation
//!
//! An SMTP password is a SigV4 signature over the fixed message
//! `SendRawEmail`, scoped to the `ses` service in the target region, prefixed
//! with a version byte and base64 encoded. The scope date is the literal
//! `11111111` so the password stays valid indefinitely; SES verifies against
//! that exact value and it must never be replaced with the current date.

use base64::Engine;
use smtpcred_core::{SmtpRegion, SmtpRegionError};

use crate::sigv4::{derive_signing_key, hmac_sha256};

/// Version byte prepended to every SMTP password
pub const SMTP_PASSWORD_VERSION: u8 = 0x04;

const DATE: &str = "11111111";
const SERVICE: &str = "ses";
const MESSAGE: &str = "SendRawEmail";

/// Derive the SMTP password for `secret_key` in `region`.
///
/// Fails without doing any work when `region` has no SMTP endpoint.
pub fn derive_smtp_password(secret_key: &str, region: &str) -> Result<String, SmtpRegionError> {
    let region: SmtpRegion = region.parse()?;
    Ok(derive_smtp_password_for(secret_key, region))
}

/// Derive the SMTP password for an already validated region
pub fn derive_smtp_password_for(secret_key: &str, region: SmtpRegion) -> String {
    let signing_key = derive_signing_key(secret_key, DATE, region.as_str(), SERVICE);
    let signature = hmac_sha256(&signing_key, MESSAGE.as_bytes());

    let mut raw = Vec::with_capacity(1 + signature.len());
    raw.push(SMTP_PASSWORD_VERSION);
    raw.extend_from_slice(&signature);

    base64::engine::general_purpose::STANDARD.encode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY";

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            derive_smtp_password(SECRET, "us-east-1").unwrap(),
            "BLBM/9hSUELfq8Gw+rU1YcBjkOxGbhT2XG763xVLGWL9"
        );
        assert_eq!(
            derive_smtp_password(SECRET, "eu-west-1").unwrap(),
            "BMW5RDrXmmVs0lV7GpI4oLkHXpZ4stDsk6q91z1g38Pk"
        );
        assert_eq!(
            derive_smtp_password(SECRET, "us-gov-west-1").unwrap(),
            "BHW/eHvx1MM9YwW4wrJG6MGVQmLDCAM99G9YiSdGEIAw"
        );
    }

    #[test]
    fn test_deterministic() {
        let first = derive_smtp_password(SECRET, "us-east-1").unwrap();
        let second = derive_smtp_password(SECRET, "us-east-1").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_version_byte_and_length() {
        let password = derive_smtp_password_for(SECRET, SmtpRegion::ApSoutheast2);
        let raw = base64::engine::general_purpose::STANDARD
            .decode(password)
            .unwrap();

        assert_eq!(raw.len(), 33);
        assert_eq!(raw[0], SMTP_PASSWORD_VERSION);
    }

    #[test]
    fn test_region_changes_password() {
        let east = derive_smtp_password_for(SECRET, SmtpRegion::UsEast1);
        let west = derive_smtp_password_for(SECRET, SmtpRegion::UsWest2);
        assert_ne!(east, west);
    }

    #[test]
    fn test_unsupported_region() {
        let result = derive_smtp_password(SECRET, "af-south-1");
        assert!(matches!(result, Err(SmtpRegionError::UnsupportedRegion(r)) if r == "af-south-1"));
    }
}
