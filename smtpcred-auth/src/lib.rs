//! SMTP credential derivation for smtpcred
//!
//! Derives Amazon SES SMTP passwords from IAM secret access keys using the
//! Signature Version 4 key derivation chain.

pub mod sigv4;
pub mod smtp;

pub use smtp::{derive_smtp_password, derive_smtp_password_for, SMTP_PASSWORD_VERSION};
