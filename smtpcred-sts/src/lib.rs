//! Caller identity resolution for smtpcred
//!
//! The lifecycle handler needs the caller's account id to build parameter
//! ARNs. [`AccountResolver`] is the read-only seam for that lookup.

#[cfg(feature = "aws")]
pub mod aws;
mod identity;

#[cfg(feature = "aws")]
pub use aws::StsAccountResolver;
pub use identity::{AccountResolver, IdentityError, StaticAccountResolver, DEFAULT_ACCOUNT_ID};
