//! Core types for smtpcred
//!
//! This crate provides the types shared by the signature engine, the
//! parameter store and identity collaborators, and the lifecycle handler.

pub mod arn;
pub mod error;
pub mod region;
pub mod request_id;

pub use arn::{parameter_arn, Partition};
pub use error::{ErrorCode, ServiceError};
pub use region::{SmtpRegion, SmtpRegionError};
pub use request_id::RequestId;
