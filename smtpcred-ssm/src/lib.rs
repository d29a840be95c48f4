//! SSM Parameter Store collaborator for smtpcred
//!
//! Provides the [`ParameterStore`] seam the lifecycle handler writes through:
//! - `EphemeralParameterStore`: in-memory store for local runs and tests
//! - `SsmParameterStore`: AWS SDK backed store (feature `aws`)

#[cfg(feature = "aws")]
pub mod aws;
pub mod storage;

#[cfg(feature = "aws")]
pub use aws::SsmParameterStore;
pub use storage::{
    EphemeralParameterStore, ParameterStore, ParameterTier, ParameterType, PutParameterOptions,
    PutParameterOutput, StoreError, StoredParameter,
};
