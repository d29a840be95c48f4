//! Parameter store backends

mod ephemeral;
mod traits;


pub use ephemeral::EphemeralParameterStore;
pub use traits::{
    ParameterStore, ParameterTier, ParameterType, PutParameterOptions, PutParameterOutput,
    StoreError, StoredParameter,
};
