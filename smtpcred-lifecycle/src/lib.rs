//! Lifecycle handler for SES SMTP credentials
//!
//! Responds to Create/Update/Delete events from a resource orchestrator:
//! - derives SMTP passwords from IAM secret keys
//! - writes the username or password to the parameter store
//! - returns the parameter ARN as the stable resource identifier
//! - deletes the parameter on teardown

mod config;
mod error;
mod event;
mod handler;
pub mod handlers;


pub use config::HandlerConfig;
pub use error::HandlerError;
pub use event::{EventKind, LifecycleEvent, LifecycleResponse, ParameterKind, ResourceProperties, ResponseData};
pub use handler::LifecycleHandler;
pub use handlers::{handle_event, LifecycleState};
