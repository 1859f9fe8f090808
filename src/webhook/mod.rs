//! Admission handler
//!
//! One-shot JSON admission protocol: a single request on stdin, a single
//! response on stdout. Stands in for the webhook dispatch layer in front of
//! the mutator.

pub mod envelope;
pub mod errors;
pub mod handler;

pub use envelope::{AdmissionErrorPayload, AdmissionRequest, AdmissionResponse};
pub use errors::{ErrorCode, WebhookError};
pub use handler::AdmissionHandler;
