//! Admission error code registry

use super::envelope::AdmissionErrorPayload;
use crate::mutator::MutateError;

/// Standard error codes for admission responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed request JSON or malformed object
    InvalidRequest,
    /// Object is not a NamespacedCloudProfile
    WrongObjectType,
    /// A providerConfig blob could not be decoded
    DecodeFailed,
    /// The merged providerConfig could not be encoded
    EncodeFailed,
}

impl ErrorCode {
    /// Returns the string representation of the error code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::WrongObjectType => "WRONG_OBJECT_TYPE",
            ErrorCode::DecodeFailed => "DECODE_FAILED",
            ErrorCode::EncodeFailed => "ENCODE_FAILED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Admission handler error type
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Mutate(#[from] MutateError),
}

impl WebhookError {
    /// Returns the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            WebhookError::InvalidRequest(_) => ErrorCode::InvalidRequest,
            WebhookError::Mutate(MutateError::WrongObjectType(_)) => ErrorCode::WrongObjectType,
            WebhookError::Mutate(MutateError::InvalidObject(_)) => ErrorCode::InvalidRequest,
            WebhookError::Mutate(MutateError::Decode { .. }) => ErrorCode::DecodeFailed,
            WebhookError::Mutate(MutateError::Encode(_)) => ErrorCode::EncodeFailed,
        }
    }

    /// Convert to an admission error payload
    pub fn to_payload(&self) -> AdmissionErrorPayload {
        let payload = AdmissionErrorPayload::new(self.code().as_str(), self.to_string());

        match self {
            WebhookError::Mutate(MutateError::WrongObjectType(kind)) => {
                payload.with_data("kind", serde_json::json!(kind))
            }
            WebhookError::Mutate(MutateError::Decode { side, .. }) => {
                payload.with_data("side", serde_json::json!(side.as_str()))
            }
            _ => payload,
        }
    }
}
