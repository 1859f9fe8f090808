//! Admission envelope types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Admission request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionRequest {
    /// Caller-chosen request ID, echoed in the response
    pub uid: String,

    /// Admission operation (CREATE, UPDATE); informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,

    /// The object being admitted
    pub object: serde_json::Value,

    /// The stored object, for updates
    #[serde(default, rename = "oldObject", skip_serializing_if = "Option::is_none")]
    pub old_object: Option<serde_json::Value>,
}

/// Admission response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionResponse {
    /// Echoed request ID
    pub uid: String,

    /// Whether the object is admitted
    pub allowed: bool,

    /// The (possibly mutated) object (present when allowed=true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<serde_json::Value>,

    /// Error details (present when allowed=false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AdmissionErrorPayload>,
}

impl AdmissionResponse {
    /// Create an admitted response
    pub fn allowed(uid: String, object: serde_json::Value) -> Self {
        Self {
            uid,
            allowed: true,
            object: Some(object),
            error: None,
        }
    }

    /// Create a denied response
    pub fn denied(uid: String, error: AdmissionErrorPayload) -> Self {
        Self {
            uid,
            allowed: false,
            object: None,
            error: Some(error),
        }
    }
}

/// Error payload structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionErrorPayload {
    /// Error code from the registry
    pub code: String,

    /// Human-readable, single-line error message
    pub message: String,

    /// Optional machine-readable details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, serde_json::Value>>,
}

impl AdmissionErrorPayload {
    /// Create a new error payload
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }

    /// Add machine-readable data to the error
    pub fn with_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.get_or_insert_with(HashMap::new).insert(key.into(), value);
        self
    }
}
