//! `NamespacedCloudProfile` resource types.
//!
//! Only the fields the mutator reads or writes are modelled. Everything else
//! is kept in `extra` so a decode/encode cycle preserves the resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An opaque embedded object (the provider config blob).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawExtension(Value);

impl RawExtension {
    /// Parse raw JSON bytes into an extension.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw).map(Self)
    }

    /// Wrap an already-parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Raw JSON bytes of the embedded object.
    pub fn raw(&self) -> Vec<u8> {
        self.0.to_string().into_bytes()
    }

    /// The embedded object as a JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Unwrap into the embedded JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

/// A namespaced cloud profile: a parent cloud profile plus namespace-local
/// additions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespacedCloudProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: NamespacedCloudProfileSpec,

    #[serde(default)]
    pub status: NamespacedCloudProfileStatus,
}

impl NamespacedCloudProfile {
    /// `namespace/name` for log fields.
    pub fn qualified_name(&self) -> String {
        match &self.metadata.namespace {
            Some(namespace) => format!("{}/{}", namespace, self.metadata.name),
            None => self.metadata.name.clone(),
        }
    }

    /// Whether the resource is marked for deletion.
    pub fn is_deleting(&self) -> bool {
        self.metadata.deletion_timestamp.is_some()
    }
}

/// Object metadata subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Incremented by the API server on every spec change.
    #[serde(default)]
    pub generation: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_timestamp: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Desired state authored by the operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespacedCloudProfileSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<CloudProfileReference>,

    /// Provider config the operator adds on top of the parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<RawExtension>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference to the parent cloud profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudProfileReference {
    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub name: String,
}

/// Observed state computed by the core reconciler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespacedCloudProfileStatus {
    #[serde(default)]
    pub cloud_profile_spec: CloudProfileSpec,

    /// Generation last reconciled by the core reconciler.
    #[serde(default)]
    pub observed_generation: i64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Effective cloud profile spec (parent merged with namespace additions).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudProfileSpec {
    /// Effective provider config. Rewritten by the mutator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<RawExtension>,

    /// Capability definitions of the parent profile. Empty for profiles
    /// still using the legacy architecture format.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub machine_capabilities: Vec<CapabilityDefinition>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A capability and its allowed values. The first value is the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityDefinition {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}
