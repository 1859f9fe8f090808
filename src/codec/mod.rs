//! Provider config codec
//!
//! Strict decoding of the `providerConfig` blobs carried by a
//! `NamespacedCloudProfile`, and encoding of the merged result.

use std::fmt;

use azp_api::{CloudProfileConfig, CLOUD_PROFILE_CONFIG_KIND, PROVIDER_API_VERSION};

use crate::mutator::MutateError;

/// Which side of the resource a provider config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSide {
    Spec,
    Status,
}

impl ConfigSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigSide::Spec => "spec",
            ConfigSide::Status => "status",
        }
    }
}

impl fmt::Display for ConfigSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a provider config blob could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported apiVersion '{0}', expected '{}'", PROVIDER_API_VERSION)]
    ApiVersion(String),

    #[error("unsupported kind '{0}', expected '{}'", CLOUD_PROFILE_CONFIG_KIND)]
    Kind(String),
}

/// Decode a provider config blob. Unknown fields are rejected.
///
/// `apiVersion` and `kind` may be omitted; when present they must name the
/// v1alpha1 `CloudProfileConfig` schema.
pub fn decode_provider_config(
    raw: &[u8],
    side: ConfigSide,
) -> Result<CloudProfileConfig, MutateError> {
    decode_strict(raw).map_err(|source| MutateError::Decode { side, source })
}

fn decode_strict(raw: &[u8]) -> Result<CloudProfileConfig, DecodeError> {
    let config: CloudProfileConfig = serde_json::from_slice(raw)?;

    if let Some(api_version) = &config.api_version {
        if api_version != PROVIDER_API_VERSION {
            return Err(DecodeError::ApiVersion(api_version.clone()));
        }
    }
    if let Some(kind) = &config.kind {
        if kind != CLOUD_PROFILE_CONFIG_KIND {
            return Err(DecodeError::Kind(kind.clone()));
        }
    }

    Ok(config)
}

/// Encode a provider config for the status field, stamping `apiVersion` and
/// `kind`.
pub fn encode_provider_config(config: &CloudProfileConfig) -> Result<Vec<u8>, MutateError> {
    let mut stamped = config.clone();
    stamped.api_version = Some(PROVIDER_API_VERSION.to_string());
    stamped.kind = Some(CLOUD_PROFILE_CONFIG_KIND.to_string());
    serde_json::to_vec(&stamped).map_err(MutateError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use azp_api::{MachineImageVersion, MachineImages};

    #[test]
    fn test_decode_minimal() {
        let config = decode_provider_config(br#"{"machineImages":[]}"#, ConfigSide::Spec).unwrap();
        assert!(config.machine_images.is_empty());
        assert!(config.api_version.is_none());
    }

    #[test]
    fn test_decode_with_type_meta() {
        let raw = br#"{
            "apiVersion": "azure.provider.extensions.gardener.cloud/v1alpha1",
            "kind": "CloudProfileConfig",
            "machineImages": [{"name": "ubuntu", "versions": [{"version": "1"}]}]
        }"#;
        let config = decode_provider_config(raw, ConfigSide::Status).unwrap();
        assert_eq!(config.machine_images[0].versions[0].version, "1");
    }

    #[test]
    fn test_decode_unknown_field_names_side() {
        let err = decode_provider_config(br#"{"machineImages":[],"bogus":1}"#, ConfigSide::Status)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("status"), "{}", message);
        assert!(message.contains("bogus"), "{}", message);
    }

    #[test]
    fn test_decode_malformed_json() {
        let err = decode_provider_config(b"{not json", ConfigSide::Spec).unwrap_err();
        assert!(matches!(
            err,
            MutateError::Decode {
                side: ConfigSide::Spec,
                source: DecodeError::Json(_)
            }
        ));
    }

    #[test]
    fn test_decode_wrong_api_version() {
        let raw = br#"{"apiVersion": "aws.provider.extensions.gardener.cloud/v1alpha1", "machineImages": []}"#;
        let err = decode_provider_config(raw, ConfigSide::Spec).unwrap_err();
        assert!(matches!(
            err,
            MutateError::Decode {
                source: DecodeError::ApiVersion(_),
                ..
            }
        ));
    }

    #[test]
    fn test_decode_wrong_kind() {
        let raw = br#"{"kind": "InfrastructureConfig", "machineImages": []}"#;
        let err = decode_provider_config(raw, ConfigSide::Spec).unwrap_err();
        assert!(err.to_string().contains("InfrastructureConfig"));
    }

    #[test]
    fn test_encode_stamps_type_meta() {
        let config = CloudProfileConfig {
            machine_images: vec![MachineImages {
                name: "ubuntu".to_string(),
                versions: vec![MachineImageVersion {
                    version: "1".to_string(),
                    ..Default::default()
                }],
            }],
            ..Default::default()
        };

        let raw = encode_provider_config(&config).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();

        assert_eq!(value["apiVersion"], PROVIDER_API_VERSION);
        assert_eq!(value["kind"], CLOUD_PROFILE_CONFIG_KIND);
        assert_eq!(value["machineImages"][0]["name"], "ubuntu");
    }

    #[test]
    fn test_encoded_output_decodes() {
        let config = CloudProfileConfig::default();
        let raw = encode_provider_config(&config).unwrap();
        let decoded = decode_provider_config(&raw, ConfigSide::Status).unwrap();
        assert_eq!(decoded.machine_images, config.machine_images);
    }
}
