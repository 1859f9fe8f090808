//! NamespacedCloudProfile mutator
//!
//! Keeps the effective provider config in the status of a
//! `NamespacedCloudProfile` a superset of what the operator put in its spec:
//!
//!   gate -> decode (spec, status) -> transform spec -> merge -> encode
//!
//! The status provider config is only replaced once every step succeeded.

mod error;

pub use error::MutateError;

use azp_api::{NamespacedCloudProfile, RawExtension, NAMESPACED_CLOUD_PROFILE_KIND};
use azp_merge::{merge_inputs, merge_machine_images, merge_machine_types, SkipReason};
use serde_json::Value;
use tracing::{debug, info};

use crate::codec::{decode_provider_config, encode_provider_config, ConfigSide};
use crate::transform::{to_parent_format, DEFAULT_ARCHITECTURE};

/// Location of the status provider config, the only field written back.
const STATUS_PROVIDER_CONFIG: &str = "/status/cloudProfileSpec/providerConfig";

/// A mutating admission step for one kind of object.
pub trait Mutator {
    /// Mutate `new_obj` in place. `old_obj` is the stored object on updates.
    fn mutate(&self, new_obj: &mut Value, old_obj: Option<&Value>) -> Result<(), MutateError>;
}

/// What a mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The gate decided against merging; the object is unchanged.
    Skipped(SkipReason),
    /// The status provider config was replaced with the merged config.
    Merged { machine_images: usize, machine_types: usize },
}

/// Mutator for `NamespacedCloudProfile` objects.
#[derive(Debug, Clone)]
pub struct NamespacedCloudProfileMutator {
    default_architecture: String,
}

impl Default for NamespacedCloudProfileMutator {
    fn default() -> Self {
        Self::new(DEFAULT_ARCHITECTURE)
    }
}

impl NamespacedCloudProfileMutator {
    /// Create a mutator using `default_architecture` as the last-resort
    /// architecture when normalizing image versions.
    pub fn new(default_architecture: impl Into<String>) -> Self {
        Self {
            default_architecture: default_architecture.into(),
        }
    }

    /// Merge the spec provider config into the status provider config.
    pub fn mutate_profile(
        &self,
        profile: &mut NamespacedCloudProfile,
    ) -> Result<MutationOutcome, MutateError> {
        let (spec_raw, status_raw) = match merge_inputs(profile) {
            Ok((spec, status)) => (spec.raw(), status.raw()),
            Err(reason) => {
                debug!(
                    profile = %profile.qualified_name(),
                    reason = %reason.to_code(),
                    "Skipping provider config merge"
                );
                return Ok(MutationOutcome::Skipped(reason));
            }
        };

        let spec_config = decode_provider_config(&spec_raw, ConfigSide::Spec)?;
        let mut status_config = decode_provider_config(&status_raw, ConfigSide::Status)?;

        let uniform_spec = to_parent_format(
            &spec_config,
            &profile.status.cloud_profile_spec.machine_capabilities,
            &self.default_architecture,
        );

        status_config.machine_images =
            merge_machine_images(&uniform_spec.machine_images, &status_config.machine_images);
        status_config.machine_types =
            merge_machine_types(&uniform_spec.machine_types, &status_config.machine_types);

        let encoded = encode_provider_config(&status_config)?;
        let extension = RawExtension::from_bytes(&encoded).map_err(MutateError::Encode)?;
        profile.status.cloud_profile_spec.provider_config = Some(extension);

        info!(
            profile = %profile.qualified_name(),
            machine_images = status_config.machine_images.len(),
            machine_types = status_config.machine_types.len(),
            "Merged provider config into status"
        );

        Ok(MutationOutcome::Merged {
            machine_images: status_config.machine_images.len(),
            machine_types: status_config.machine_types.len(),
        })
    }
}

impl Mutator for NamespacedCloudProfileMutator {
    fn mutate(&self, new_obj: &mut Value, _old_obj: Option<&Value>) -> Result<(), MutateError> {
        let kind = new_obj
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or("<none>");
        if kind != NAMESPACED_CLOUD_PROFILE_KIND {
            return Err(MutateError::WrongObjectType(kind.to_string()));
        }

        let mut profile: NamespacedCloudProfile =
            serde_json::from_value(new_obj.clone()).map_err(MutateError::InvalidObject)?;

        if let MutationOutcome::Merged { .. } = self.mutate_profile(&mut profile)? {
            let merged = profile.status.cloud_profile_spec.provider_config;
            if let (Some(slot), Some(merged)) =
                (new_obj.pointer_mut(STATUS_PROVIDER_CONFIG), merged)
            {
                *slot = merged.into_value();
            }
        }
        Ok(())
    }
}
