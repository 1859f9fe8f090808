//! Skip conditions for the merge.
//!
//! The merge only runs once the core reconciler has produced a status
//! baseline for the current generation.

use azp_api::{NamespacedCloudProfile, RawExtension};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable reason for skipping the merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum SkipReason {
    /// Resource carries a deletion timestamp.
    #[serde(rename = "BEING_DELETED")]
    BeingDeleted,

    /// A spec change has not been reconciled yet.
    #[serde(rename = "GENERATION_MISMATCH")]
    GenerationMismatch { generation: i64, observed: i64 },

    /// No provider config in the spec.
    #[serde(rename = "MISSING_SPEC_CONFIG")]
    MissingSpecConfig,

    /// No provider config in the status.
    #[serde(rename = "MISSING_STATUS_CONFIG")]
    MissingStatusConfig,
}

impl SkipReason {
    /// Get a machine-readable string representation.
    pub fn to_code(&self) -> String {
        match self {
            SkipReason::BeingDeleted => "BEING_DELETED".to_string(),
            SkipReason::GenerationMismatch {
                generation,
                observed,
            } => format!("GENERATION_MISMATCH:{}!={}", generation, observed),
            SkipReason::MissingSpecConfig => "MISSING_SPEC_CONFIG".to_string(),
            SkipReason::MissingStatusConfig => "MISSING_STATUS_CONFIG".to_string(),
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BeingDeleted => write!(f, "resource is being deleted"),
            SkipReason::GenerationMismatch {
                generation,
                observed,
            } => write!(
                f,
                "generation {} not yet observed (observed generation {})",
                generation, observed
            ),
            SkipReason::MissingSpecConfig => write!(f, "spec has no providerConfig"),
            SkipReason::MissingStatusConfig => write!(f, "status has no providerConfig"),
        }
    }
}

/// Both provider configs of `profile`, or the first skip condition that
/// applies to it.
pub fn merge_inputs(
    profile: &NamespacedCloudProfile,
) -> Result<(&RawExtension, &RawExtension), SkipReason> {
    if profile.is_deleting() {
        return Err(SkipReason::BeingDeleted);
    }
    if profile.metadata.generation != profile.status.observed_generation {
        return Err(SkipReason::GenerationMismatch {
            generation: profile.metadata.generation,
            observed: profile.status.observed_generation,
        });
    }
    let spec = profile
        .spec
        .provider_config
        .as_ref()
        .ok_or(SkipReason::MissingSpecConfig)?;
    let status = profile
        .status
        .cloud_profile_spec
        .provider_config
        .as_ref()
        .ok_or(SkipReason::MissingStatusConfig)?;
    Ok((spec, status))
}

/// First skip condition that applies to `profile`, if any.
pub fn skip_reason(profile: &NamespacedCloudProfile) -> Option<SkipReason> {
    merge_inputs(profile).err()
}

/// Whether the merge must not run for `profile`.
pub fn should_skip(profile: &NamespacedCloudProfile) -> bool {
    skip_reason(profile).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn ready_profile(generation: i64, observed: i64) -> NamespacedCloudProfile {
        let mut profile = NamespacedCloudProfile::default();
        profile.metadata.name = "custom".to_string();
        profile.metadata.generation = generation;
        profile.status.observed_generation = observed;
        profile.spec.provider_config = Some(RawExtension::from_value(json!({"machineImages": []})));
        profile.status.cloud_profile_spec.provider_config =
            Some(RawExtension::from_value(json!({"machineImages": []})));
        profile
    }

    #[test]
    fn test_generation_ahead_skips() {
        let profile = ready_profile(3, 2);
        assert!(should_skip(&profile));
        assert_eq!(
            skip_reason(&profile),
            Some(SkipReason::GenerationMismatch {
                generation: 3,
                observed: 2
            })
        );
    }

    #[test]
    fn test_reconciled_profile_not_skipped() {
        let profile = ready_profile(2, 2);
        assert!(!should_skip(&profile));
        assert_eq!(skip_reason(&profile), None);
    }

    #[test]
    fn test_merge_inputs_hands_out_both_configs() {
        let mut profile = ready_profile(2, 2);
        profile.status.cloud_profile_spec.provider_config =
            Some(RawExtension::from_value(json!({"machineTypes": []})));

        let (spec, status) = merge_inputs(&profile).unwrap();

        assert_eq!(spec.as_value(), &json!({"machineImages": []}));
        assert_eq!(status.as_value(), &json!({"machineTypes": []}));
    }

    #[test]
    fn test_merge_inputs_reports_skip_reason() {
        let mut profile = ready_profile(2, 2);
        profile.spec.provider_config = None;

        assert_eq!(merge_inputs(&profile), Err(SkipReason::MissingSpecConfig));
    }

    #[test]
    fn test_deleting_profile_skipped() {
        let mut profile = ready_profile(2, 2);
        profile.metadata.deletion_timestamp = Some(Utc::now());
        assert_eq!(skip_reason(&profile), Some(SkipReason::BeingDeleted));
    }

    #[test]
    fn test_missing_spec_config_skipped() {
        let mut profile = ready_profile(1, 1);
        profile.spec.provider_config = None;
        assert_eq!(skip_reason(&profile), Some(SkipReason::MissingSpecConfig));
    }

    #[test]
    fn test_missing_status_config_skipped() {
        let mut profile = ready_profile(1, 1);
        profile.status.cloud_profile_spec.provider_config = None;
        assert_eq!(skip_reason(&profile), Some(SkipReason::MissingStatusConfig));
    }

    #[test]
    fn test_deletion_reported_before_other_reasons() {
        let mut profile = NamespacedCloudProfile::default();
        profile.metadata.deletion_timestamp = Some(Utc::now());
        profile.metadata.generation = 5;
        assert_eq!(skip_reason(&profile), Some(SkipReason::BeingDeleted));
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(SkipReason::BeingDeleted.to_code(), "BEING_DELETED");
        assert_eq!(
            SkipReason::GenerationMismatch {
                generation: 3,
                observed: 2
            }
            .to_code(),
            "GENERATION_MISMATCH:3!=2"
        );
    }

    #[test]
    fn test_reason_serialization() {
        let json = serde_json::to_string(&SkipReason::MissingStatusConfig).unwrap();
        assert!(json.contains("MISSING_STATUS_CONFIG"));
    }
}
