//! Uniform-format transform
//!
//! A `NamespacedCloudProfile` may describe image versions in either of two
//! shapes:
//! - legacy: one version entry per architecture, image fields on the version
//! - capability flavors: one version entry per version string, one flavor
//!   per capability set
//!
//! Before merging, the spec config is brought into the shape its parent
//! profile uses, so the merge only ever concatenates like with like. The
//! parent uses capability flavors iff it defines machine capabilities.

use std::collections::HashMap;

use azp_api::{
    Capabilities, CapabilityDefinition, CloudProfileConfig, MachineImageFlavor,
    MachineImageVersion, MachineImages, ARCHITECTURE_CAPABILITY,
};

/// Default CPU architecture when neither the version nor the parent names one.
pub const DEFAULT_ARCHITECTURE: &str = "amd64";

/// Bring `config` into the format used by the parent profile.
///
/// Machine types and domain counts pass through unchanged.
pub fn to_parent_format(
    config: &CloudProfileConfig,
    parent_capabilities: &[CapabilityDefinition],
    default_architecture: &str,
) -> CloudProfileConfig {
    let mut transformed = config.clone();

    transformed.machine_images = if parent_capabilities.is_empty() {
        config
            .machine_images
            .iter()
            .map(|image| to_legacy_format(image, default_architecture))
            .collect()
    } else {
        let architecture =
            parent_default_architecture(parent_capabilities).unwrap_or(default_architecture);
        config
            .machine_images
            .iter()
            .map(|image| to_capability_format(image, architecture))
            .collect()
    };

    transformed
}

/// First value of the parent's architecture capability definition.
fn parent_default_architecture(definitions: &[CapabilityDefinition]) -> Option<&str> {
    definitions
        .iter()
        .find(|definition| definition.name == ARCHITECTURE_CAPABILITY)
        .and_then(|definition| definition.values.first())
        .map(String::as_str)
}

/// Expand every flavored version into one legacy version per flavor.
fn to_legacy_format(image: &MachineImages, default_architecture: &str) -> MachineImages {
    let mut versions = Vec::with_capacity(image.versions.len());

    for version in &image.versions {
        if !version.uses_capability_flavors() {
            versions.push(version.clone());
            continue;
        }

        for flavor in &version.capability_flavors {
            let mut legacy = MachineImageVersion {
                version: version.version.clone(),
                architecture: Some(
                    flavor
                        .capability(ARCHITECTURE_CAPABILITY)
                        .unwrap_or(default_architecture)
                        .to_string(),
                ),
                ..Default::default()
            };
            legacy.set_image_reference(flavor.image_reference());
            versions.push(legacy);
        }
    }

    MachineImages {
        name: image.name.clone(),
        versions,
    }
}

/// Fold legacy versions into one flavored version per version string.
///
/// Each legacy entry contributes one flavor. Versions keep the order in
/// which their version string first appears.
fn to_capability_format(image: &MachineImages, default_architecture: &str) -> MachineImages {
    let mut versions: Vec<MachineImageVersion> = Vec::with_capacity(image.versions.len());
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for version in &image.versions {
        let flavors = if version.uses_capability_flavors() {
            version.capability_flavors.clone()
        } else {
            let architecture = version
                .architecture
                .clone()
                .unwrap_or_else(|| default_architecture.to_string());
            let mut capabilities = Capabilities::new();
            capabilities.insert(ARCHITECTURE_CAPABILITY.to_string(), vec![architecture]);
            vec![MachineImageFlavor::new(capabilities, version.image_reference())]
        };

        match positions.get(version.version.as_str()) {
            Some(&index) => versions[index].capability_flavors.extend(flavors),
            None => {
                positions.insert(version.version.as_str(), versions.len());
                versions.push(MachineImageVersion {
                    version: version.version.clone(),
                    capability_flavors: flavors,
                    ..Default::default()
                });
            }
        }
    }

    MachineImages {
        name: image.name.clone(),
        versions,
    }
}
