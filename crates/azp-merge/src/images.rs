//! Machine image merge.

use azp_api::MachineImages;
use std::collections::BTreeMap;

/// Merge spec machine images into status machine images.
///
/// Merge semantics:
/// - Name only in spec: spec entry added unchanged
/// - Name in both: versions = status versions followed by spec versions
/// - Name only in status: passed through unchanged
///
/// Versions are never deduplicated; the same version string may legitimately
/// appear several times (one entry per architecture in the legacy format).
/// Within one input, a repeated name is last-write-wins.
///
/// The result is sorted by image name.
pub fn merge_machine_images(
    spec_images: &[MachineImages],
    status_images: &[MachineImages],
) -> Vec<MachineImages> {
    let spec_by_name: BTreeMap<&str, &MachineImages> = spec_images
        .iter()
        .map(|image| (image.name.as_str(), image))
        .collect();
    let mut merged: BTreeMap<&str, MachineImages> = status_images
        .iter()
        .map(|image| (image.name.as_str(), image.clone()))
        .collect();

    for (name, spec_image) in spec_by_name {
        match merged.get_mut(name) {
            Some(status_image) => {
                status_image
                    .versions
                    .extend(spec_image.versions.iter().cloned());
            }
            None => {
                merged.insert(name, spec_image.clone());
            }
        }
    }

    merged.into_values().collect()
}
