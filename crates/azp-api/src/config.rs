//! Provider config types (`CloudProfileConfig`).
//!
//! All types reject unknown fields so that a typo in an operator-authored
//! blob surfaces as a decode error instead of being silently dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Capability name -> allowed values (e.g. `architecture: [amd64]`).
pub type Capabilities = BTreeMap<String, Vec<String>>;

/// Provider-specific cloud profile configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CloudProfileConfig {
    /// Schema group/version (optional on input, always written on output).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Schema kind (optional on input, always written on output).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Update domain counts per region.
    #[serde(default)]
    pub count_update_domains: Vec<DomainCount>,

    /// Fault domain counts per region.
    #[serde(default)]
    pub count_fault_domains: Vec<DomainCount>,

    /// Machine image definitions.
    #[serde(default)]
    pub machine_images: Vec<MachineImages>,

    /// Machine type definitions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub machine_types: Vec<MachineType>,
}

/// Domain count for a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DomainCount {
    pub region: String,
    pub count: i32,
}

/// A named machine image with its provider-specific versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MachineImages {
    /// Logical image name (e.g. `ubuntu`).
    pub name: String,

    /// Version entries. The same version string may appear more than once.
    #[serde(default)]
    pub versions: Vec<MachineImageVersion>,
}

/// One version of a machine image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MachineImageVersion {
    /// Version string.
    pub version: String,

    /// Marketplace URN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,

    /// Skip accepting the marketplace terms for this image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_marketplace_image: Option<bool>,

    /// Image resource ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Community gallery image ID.
    #[serde(
        default,
        rename = "communityGalleryImageID",
        skip_serializing_if = "Option::is_none"
    )]
    pub community_gallery_image_id: Option<String>,

    /// Shared gallery image ID.
    #[serde(
        default,
        rename = "sharedGalleryImageID",
        skip_serializing_if = "Option::is_none"
    )]
    pub shared_gallery_image_id: Option<String>,

    /// Whether accelerated networking is supported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accelerated_networking: Option<bool>,

    /// Legacy single-architecture tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,

    /// Capability-based image flavors (current format).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capability_flavors: Vec<MachineImageFlavor>,
}

impl MachineImageVersion {
    /// Image reference fields of this version.
    pub fn image_reference(&self) -> ImageReference {
        ImageReference {
            urn: self.urn.clone(),
            skip_marketplace_image: self.skip_marketplace_image,
            id: self.id.clone(),
            community_gallery_image_id: self.community_gallery_image_id.clone(),
            shared_gallery_image_id: self.shared_gallery_image_id.clone(),
            accelerated_networking: self.accelerated_networking,
        }
    }

    /// Replace the image reference fields of this version.
    pub fn set_image_reference(&mut self, reference: ImageReference) {
        self.urn = reference.urn;
        self.skip_marketplace_image = reference.skip_marketplace_image;
        self.id = reference.id;
        self.community_gallery_image_id = reference.community_gallery_image_id;
        self.shared_gallery_image_id = reference.shared_gallery_image_id;
        self.accelerated_networking = reference.accelerated_networking;
    }

    /// Whether the version is expressed with capability flavors.
    pub fn uses_capability_flavors(&self) -> bool {
        !self.capability_flavors.is_empty()
    }
}

/// An image flavor: a set of capabilities and the image that provides them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MachineImageFlavor {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub capabilities: Capabilities,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_marketplace_image: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(
        default,
        rename = "communityGalleryImageID",
        skip_serializing_if = "Option::is_none"
    )]
    pub community_gallery_image_id: Option<String>,

    #[serde(
        default,
        rename = "sharedGalleryImageID",
        skip_serializing_if = "Option::is_none"
    )]
    pub shared_gallery_image_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accelerated_networking: Option<bool>,
}

impl MachineImageFlavor {
    /// Build a flavor from capabilities and an image reference.
    pub fn new(capabilities: Capabilities, reference: ImageReference) -> Self {
        Self {
            capabilities,
            urn: reference.urn,
            skip_marketplace_image: reference.skip_marketplace_image,
            id: reference.id,
            community_gallery_image_id: reference.community_gallery_image_id,
            shared_gallery_image_id: reference.shared_gallery_image_id,
            accelerated_networking: reference.accelerated_networking,
        }
    }

    /// Image reference fields of this flavor.
    pub fn image_reference(&self) -> ImageReference {
        ImageReference {
            urn: self.urn.clone(),
            skip_marketplace_image: self.skip_marketplace_image,
            id: self.id.clone(),
            community_gallery_image_id: self.community_gallery_image_id.clone(),
            shared_gallery_image_id: self.shared_gallery_image_id.clone(),
            accelerated_networking: self.accelerated_networking,
        }
    }

    /// First value of the named capability, if any.
    pub fn capability(&self, name: &str) -> Option<&str> {
        self.capabilities
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// The image-locating fields shared by versions and flavors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageReference {
    pub urn: Option<String>,
    pub skip_marketplace_image: Option<bool>,
    pub id: Option<String>,
    pub community_gallery_image_id: Option<String>,
    pub shared_gallery_image_id: Option<String>,
    pub accelerated_networking: Option<bool>,
}

/// Provider-specific machine type settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MachineType {
    /// Machine type name (e.g. `Standard_D2s_v5`).
    pub name: String,

    /// Whether accelerated networking is supported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accelerated_networking: Option<bool>,
}
