//! Azure Provider API Types
//!
//! Defines the provider-specific `CloudProfileConfig` (v1alpha1) carried as an
//! opaque blob inside a `NamespacedCloudProfile`, and the subset of the
//! `NamespacedCloudProfile` resource the mutator reads and writes.

pub mod config;
pub mod profile;

pub use config::{
    Capabilities, CloudProfileConfig, DomainCount, ImageReference, MachineImageFlavor,
    MachineImageVersion, MachineImages, MachineType,
};
pub use profile::{
    CapabilityDefinition, CloudProfileReference, CloudProfileSpec, NamespacedCloudProfile,
    NamespacedCloudProfileSpec, NamespacedCloudProfileStatus, ObjectMeta, RawExtension,
};

/// API version of the provider config schema.
pub const PROVIDER_API_VERSION: &str = "azure.provider.extensions.gardener.cloud/v1alpha1";

/// Kind of the provider config object.
pub const CLOUD_PROFILE_CONFIG_KIND: &str = "CloudProfileConfig";

/// Kind handled by the mutator.
pub const NAMESPACED_CLOUD_PROFILE_KIND: &str = "NamespacedCloudProfile";

/// Capability name carrying the CPU architecture.
pub const ARCHITECTURE_CAPABILITY: &str = "architecture";
