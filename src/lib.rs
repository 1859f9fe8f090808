//! Azure NamespacedCloudProfile mutator
//!
//! Admission-time mutator that keeps the effective provider config in the
//! status of a `NamespacedCloudProfile` a growing union of its spec provider
//! config and the previously computed status provider config.

pub mod codec;
pub mod config;
pub mod mutator;
pub mod observability;
pub mod transform;
pub mod webhook;

pub use azp_api::{CloudProfileConfig, NamespacedCloudProfile};
pub use azp_merge::{merge_machine_images, merge_machine_types, should_skip, SkipReason};
pub use config::{EffectiveSettings, MutatorSettings};
pub use mutator::{MutateError, MutationOutcome, Mutator, NamespacedCloudProfileMutator};
pub use webhook::{AdmissionHandler, AdmissionRequest, AdmissionResponse};
