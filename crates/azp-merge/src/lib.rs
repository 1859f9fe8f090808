//! Structural union of provider configs.
//!
//! Merges the operator-authored (spec) provider config of a
//! `NamespacedCloudProfile` into its previously computed (status) provider
//! config. The effective config only ever grows: entries recorded in status
//! are never dropped.
//!
//! Images and types follow different policies and are kept as two separate
//! operations:
//! - images: per-name union, version lists concatenated (status first)
//! - types: per-name union, status entry wins

mod gate;
mod images;
mod types;

pub use gate::{merge_inputs, should_skip, skip_reason, SkipReason};
pub use images::merge_machine_images;
pub use types::merge_machine_types;
