//! Mutation errors

use crate::codec::{ConfigSide, DecodeError};

/// Errors raised while mutating a `NamespacedCloudProfile`.
///
/// Nothing is written to the resource when any of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum MutateError {
    #[error("wrong object type {0}")]
    WrongObjectType(String),

    #[error("invalid NamespacedCloudProfile: {0}")]
    InvalidObject(#[source] serde_json::Error),

    #[error("could not decode providerConfig of {side}: {source}")]
    Decode {
        side: ConfigSide,
        #[source]
        source: DecodeError,
    },

    #[error("failed to marshal status config: {0}")]
    Encode(#[source] serde_json::Error),
}
