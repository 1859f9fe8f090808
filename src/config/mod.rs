//! Mutator settings
//!
//! Settings are merged from three layers, last wins:
//! 1. Built-in defaults
//! 2. Settings file (TOML, `--config`)
//! 3. CLI flags

mod defaults;
mod effective;
mod merge;

pub use defaults::BuiltinDefaults;
pub use effective::{ConfigError, EffectiveSettings, LogFormat, MutatorSettings, SettingsOrigin, SettingsSource};
pub use merge::{deep_merge, merge_layers};
