//! Built-in settings defaults (layer 1)

use serde::{Deserialize, Serialize};

use crate::transform::DEFAULT_ARCHITECTURE;

/// Built-in default settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Log filter directive (default: "info")
    pub log_level: String,

    /// Log output format (default: "text")
    pub log_format: String,

    /// Architecture used when neither an image version nor the parent
    /// profile names one (default: "amd64")
    pub default_architecture: String,

    /// Pretty-print JSON output (default: false)
    pub pretty_output: bool,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            default_architecture: DEFAULT_ARCHITECTURE.to_string(),
            pretty_output: false,
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "log_level": self.log_level,
            "log_format": self.log_format,
            "default_architecture": self.default_architecture,
            "pretty_output": self.pretty_output,
        })
    }
}
