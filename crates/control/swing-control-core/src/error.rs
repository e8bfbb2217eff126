//! Error types for the swing control loop.
//!
//! Only setup paths (config parsing/validation, asset binding) produce these.
//! The per-frame path degrades to no-ops and logs instead of returning them.

/// Errors reported by configuration and asset binding.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum SwingError {
    /// The external loader could not fetch or parse the model.
    #[error("Asset load failed for {path}: {reason}")]
    AssetLoad { path: String, reason: String },

    /// A named node (bone, armature) was not found in the loaded scene.
    #[error("Node not found: {name}")]
    MissingNode { name: String },

    /// The model loaded but carries no animation clips.
    #[error("No animation clips in {path}")]
    NoClips { path: String },

    /// Configuration values out of range.
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// JSON (de)serialization error.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SwingError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
