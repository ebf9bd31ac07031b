//! Pass configuration, read from a TOML file such as:
//!
//! ```toml
//! [promote]
//! patterns = ["Rec", "Vec"]
//!
//! [rename]
//! prefix = "sig"
//! canonical = "dsp"
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::Deserialize;

use crate::diagnostics::TransformError;
use crate::transform::rename::{DSP_NAME, SIG_PREFIX};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PassConfig {
    #[serde(default)]
    pub promote: PromoteConfig,
    #[serde(default)]
    pub rename: RenameConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromoteConfig {
    /// Substrings selecting the stack variables to promote, applied in order.
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenameConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_canonical")]
    pub canonical: String,
}

fn default_patterns() -> Vec<String> {
    vec!["Rec".to_string()]
}

fn default_prefix() -> String {
    SIG_PREFIX.to_string()
}

fn default_canonical() -> String {
    DSP_NAME.to_string()
}

impl Default for PromoteConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
        }
    }
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            canonical: default_canonical(),
        }
    }
}

impl PassConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, TransformError> {
        let config: PassConfig = toml::from_str(content)
            .map_err(|e| TransformError::config(format!("invalid syntax: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, TransformError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TransformError::config_at(format!("could not read file: {e}"), path.to_path_buf())
        })?;
        Self::from_toml_str(&content).map_err(|err| match err {
            TransformError::Config { msg, .. } => TransformError::config_at(msg, path.to_path_buf()),
            other => other,
        })
    }

    /// Reject settings the passes would accept but that make no sense.
    ///
    /// An empty promotion pattern matches every stack variable.
    pub fn validate(&self) -> Result<(), TransformError> {
        if let Some(i) = self.promote.patterns.iter().position(|p| p.is_empty()) {
            return Err(TransformError::config(format!(
                "promote.patterns[{i}] must not be empty"
            )));
        }
        if self.rename.prefix.is_empty() {
            return Err(TransformError::config("rename.prefix must not be empty"));
        }
        if self.rename.canonical.is_empty() {
            return Err(TransformError::config("rename.canonical must not be empty"));
        }
        if self.rename.canonical.starts_with(&self.rename.prefix) {
            return Err(TransformError::config(format!(
                "rename.canonical '{}' must not start with rename.prefix '{}'",
                self.rename.canonical, self.rename.prefix
            )));
        }
        Ok(())
    }
}
