//! Engine configuration for pathscope
//!
//! Configuration is read from `pathscope.toml`. Every field is optional and
//! falls back to the defaults in [`types`].

pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{PathscopeError, Result};

pub use types::{
    EngineConfig, GeneratorConfig, TraceConfig, CONFIG_FILE_NAME, CONFIG_FORMAT_VERSION,
};

impl EngineConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "config_loaded");
        Ok(config)
    }

    /// Load `pathscope.toml` from `dir` if it exists, defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_FORMAT_VERSION {
            return Err(PathscopeError::invalid_value(
                "config version",
                format!("{} (supported: {})", self.version, CONFIG_FORMAT_VERSION),
            ));
        }
        if self.trace.snapshot_depth == 0 {
            bail_invalid!("trace.snapshot_depth", "0 (must be at least 1)");
        }
        if self.trace.default_k == 0 {
            bail_invalid!("trace.default_k", "0 (must be at least 1)");
        }
        self.generator.validate()
    }
}

impl GeneratorConfig {
    /// Check that the generator can place nodes with these parameters
    pub fn validate(&self) -> Result<()> {
        if self.nodes == 0 {
            bail_invalid!("generator.nodes", "0 (must be at least 1)");
        }
        if !(0.0..=1.0).contains(&self.street_probability) {
            bail_invalid!("generator.street_probability", self.street_probability);
        }
        if !self.street_radius.is_finite() || self.street_radius < 0.0 {
            bail_invalid!("generator.street_radius", self.street_radius);
        }
        if self.margin < 0.0
            || self.width <= 2.0 * self.margin
            || self.height <= 2.0 * self.margin
        {
            return Err(PathscopeError::invalid_value(
                "generator area",
                format!(
                    "{}x{} with margin {}",
                    self.width, self.height, self.margin
                ),
            ));
        }
        Ok(())
    }
}
