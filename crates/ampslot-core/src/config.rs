//! Rack configuration.
//!
//! Startup configuration can be loaded from TOML:
//!
//! ```toml
//! activation = "eager"
//!
//! [audio]
//! sample_rate = 44100.0
//! max_buffer_size = 256
//! ```
//!
//! Every field is optional and falls back to its default.

use crate::activation::ActivationPolicy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sample rate used until the host sets one.
pub const DEFAULT_SAMPLE_RATE: f64 = 48000.0;

/// One Web Audio render quantum.
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 128;

/// Sample rate and maximum block size shared by every engine in a rack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sample_rate: f64,
    pub max_buffer_size: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
        }
    }
}

impl AudioConfig {
    pub fn new(sample_rate: f64, max_buffer_size: usize) -> Self {
        Self {
            sample_rate,
            max_buffer_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "sample_rate {} must be a positive number",
                self.sample_rate
            )));
        }
        if self.max_buffer_size == 0 {
            return Err(Error::InvalidConfig(
                "max_buffer_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Startup configuration for a rack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RackConfig {
    pub audio: AudioConfig,
    pub activation: ActivationPolicy,
}

impl RackConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!("Loaded rack config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.audio.validate()
    }
}
