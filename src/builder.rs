//! Builder for a [`ModelRack`] with config-file layering and a default engine.

use crate::Result;
use ampslot_core::{ActivationPolicy, EngineFactory, RackConfig};
use ampslot_rack::ModelRack;
use std::path::PathBuf;
use std::sync::Arc;

enum ConfigSource {
    Default,
    Inline(RackConfig),
    File(PathBuf),
}

/// Settings are layered: defaults, then the config given by
/// [`config`](Self::config) or [`config_file`](Self::config_file) (last call
/// wins), then the individual setters, whatever order they were called in.
///
/// Without an explicit factory the reference linear engine is used when the
/// `linear` feature is enabled; otherwise [`build`](Self::build) fails.
///
/// # Example
///
/// ```ignore
/// use ampslot::prelude::*;
///
/// let rack = ampslot::builder()
///     .config_file("ampslot.toml")
///     .sample_rate(44100.0)
///     .build()?;
/// ```
pub struct AmpSlotBuilder {
    source: ConfigSource,
    sample_rate: Option<f64>,
    max_buffer_size: Option<usize>,
    activation: Option<ActivationPolicy>,
    factory: Option<Arc<dyn EngineFactory>>,
}

impl Default for AmpSlotBuilder {
    fn default() -> Self {
        Self {
            source: ConfigSource::Default,
            sample_rate: None,
            max_buffer_size: None,
            activation: None,
            factory: None,
        }
    }
}

impl AmpSlotBuilder {
    /// Read the base configuration from a TOML file at build time.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = ConfigSource::File(path.into());
        self
    }

    pub fn config(mut self, config: RackConfig) -> Self {
        self.source = ConfigSource::Inline(config);
        self
    }

    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    pub fn max_buffer_size(mut self, max_buffer_size: usize) -> Self {
        self.max_buffer_size = Some(max_buffer_size);
        self
    }

    pub fn activation(mut self, policy: ActivationPolicy) -> Self {
        self.activation = Some(policy);
        self
    }

    pub fn factory(mut self, factory: impl EngineFactory + 'static) -> Self {
        self.factory = Some(Arc::new(factory));
        self
    }

    pub fn shared_factory(mut self, factory: Arc<dyn EngineFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// The configuration `build` would use, without constructing the rack.
    pub fn resolve_config(&self) -> Result<RackConfig> {
        let mut config = match &self.source {
            ConfigSource::Default => RackConfig::default(),
            ConfigSource::Inline(config) => config.clone(),
            ConfigSource::File(path) => RackConfig::load(path)?,
        };
        if let Some(rate) = self.sample_rate {
            config.audio.sample_rate = rate;
        }
        if let Some(size) = self.max_buffer_size {
            config.audio.max_buffer_size = size;
        }
        if let Some(policy) = self.activation {
            config.activation = policy;
        }
        Ok(config)
    }

    pub fn build(self) -> Result<ModelRack> {
        let config = self.resolve_config()?;
        let factory = self.factory.or_else(default_factory);

        let mut builder = ModelRack::builder().config(config);
        if let Some(factory) = factory {
            builder = builder.shared_factory(factory);
        }
        Ok(builder.build()?)
    }
}

#[cfg(feature = "linear")]
fn default_factory() -> Option<Arc<dyn EngineFactory>> {
    tracing::debug!("No engine factory given, using the linear reference engine");
    Some(Arc::new(ampslot_linear::LinearFactory::new()))
}

#[cfg(not(feature = "linear"))]
fn default_factory() -> Option<Arc<dyn EngineFactory>> {
    None
}
