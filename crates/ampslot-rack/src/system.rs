//! Model rack: instance lifecycle, model loading and global audio config.

use crate::error::{Error, Result};
use crate::registry::InstanceRegistry;
use crate::slot::{EngineMeta, LoadedEngine, Slot};
use ampslot_core::{
    ActivationPolicy, ActivationSwitch, AudioConfig, EngineError, EngineFactory, InstanceId,
    RackConfig, SharedAudioConfig,
};
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Hosts any number of independent model instances behind stable handles.
///
/// Cheap to clone; clones share the same instances. Hand one clone to the
/// audio callback and keep another on the control thread.
///
/// Every operation is total: unknown handles are ignored by mutating calls,
/// answered with neutral defaults by queries, and bypassed by
/// [`process`](Self::process).
#[derive(Clone)]
pub struct ModelRack {
    pub(crate) inner: Arc<ModelRackInner>,
}

pub(crate) struct ModelRackInner {
    pub(crate) registry: InstanceRegistry,
    factory: Arc<dyn EngineFactory>,
    audio: SharedAudioConfig,
    activation_policy: ActivationPolicy,
    activation: ActivationSwitch,
    /// Serialises engine publication with config propagation.
    control: Mutex<()>,
}

impl ModelRack {
    pub fn builder() -> ModelRackBuilder {
        ModelRackBuilder::default()
    }

    // Instances

    pub fn create_instance(&self) -> InstanceId {
        let id = self.inner.registry.create();
        tracing::debug!("Created {}", id);
        id
    }

    /// Remove `id` and release its engine. Unknown ids are ignored.
    pub fn destroy_instance(&self, id: InstanceId) {
        let Some(slot) = self.inner.registry.remove(id) else {
            return;
        };
        // Taking the engine waits out an in-flight process call; it is then
        // dropped here rather than on the audio thread.
        let engine = slot.take();
        tracing::debug!("Destroyed {} (had model: {})", id, engine.is_some());
    }

    pub fn instance_count(&self) -> usize {
        self.inner.registry.len()
    }

    /// Live instance ids in ascending order.
    pub fn instance_ids(&self) -> Vec<InstanceId> {
        self.inner.registry.ids()
    }

    /// Number of instances currently holding an engine.
    pub fn loaded_count(&self) -> usize {
        self.inner
            .registry
            .snapshot()
            .values()
            .filter(|slot| slot.is_loaded())
            .count()
    }

    // Models

    /// Load a model into `id`, replacing any engine it already holds.
    ///
    /// On failure the instance keeps whatever it had before.
    pub fn try_load_model(&self, id: InstanceId, description: &str) -> Result<()> {
        let slot = self
            .inner
            .registry
            .get(id)
            .ok_or(Error::UnknownInstance(id))?;

        if self.inner.activation_policy == ActivationPolicy::OnFirstLoad {
            self.enable_fast_approximation();
        }

        let previous = {
            let _control = self.inner.control.lock();
            let config = self.audio_config();
            let loaded = self.build_engine(description, config).inspect_err(|e| {
                tracing::warn!("Failed to load model into {}: {}", id, e);
            })?;

            if let Some(expected) = loaded.meta().expected_sample_rate {
                if expected != config.sample_rate {
                    tracing::warn!(
                        "{}: model expects {} Hz, rack runs at {} Hz",
                        id,
                        expected,
                        config.sample_rate
                    );
                }
            }
            slot.replace(loaded)
        };

        tracing::info!(
            "Loaded {} model into {}{}",
            self.inner.factory.name(),
            id,
            if previous.is_some() { " (replaced)" } else { "" }
        );
        drop(previous);
        Ok(())
    }

    /// Boolean form of [`try_load_model`](Self::try_load_model).
    pub fn load_model(&self, id: InstanceId, description: &str) -> bool {
        self.try_load_model(id, description).is_ok()
    }

    /// Release the engine of `id`, keeping the instance. No-op when empty or unknown.
    pub fn unload_model(&self, id: InstanceId) {
        let Some(slot) = self.inner.registry.get(id) else {
            return;
        };
        if slot.take().is_some() {
            tracing::debug!("Unloaded model from {}", id);
        }
    }

    pub fn has_model(&self, id: InstanceId) -> bool {
        self.inner
            .registry
            .with_slot(id, |slot| slot.is_loaded())
            .unwrap_or(false)
    }

    /// Clear the engine's internal memory for the current config, e.g. on
    /// transport stop. No-op when empty or unknown; an engine that panics is unloaded.
    pub fn reset(&self, id: InstanceId) {
        let Some(slot) = self.inner.registry.get(id) else {
            return;
        };
        let _control = self.inner.control.lock();
        let config = self.audio_config();
        self.guarded(id, &slot, |loaded| loaded.reset(config));
    }

    /// Loudness in dB, or 0.0 when unavailable.
    pub fn model_loudness(&self, id: InstanceId) -> f64 {
        self.loudness(id).unwrap_or(0.0)
    }

    pub fn has_model_loudness(&self, id: InstanceId) -> bool {
        self.loudness(id).is_some()
    }

    fn loudness(&self, id: InstanceId) -> Option<f64> {
        self.meta(id)?.loudness
    }

    /// Sample rate the loaded model was trained at, if it says.
    pub fn expected_sample_rate(&self, id: InstanceId) -> Option<f64> {
        self.meta(id)?.expected_sample_rate
    }

    /// Never touches the engine, so it cannot make `process` bypass.
    fn meta(&self, id: InstanceId) -> Option<EngineMeta> {
        self.inner.registry.with_slot(id, |slot| slot.meta()).flatten()
    }

    // Global audio config

    /// Store `rate` and reconfigure every loaded engine before returning.
    /// An engine that panics while reconfiguring is unloaded.
    pub fn set_sample_rate(&self, rate: f64) {
        let _control = self.inner.control.lock();
        self.inner.audio.set_sample_rate(rate);
        let count = self.reconfigure_all(self.audio_config());
        tracing::debug!("Sample rate set to {} Hz ({} engines reconfigured)", rate, count);
    }

    pub fn sample_rate(&self) -> f64 {
        self.inner.audio.sample_rate()
    }

    /// Store `size` and reconfigure every loaded engine before returning.
    /// An engine that panics while reconfiguring is unloaded.
    pub fn set_max_buffer_size(&self, size: usize) {
        let _control = self.inner.control.lock();
        self.inner.audio.set_max_buffer_size(size);
        let count = self.reconfigure_all(self.audio_config());
        tracing::debug!("Max buffer size set to {} ({} engines reconfigured)", size, count);
    }

    pub fn max_buffer_size(&self) -> usize {
        self.inner.audio.max_buffer_size()
    }

    pub fn audio_config(&self) -> AudioConfig {
        self.inner.audio.load()
    }

    // Activation

    pub fn fast_approximation_enabled(&self) -> bool {
        self.inner.activation.is_enabled()
    }

    pub fn activation_policy(&self) -> ActivationPolicy {
        self.inner.activation_policy
    }

    fn enable_fast_approximation(&self) {
        let factory = &self.inner.factory;
        if self
            .inner
            .activation
            .ensure_enabled(|| factory.enable_fast_approximation())
        {
            tracing::info!("Enabled fast activation approximation for {}", factory.name());
        }
    }

    // Internals

    /// Caller holds the control lock.
    fn reconfigure_all(&self, config: AudioConfig) -> usize {
        self.inner
            .registry
            .snapshot()
            .iter()
            .filter(|(id, slot)| self.guarded(**id, slot, |loaded| loaded.configure(config)))
            .count()
    }

    /// Run a control call on the engine of `slot`. An engine that panics is
    /// unloaded, since its state no longer matches the rack's config.
    /// Returns whether an engine ran `f` successfully.
    fn guarded(&self, id: InstanceId, slot: &Slot, f: impl FnOnce(&mut LoadedEngine)) -> bool {
        let outcome = slot.with_engine(|loaded| {
            panic::catch_unwind(AssertUnwindSafe(|| f(loaded)))
                .map_err(|payload| panic_message(payload.as_ref()))
        });
        match outcome {
            Some(Ok(())) => true,
            Some(Err(message)) => {
                let failed = slot.take();
                tracing::warn!("{} panicked and was unloaded: {}", id, message);
                drop(failed);
                false
            }
            None => false,
        }
    }

    /// Construct, configure and prewarm. A panic anywhere in the engine is
    /// turned into [`EngineError::Panicked`].
    fn build_engine(&self, description: &str, config: AudioConfig) -> Result<LoadedEngine> {
        let factory = &self.inner.factory;
        let built = panic::catch_unwind(AssertUnwindSafe(|| {
            factory.construct(description).map(|engine| {
                let mut loaded = LoadedEngine::new(engine, config);
                loaded.prewarm();
                loaded
            })
        }));

        match built {
            Ok(result) => Ok(result?),
            Err(payload) => Err(EngineError::Panicked(panic_message(payload.as_ref())).into()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl std::fmt::Debug for ModelRack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRack")
            .field("factory", &self.inner.factory.name())
            .field("instances", &self.instance_count())
            .field("audio", &self.audio_config())
            .field("activation", &self.inner.activation_policy)
            .finish()
    }
}

pub struct ModelRackBuilder {
    config: RackConfig,
    factory: Option<Arc<dyn EngineFactory>>,
}

impl Default for ModelRackBuilder {
    fn default() -> Self {
        Self {
            config: RackConfig::default(),
            factory: None,
        }
    }
}

impl ModelRackBuilder {
    /// Replace all settings with `config`.
    pub fn config(mut self, config: RackConfig) -> Self {
        self.config = config;
        self
    }

    /// Default: 48000.0
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.config.audio.sample_rate = sample_rate;
        self
    }

    /// Default: 128
    pub fn max_buffer_size(mut self, max_buffer_size: usize) -> Self {
        self.config.audio.max_buffer_size = max_buffer_size;
        self
    }

    /// Default: [`ActivationPolicy::OnFirstLoad`]
    pub fn activation(mut self, policy: ActivationPolicy) -> Self {
        self.config.activation = policy;
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

    pub fn build(self) -> Result<ModelRack> {
        let factory = self.factory.ok_or_else(|| {
            ampslot_core::Error::InvalidConfig(
                "No engine factory configured. Use .factory() to set one.".to_string(),
            )
        })?;
        self.config.validate()?;

        let audio = self.config.audio;
        let rack = ModelRack {
            inner: Arc::new(ModelRackInner {
                registry: InstanceRegistry::new(),
                factory,
                audio: SharedAudioConfig::new(audio),
                activation_policy: self.config.activation,
                activation: ActivationSwitch::new(),
                control: Mutex::new(()),
            }),
        };

        if rack.inner.activation_policy == ActivationPolicy::Eager {
            rack.enable_fast_approximation();
        }

        tracing::info!(
            "Model rack ready: {} factory, {} Hz, {} frames max",
            rack.inner.factory.name(),
            audio.sample_rate,
            audio.max_buffer_size
        );
        Ok(rack)
    }
}
