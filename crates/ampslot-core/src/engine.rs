//! Model engine contract.
//!
//! Defines the [`ModelEngine`] trait that amp-model implementations fulfil and
//! the [`EngineFactory`] that builds them from an opaque serialized
//! description. All audio crosses the boundary as flat mono `&[f32]` blocks.
//!
//! # Lifecycle
//!
//! 1. [`EngineFactory::construct`] parses the description
//! 2. [`ModelEngine::configure`] for the current sample rate and block size
//! 3. [`ModelEngine::prewarm`] once, before the first real block
//! 4. [`ModelEngine::process`] per block on the audio thread
//! 5. [`ModelEngine::reset`] whenever the host wants internal memory cleared

use thiserror::Error;

/// Why a model description could not be turned into an engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Malformed model description: {0}")]
    Parse(String),

    #[error("Unsupported model: {0}")]
    Unsupported(String),

    #[error("Invalid weights: expected {expected}, got {actual}")]
    InvalidWeights { expected: usize, actual: usize },

    #[error("Engine construction panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Other(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// A stateful mono transform loaded from a model description.
///
/// # Thread Safety
///
/// An engine is built on a control thread and then moved into the rack, where
/// the audio thread drives [`process`](Self::process). It must be `Send`; it
/// is never shared between threads at the same time.
///
/// # Real-time contract
///
/// `process` must not allocate, block or panic for any block of at most the
/// `max_buffer_size` last passed to [`reset`](Self::reset).
pub trait ModelEngine: Send {
    /// Re-initialise internal state for the given sample rate and maximum
    /// block size. Clears filter and history memory.
    fn reset(&mut self, sample_rate: f64, max_buffer_size: usize);

    /// Apply a sample rate / block size. Defaults to a full [`reset`](Self::reset).
    fn configure(&mut self, sample_rate: f64, max_buffer_size: usize) {
        self.reset(sample_rate, max_buffer_size);
    }

    /// Settle initial internal state before real audio is processed.
    fn prewarm(&mut self) {}

    /// Calibrated output loudness in dB, if the model carries it.
    fn loudness(&self) -> Option<f64> {
        None
    }

    /// Sample rate the model was trained at, if the model carries it.
    fn expected_sample_rate(&self) -> Option<f64> {
        None
    }

    /// Transform `input` into `output`. Both slices have the same length.
    fn process(&mut self, input: &[f32], output: &mut [f32]);
}

/// Builds engines from serialized model descriptions.
pub trait EngineFactory: Send + Sync {
    /// Parse `description` and construct an engine.
    fn construct(&self, description: &str) -> EngineResult<Box<dyn ModelEngine>>;

    /// Switch every engine constructed from now on to the fast nonlinearity
    /// approximation. Called at most once per rack, before construction.
    fn enable_fast_approximation(&self) {}

    /// Short name for logs, e.g. "linear".
    fn name(&self) -> &str {
        "engine"
    }
}

impl<F> EngineFactory for F
where
    F: Fn(&str) -> EngineResult<Box<dyn ModelEngine>> + Send + Sync,
{
    fn construct(&self, description: &str) -> EngineResult<Box<dyn ModelEngine>> {
        self(description)
    }
}
