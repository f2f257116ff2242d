//! One rack slot: an optional engine plus the buffers it needs on the audio thread.

use ampslot_core::{AtomicFlag, AudioConfig, ModelEngine};
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use std::sync::Arc;

/// Engine metadata captured at load, readable without touching the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct EngineMeta {
    pub(crate) loudness: Option<f64>,
    pub(crate) expected_sample_rate: Option<f64>,
}

/// An engine together with its configured block limit and in-place scratch.
pub(crate) struct LoadedEngine {
    engine: Box<dyn ModelEngine>,
    scratch: Vec<f32>,
    block_limit: usize,
}

impl LoadedEngine {
    /// Configure a freshly constructed engine for `config`.
    pub(crate) fn new(engine: Box<dyn ModelEngine>, config: AudioConfig) -> Self {
        let mut loaded = Self {
            engine,
            scratch: Vec::new(),
            block_limit: 1,
        };
        loaded.configure(config);
        loaded
    }

    pub(crate) fn meta(&self) -> EngineMeta {
        EngineMeta {
            loudness: self.engine.loudness(),
            expected_sample_rate: self.engine.expected_sample_rate(),
        }
    }

    pub(crate) fn prewarm(&mut self) {
        self.engine.prewarm();
    }

    /// Apply a new sample rate / block size. Control thread only: may resize scratch.
    pub(crate) fn configure(&mut self, config: AudioConfig) {
        self.engine.configure(config.sample_rate, config.max_buffer_size);
        self.resize(config.max_buffer_size);
    }

    /// Clear engine memory for `config` without reconstructing it.
    pub(crate) fn reset(&mut self, config: AudioConfig) {
        self.engine.reset(config.sample_rate, config.max_buffer_size);
        self.resize(config.max_buffer_size);
    }

    fn resize(&mut self, max_buffer_size: usize) {
        // A zero block size is the engine's problem; chunking still needs a step.
        self.block_limit = max_buffer_size.max(1);
        self.scratch.resize(self.block_limit, 0.0);
    }

    /// Feed the engine in chunks no larger than its configured block size.
    #[inline]
    pub(crate) fn process(&mut self, input: &[f32], output: &mut [f32]) {
        for (inp, out) in input
            .chunks(self.block_limit)
            .zip(output.chunks_mut(self.block_limit))
        {
            self.engine.process(inp, out);
        }
    }

    #[inline]
    pub(crate) fn process_in_place(&mut self, buffer: &mut [f32]) {
        for chunk in buffer.chunks_mut(self.block_limit) {
            let scratch = &mut self.scratch[..chunk.len()];
            scratch.copy_from_slice(chunk);
            self.engine.process(scratch, chunk);
        }
    }
}

/// Registry entry. Empty until a model is loaded.
///
/// The audio thread only ever `try_lock`s the cell; control operations lock it
/// for as long as one engine call takes. Queries never lock it: they read the
/// loaded flag and the metadata captured by [`replace`](Self::replace).
pub(crate) struct Slot {
    cell: Mutex<Option<LoadedEngine>>,
    loaded: AtomicFlag,
    meta: ArcSwapOption<EngineMeta>,
}

impl Slot {
    pub(crate) fn new() -> Self {
        Self {
            cell: Mutex::new(None),
            loaded: AtomicFlag::new(false),
            meta: ArcSwapOption::empty(),
        }
    }

    #[inline]
    pub(crate) fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    /// Metadata of the loaded engine, `None` when empty.
    pub(crate) fn meta(&self) -> Option<EngineMeta> {
        self.meta.load().as_deref().copied()
    }

    /// Install `engine`, handing back the previous one so the caller can drop
    /// it after the lock is released.
    pub(crate) fn replace(&self, engine: LoadedEngine) -> Option<LoadedEngine> {
        let meta = Arc::new(engine.meta());
        let mut cell = self.cell.lock();
        let previous = cell.replace(engine);
        self.meta.store(Some(meta));
        self.loaded.set(true);
        previous
    }

    pub(crate) fn take(&self) -> Option<LoadedEngine> {
        let mut cell = self.cell.lock();
        self.loaded.set(false);
        self.meta.store(None);
        cell.take()
    }

    /// Run `f` on the engine if one is loaded. Blocks for at most one `process` call.
    pub(crate) fn with_engine<R>(&self, f: impl FnOnce(&mut LoadedEngine) -> R) -> Option<R> {
        self.cell.lock().as_mut().map(f)
    }

    /// Process through the engine. Returns `false` when the caller must bypass:
    /// no engine, or the cell is busy with a control operation.
    #[inline]
    pub(crate) fn try_process(&self, input: &[f32], output: &mut [f32]) -> bool {
        let Some(mut cell) = self.cell.try_lock() else {
            return false;
        };
        match cell.as_mut() {
            Some(loaded) => {
                loaded.process(input, output);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub(crate) fn try_process_in_place(&self, buffer: &mut [f32]) -> bool {
        let Some(mut cell) = self.cell.try_lock() else {
            return false;
        };
        match cell.as_mut() {
            Some(loaded) => {
                loaded.process_in_place(buffer);
                true
            }
            None => false,
        }
    }
}
