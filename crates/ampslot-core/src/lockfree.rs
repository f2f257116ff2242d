//! Lock-free state shared with the audio thread.

use crate::config::AudioConfig;
use atomic_float::AtomicF64;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// [`AudioConfig`] readable without locking.
///
/// The two fields are stored independently. Writers are expected to serialise
/// among themselves; a reader racing a writer may see the new value of one
/// field with the old value of the other.
#[repr(align(64))]
pub struct SharedAudioConfig {
    sample_rate: AtomicF64,
    max_buffer_size: AtomicUsize,
}

impl SharedAudioConfig {
    pub fn new(config: AudioConfig) -> Self {
        Self {
            sample_rate: AtomicF64::new(config.sample_rate),
            max_buffer_size: AtomicUsize::new(config.max_buffer_size),
        }
    }

    #[inline]
    pub fn load(&self) -> AudioConfig {
        AudioConfig::new(self.sample_rate(), self.max_buffer_size())
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate.load(Ordering::Acquire)
    }

    #[inline]
    pub fn max_buffer_size(&self) -> usize {
        self.max_buffer_size.load(Ordering::Acquire)
    }

    /// Returns the previous rate.
    pub fn set_sample_rate(&self, rate: f64) -> f64 {
        self.sample_rate.swap(rate, Ordering::AcqRel)
    }

    /// Returns the previous size.
    pub fn set_max_buffer_size(&self, size: usize) -> usize {
        self.max_buffer_size.swap(size, Ordering::AcqRel)
    }
}

impl Default for SharedAudioConfig {
    fn default() -> Self {
        Self::new(AudioConfig::default())
    }
}

impl std::fmt::Debug for SharedAudioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.load().fmt(f)
    }
}

/// Boolean usable in `static`s and read on the audio thread.
#[derive(Debug, Default)]
pub struct AtomicFlag(AtomicBool);

impl AtomicFlag {
    pub const fn new(value: bool) -> Self {
        Self(AtomicBool::new(value))
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Release);
    }
}
