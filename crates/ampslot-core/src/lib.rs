//! Core types shared by the ampslot crates.
//!
//! # Primary API
//!
//! - [`ModelEngine`] / [`EngineFactory`]: contract a model engine implementation fulfils
//! - [`InstanceId`]: opaque, never-reused instance handle
//! - [`AudioConfig`] / [`RackConfig`]: sample rate, buffer size and activation policy
//! - [`ActivationSwitch`]: one-shot global switch for the fast nonlinearity approximation
//! - [`SharedAudioConfig`], [`AtomicFlag`]: lock-free state read on the audio thread
//!
//! This crate contains no engine implementation. Use `ampslot-linear` for the
//! reference engine or bring your own by implementing [`EngineFactory`].

pub mod error;
pub use error::{Error, Result};

mod engine;
pub use engine::{EngineError, EngineFactory, EngineResult, ModelEngine};

mod instance;
pub use instance::InstanceId;

pub mod config;
pub use config::{AudioConfig, RackConfig, DEFAULT_MAX_BUFFER_SIZE, DEFAULT_SAMPLE_RATE};

mod activation;
pub use activation::{ActivationPolicy, ActivationSwitch};

pub(crate) mod lockfree;
pub use lockfree::{AtomicFlag, SharedAudioConfig};
