//! Multi-instance model rack: many independent amp models behind integer handles.
//!
//! The rack owns every instance, keeps each loaded engine configured for the
//! current global sample rate and block size, and dispatches audio blocks from
//! the real-time thread without allocating or blocking.
//!
//! This crate contains no engine implementation. Engines come from an
//! [`EngineFactory`](ampslot_core::EngineFactory) given at build time; use
//! `ampslot-linear` for the reference engine or bring your own.
//!
//! ## Threading
//!
//! Control operations (create, destroy, load, unload, config changes) may run
//! on any non-real-time thread. [`ModelRack::process`] only ever try-locks the
//! instance it addresses and bypasses when that lock is busy, so a load or
//! destroy in progress costs at most one bypassed block for that instance.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ampslot_rack::ModelRack;
//!
//! let rack = ModelRack::builder()
//!     .sample_rate(44100.0)
//!     .factory(my_factory)
//!     .build()?;
//!
//! let amp = rack.create_instance();
//! rack.load_model(amp, &model_json);
//!
//! // audio thread
//! rack.process(amp, &input, &mut output, input.len());
//! ```

mod error;
pub use error::{Error, Result};

mod system;
pub use system::{ModelRack, ModelRackBuilder};

mod dispatch;
mod registry;
mod slot;

pub use ampslot_core::{
    ActivationPolicy, AudioConfig, EngineError, EngineFactory, InstanceId, ModelEngine, RackConfig,
};
