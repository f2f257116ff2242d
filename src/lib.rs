//! # ampslot - Multi-instance amp model host
//!
//! Runs many independent amp-model instances side by side, addressed by
//! integer handles, with one global sample rate and block size.
//!
//! ## Architecture
//!
//! ampslot is an umbrella crate that coordinates:
//! - **ampslot-core** - Engine contract, instance handles, audio config, lock-free primitives
//! - **ampslot-rack** - Instance registry, config propagation, real-time dispatch
//! - **ampslot-linear** - Reference JSON linear engine (`linear` feature)
//!
//! ## Quick Start
//!
//! ```ignore
//! use ampslot::prelude::*;
//!
//! let rack = ampslot::builder().sample_rate(44100.0).build()?;
//!
//! let amp = rack.create_instance();
//! rack.load_model(amp, &std::fs::read_to_string("clean.json")?);
//!
//! // audio thread
//! rack.process(amp, &input, &mut output, frames);
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - `linear`
//! - `linear` - Reference linear engine, used when no factory is given

/// Re-export of ampslot-core for direct access
pub use ampslot_core as core;

/// Re-export of ampslot-rack for direct access
pub use ampslot_rack as rack;

#[cfg(feature = "linear")]
pub use ampslot_linear as linear;

pub use ampslot_core::{
    ActivationPolicy, AudioConfig, EngineError, EngineFactory, EngineResult, InstanceId,
    ModelEngine, RackConfig, DEFAULT_MAX_BUFFER_SIZE, DEFAULT_SAMPLE_RATE,
};

pub use ampslot_rack::{ModelRack, ModelRackBuilder};

#[cfg(feature = "linear")]
pub use ampslot_linear::{LinearEngine, LinearFactory, LinearModel};

mod builder;
mod error;

pub use builder::AmpSlotBuilder;
pub use error::{Error, Result};

/// Start configuring a rack. See [`AmpSlotBuilder`].
pub fn builder() -> AmpSlotBuilder {
    AmpSlotBuilder::default()
}

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{AmpSlotBuilder, ModelRack};

    pub use crate::{ActivationPolicy, AudioConfig, InstanceId, RackConfig};

    // Bring-your-own engines
    pub use crate::{EngineError, EngineFactory, EngineResult, ModelEngine};

    #[cfg(feature = "linear")]
    pub use crate::LinearFactory;
}
