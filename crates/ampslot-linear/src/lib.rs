//! Reference model engine for ampslot.
//!
//! A linear model is an FIR filter over the input signal with an optional bias
//! and output activation, described in JSON (see [`LinearModel`]). It is small
//! enough to reason about exactly, which makes it useful for tests and as a
//! template for real engines.
//!
//! ```rust,ignore
//! use ampslot_linear::LinearFactory;
//! use ampslot_rack::ModelRack;
//!
//! let rack = ModelRack::builder().factory(LinearFactory::new()).build()?;
//! let amp = rack.create_instance();
//! rack.load_model(amp, r#"{"architecture":"Linear","config":{"receptive_field":1},"weights":[0.5]}"#);
//! ```

mod activation;
pub use activation::{enable_fast_tanh, fast_tanh, fast_tanh_enabled, Activation};

mod engine;
pub use engine::LinearEngine;

mod factory;
pub use factory::LinearFactory;

pub mod model;
pub use model::LinearModel;
