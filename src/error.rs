//! Centralized error type for the ampslot umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] ampslot_core::Error),

    #[error("Rack: {0}")]
    Rack(#[from] ampslot_rack::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
