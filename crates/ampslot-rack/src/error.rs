//! Error types for the model rack.

use ampslot_core::{EngineError, InstanceId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown instance: {0}")]
    UnknownInstance(InstanceId),

    #[error("Failed to load model: {0}")]
    ModelLoad(#[from] EngineError),

    #[error(transparent)]
    Core(#[from] ampslot_core::Error),
}
