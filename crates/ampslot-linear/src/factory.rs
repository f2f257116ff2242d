use crate::activation::{enable_fast_tanh, fast_tanh_enabled};
use crate::engine::LinearEngine;
use crate::model::LinearModel;
use ampslot_core::{EngineFactory, EngineResult, ModelEngine};

/// Builds [`LinearEngine`]s from JSON model descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearFactory;

impl LinearFactory {
    pub fn new() -> Self {
        Self
    }
}

impl EngineFactory for LinearFactory {
    fn construct(&self, description: &str) -> EngineResult<Box<dyn ModelEngine>> {
        let model = LinearModel::parse(description)?;
        let fast = fast_tanh_enabled();
        tracing::trace!(
            receptive_field = model.config.receptive_field,
            activation = ?model.config.activation,
            fast_tanh = fast,
            "Constructing linear engine"
        );
        Ok(Box::new(LinearEngine::new(&model, fast)?))
    }

    fn enable_fast_approximation(&self) {
        enable_fast_tanh();
        tracing::debug!("Fast tanh enabled for linear engines");
    }

    fn name(&self) -> &str {
        "linear"
    }
}
