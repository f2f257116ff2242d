//! JSON model description.
//!
//! ```json
//! {
//!   "version": "0.5.4",
//!   "architecture": "Linear",
//!   "config": { "receptive_field": 3, "bias": true, "activation": "Tanh" },
//!   "weights": [0.5, 0.25, 0.125, 0.0],
//!   "sample_rate": 48000,
//!   "metadata": { "loudness": -18.2 }
//! }
//! ```
//!
//! `weights` holds one tap per sample of receptive field, newest sample first,
//! followed by the bias when `bias` is set.

use crate::activation::Activation;
use ampslot_core::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

pub const ARCHITECTURE: &str = "Linear";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default)]
    pub version: Option<String>,
    pub architecture: String,
    pub config: LinearConfig,
    pub weights: Vec<f32>,
    #[serde(default)]
    pub sample_rate: Option<f64>,
    #[serde(default)]
    pub metadata: ModelMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearConfig {
    pub receptive_field: usize,
    #[serde(default)]
    pub bias: bool,
    #[serde(default)]
    pub activation: Activation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(default)]
    pub loudness: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl LinearModel {
    /// Parse and validate a description.
    pub fn parse(description: &str) -> EngineResult<Self> {
        let model: Self =
            serde_json::from_str(description).map_err(|e| EngineError::Parse(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.architecture != ARCHITECTURE {
            return Err(EngineError::Unsupported(format!(
                "architecture '{}'",
                self.architecture
            )));
        }
        if self.config.receptive_field == 0 {
            return Err(EngineError::Parse(
                "receptive_field must be at least 1".to_string(),
            ));
        }
        let expected = self.expected_weights();
        if self.weights.len() != expected {
            return Err(EngineError::InvalidWeights {
                expected,
                actual: self.weights.len(),
            });
        }
        if self.weights.iter().any(|w| !w.is_finite()) {
            return Err(EngineError::Parse("weights must be finite".to_string()));
        }
        Ok(())
    }

    pub fn expected_weights(&self) -> usize {
        self.config.receptive_field + usize::from(self.config.bias)
    }

    /// Taps, newest sample first.
    pub fn taps(&self) -> &[f32] {
        &self.weights[..self.config.receptive_field]
    }

    pub fn bias(&self) -> f32 {
        if self.config.bias {
            self.weights[self.config.receptive_field]
        } else {
            0.0
        }
    }
}
