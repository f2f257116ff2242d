//! Output activations and the process-global fast tanh switch.

use ampslot_core::AtomicFlag;
use serde::{Deserialize, Serialize};

static FAST_TANH: AtomicFlag = AtomicFlag::new(false);

/// Make every engine constructed from now on use [`fast_tanh`]. Irreversible.
pub fn enable_fast_tanh() {
    FAST_TANH.set(true);
}

pub fn fast_tanh_enabled() -> bool {
    FAST_TANH.get()
}

/// Rational approximation of `tanh`, within 5e-4 of the exact value.
#[inline]
pub fn fast_tanh(x: f32) -> f32 {
    let ax = x.abs();
    let x2 = x * x;
    (x * (2.455_507_5 + 2.455_507_5 * ax + (0.893_229_85 + 0.821_226_67 * ax) * x2))
        / (2.445_066_3 + (2.445_066_3 + x2) * (x + 0.814_642_73 * x * ax).abs())
}

/// Activation named in a model description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    #[default]
    #[serde(alias = "None")]
    Identity,
    Tanh,
    Hardtanh,
}

/// An [`Activation`] bound to the tanh mode in force when the engine was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nonlinearity {
    Identity,
    Tanh,
    FastTanh,
    Hardtanh,
}

impl Nonlinearity {
    pub(crate) fn resolve(activation: Activation, fast: bool) -> Self {
        match activation {
            Activation::Identity => Self::Identity,
            Activation::Tanh if fast => Self::FastTanh,
            Activation::Tanh => Self::Tanh,
            Activation::Hardtanh => Self::Hardtanh,
        }
    }

    #[inline]
    pub(crate) fn apply(self, x: f32) -> f32 {
        match self {
            Self::Identity => x,
            Self::Tanh => x.tanh(),
            Self::FastTanh => fast_tanh(x),
            Self::Hardtanh => x.clamp(-1.0, 1.0),
        }
    }
}
