//! Linear (FIR) engine.

use crate::activation::Nonlinearity;
use crate::model::LinearModel;
use ampslot_core::{EngineResult, ModelEngine};

/// `y[n] = act(bias + sum_k taps[k] * x[n - k])`.
///
/// History lives in a ring buffer sized once at construction, so
/// [`process`](ModelEngine::process) never allocates and accepts any block size.
pub struct LinearEngine {
    taps: Vec<f32>,
    bias: f32,
    nonlinearity: Nonlinearity,
    history: Vec<f32>,
    /// Index of the newest sample in `history`.
    head: usize,
    sample_rate: f64,
    max_buffer_size: usize,
    loudness: Option<f64>,
    expected_sample_rate: Option<f64>,
}

impl LinearEngine {
    /// Build from `model`, rejecting it if it does not validate. `fast_tanh`
    /// fixes the tanh flavour for this engine's lifetime.
    pub fn new(model: &LinearModel, fast_tanh: bool) -> EngineResult<Self> {
        model.validate()?;
        let taps = model.taps().to_vec();
        let history = vec![0.0; taps.len()];
        Ok(Self {
            taps,
            bias: model.bias(),
            nonlinearity: Nonlinearity::resolve(model.config.activation, fast_tanh),
            history,
            head: 0,
            sample_rate: 0.0,
            max_buffer_size: 0,
            loudness: model.metadata.loudness,
            expected_sample_rate: model.sample_rate,
        })
    }

    pub fn uses_fast_tanh(&self) -> bool {
        self.nonlinearity == Nonlinearity::FastTanh
    }

    /// Sample rate and block size from the last reset.
    pub fn configured(&self) -> (f64, usize) {
        (self.sample_rate, self.max_buffer_size)
    }

    #[inline]
    fn tick(&mut self, x: f32) -> f32 {
        let len = self.history.len();
        self.head = (self.head + 1) % len;
        self.history[self.head] = x;

        let mut acc = self.bias;
        let mut idx = self.head;
        for &tap in &self.taps {
            acc += tap * self.history[idx];
            idx = if idx == 0 { len - 1 } else { idx - 1 };
        }
        self.nonlinearity.apply(acc)
    }
}

impl ModelEngine for LinearEngine {
    fn reset(&mut self, sample_rate: f64, max_buffer_size: usize) {
        self.sample_rate = sample_rate;
        self.max_buffer_size = max_buffer_size;
        self.history.fill(0.0);
        self.head = 0;
    }

    fn prewarm(&mut self) {
        for _ in 0..self.taps.len() {
            self.tick(0.0);
        }
    }

    fn loudness(&self) -> Option<f64> {
        self.loudness
    }

    fn expected_sample_rate(&self) -> Option<f64> {
        self.expected_sample_rate
    }

    fn process(&mut self, input: &[f32], output: &mut [f32]) {
        for (out, &x) in output.iter_mut().zip(input) {
            *out = self.tick(x);
        }
    }
}
