//! Tolerance constants for audio testing.

/// Floating point rounding errors (for passthrough, exact gain).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// Accumulated error of short FIR models.
pub const DSP_EPSILON: f32 = 1e-4;
