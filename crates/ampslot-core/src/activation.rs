//! One-shot switch for the engine's fast nonlinearity approximation.
//!
//! The switch is irreversible. Engines built before it flips keep the exact
//! activation they were constructed with, so a rack that loads models both
//! before and after the flip can hold engines with slightly different
//! numerics. [`ActivationPolicy::Eager`] avoids that by flipping at startup.

use crate::lockfree::AtomicFlag;
use parking_lot::Once;
use serde::{Deserialize, Serialize};

/// When the fast approximation is switched on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationPolicy {
    /// Immediately before the first model construction.
    #[default]
    OnFirstLoad,
    /// While the rack is being built, before any model exists.
    Eager,
    /// Never. Engines always use their exact activation.
    Disabled,
}

/// Flips exactly once per owner, running the enable hook on the first call.
#[derive(Debug, Default)]
pub struct ActivationSwitch {
    once: Once,
    enabled: AtomicFlag,
}

impl ActivationSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `enable` if the switch has not flipped yet.
    ///
    /// Concurrent callers block until the first caller's hook has returned,
    /// so no caller proceeds to construct an engine with the switch half-on.
    /// Returns `true` only for the call that flipped the switch.
    pub fn ensure_enabled(&self, enable: impl FnOnce()) -> bool {
        let mut flipped = false;
        self.once.call_once(|| {
            enable();
            self.enabled.set(true);
            flipped = true;
        });
        flipped
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}
