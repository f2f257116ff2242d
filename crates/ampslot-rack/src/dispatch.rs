//! Real-time block dispatch.
//!
//! Nothing here allocates, blocks or logs. A lookup miss, an empty slot and a
//! slot busy with a control operation all fall back to bypass.

use crate::system::ModelRack;
use ampslot_core::InstanceId;

impl ModelRack {
    /// Run `frame_count` samples of `input` through the engine of `id` into `output`.
    ///
    /// Copies `input` to `output` unchanged when `id` has no engine. The frame
    /// count is clamped to the shorter slice; samples past it are left alone.
    #[inline]
    pub fn process(&self, id: InstanceId, input: &[f32], output: &mut [f32], frame_count: usize) {
        let frames = frame_count.min(input.len()).min(output.len());
        let input = &input[..frames];
        let output = &mut output[..frames];

        let processed = self
            .inner
            .registry
            .with_slot(id, |slot| slot.try_process(input, output))
            .unwrap_or(false);

        if !processed {
            output.copy_from_slice(input);
        }
    }

    /// In-place variant of [`process`](Self::process). Bypass leaves `buffer` untouched.
    #[inline]
    pub fn process_in_place(&self, id: InstanceId, buffer: &mut [f32]) {
        self.inner
            .registry
            .with_slot(id, |slot| slot.try_process_in_place(buffer));
    }
}
