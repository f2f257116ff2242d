//! Real-time dispatch integration tests
//!
//! Bypass is an exact copy; the engine path sees every sample exactly once,
//! in order, whatever the block size.

use crate::helpers::tolerances::*;
use crate::helpers::*;
use ampslot::prelude::*;

#[test]
fn test_fresh_instance_bypasses() {
    let rack = test_rack();
    let id = rack.create_instance();
    assert_eq!(run(&rack, id, &BYPASS_INPUT), BYPASS_INPUT);
}

#[test]
fn test_unknown_handle_bypasses() {
    let rack = test_rack();
    assert_eq!(
        run(&rack, InstanceId::from_raw(9999), &BYPASS_INPUT),
        BYPASS_INPUT
    );
}

#[test]
fn test_unity_model_passes_sine() {
    let rack = test_rack();
    let id = rack.create_instance();
    rack.load_model(id, &gain_model(1.0));

    let sine = generate_sine(440.0, TEST_SAMPLE_RATE, 512);
    let out = run(&rack, id, &sine);
    assert!(signals_approx_equal(&out, &sine, FLOAT_EPSILON));
}

#[test]
fn test_impulse_response_matches_taps() {
    let rack = test_rack();
    let id = rack.create_instance();
    let taps = [0.5, -0.25, 0.125, 0.0625];
    rack.load_model(id, &fir_model(&taps));

    let out = run(&rack, id, &generate_impulse(8, 2));
    let expected = [0.0, 0.0, 0.5, -0.25, 0.125, 0.0625, 0.0, 0.0];
    assert!(signals_approx_equal(&out, &expected, DSP_EPSILON));
}

#[test]
fn test_blocks_larger_than_buffer_size_are_chunked() {
    let rack = ampslot::builder()
        .max_buffer_size(4)
        .activation(ActivationPolicy::Disabled)
        .build()
        .unwrap();
    let id = rack.create_instance();
    // First difference of a staircase is all ones after the first sample.
    rack.load_model(id, &fir_model(&[1.0, -1.0]));

    let out = run(&rack, id, &generate_integer_staircase(23));
    assert_eq!(out[0], 0.0);
    assert!(out[1..].iter().all(|&y| y == 1.0));
}

#[test]
fn test_frame_count_limits_processing() {
    let rack = test_rack();
    let id = rack.create_instance();
    rack.load_model(id, &gain_model(2.0));

    let input = [1.0, 1.0, 1.0, 1.0];
    let mut output = [9.0; 4];
    rack.process(id, &input, &mut output, 2);
    assert_eq!(output, [2.0, 2.0, 9.0, 9.0]);

    // Frame counts past either buffer are clamped.
    let mut short = [9.0; 3];
    rack.process(id, &input, &mut short, 100);
    assert_eq!(short, [2.0, 2.0, 2.0]);
}

#[test]
fn test_process_in_place() {
    let rack = test_rack();
    let id = rack.create_instance();

    let mut buffer = BYPASS_INPUT;
    rack.process_in_place(id, &mut buffer);
    assert_eq!(buffer, BYPASS_INPUT);

    rack.load_model(id, &fir_model(&[1.0, 1.0]));
    let mut buffer = generate_integer_staircase(300);
    rack.process_in_place(id, &mut buffer);
    assert_eq!(buffer[0], 0.0);
    assert_eq!(buffer[1], 1.0);
    assert_eq!(buffer[299], 299.0 + 298.0);
}
