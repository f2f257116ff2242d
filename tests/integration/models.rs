//! Model load/unload/reset integration tests

use crate::helpers::*;
use ampslot::prelude::*;
use approx::assert_relative_eq;

#[test]
fn test_invalid_description_on_empty_instance() {
    let rack = test_rack();
    let id = rack.create_instance();
    assert!(!rack.load_model(id, "this is not a model"));
    assert!(!rack.has_model(id));
    assert_eq!(run(&rack, id, &BYPASS_INPUT), BYPASS_INPUT);
}

#[test]
fn test_invalid_description_keeps_loaded_engine() {
    let rack = test_rack();
    let id = rack.create_instance();
    assert!(rack.load_model(id, &gain_model(2.0)));

    assert!(!rack.load_model(id, "{"));
    assert!(rack.has_model(id));
    assert_eq!(run(&rack, id, &[0.25]), vec![0.5]);
}

#[test]
fn test_failure_reason_is_typed() {
    let rack = test_rack();
    let id = rack.create_instance();
    let err = rack
        .try_load_model(
            id,
            r#"{"architecture":"LSTM","config":{"receptive_field":1},"weights":[1.0]}"#,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ampslot::rack::Error::ModelLoad(EngineError::Unsupported(_))
    ));
}

#[test]
fn test_reload_replaces_engine() {
    let rack = test_rack();
    let id = rack.create_instance();
    rack.load_model(id, &gain_model(2.0));
    rack.load_model(id, &gain_model(-1.0));
    assert_eq!(run(&rack, id, &[0.5]), vec![-0.5]);
    assert_eq!(rack.loaded_count(), 1);
}

#[test]
fn test_unload_falls_back_to_bypass() {
    let rack = test_rack();
    let id = rack.create_instance();
    rack.load_model(id, &gain_model(4.0));
    rack.unload_model(id);

    assert!(!rack.has_model(id));
    assert_eq!(rack.instance_count(), 1);
    assert_eq!(run(&rack, id, &BYPASS_INPUT), BYPASS_INPUT);

    // Unloading an empty instance is a no-op.
    rack.unload_model(id);
    assert_eq!(rack.instance_count(), 1);
}

#[test]
fn test_reset_clears_memory_only() {
    let rack = test_rack();
    let id = rack.create_instance();
    rack.load_model(id, &fir_model(&[1.0, 1.0, 1.0]));

    let fresh = run(&rack, id, &[1.0, 1.0, 1.0]);
    assert_eq!(fresh, vec![1.0, 2.0, 3.0]);

    rack.reset(id);
    rack.reset(id);
    assert!(rack.has_model(id));
    assert_eq!(run(&rack, id, &[1.0, 1.0, 1.0]), fresh);
}

#[test]
fn test_loudness() {
    let rack = test_rack();
    let with = rack.create_instance();
    let without = rack.create_instance();
    rack.load_model(with, &gain_model_with_loudness(1.0, -14.5));
    rack.load_model(without, &gain_model(1.0));

    assert!(rack.has_model_loudness(with));
    assert_relative_eq!(rack.model_loudness(with), -14.5);

    assert!(!rack.has_model_loudness(without));
    assert_eq!(rack.model_loudness(without), 0.0);

    let unknown = InstanceId::from_raw(9999);
    assert_eq!(
        (rack.model_loudness(unknown), rack.has_model_loudness(unknown)),
        (0.0, false)
    );
}
