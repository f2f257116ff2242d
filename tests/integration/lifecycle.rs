//! Instance lifecycle integration tests
//!
//! Handles are issued monotonically, never reused, and a dead handle behaves
//! exactly like one that never existed.

use crate::helpers::*;
use ampslot::prelude::*;

#[test]
fn test_handles_strictly_increase() {
    let rack = test_rack();
    let mut issued = Vec::new();
    for round in 0..20 {
        let id = rack.create_instance();
        issued.push(id);
        if round % 3 == 0 {
            rack.destroy_instance(id);
        }
    }
    assert!(issued.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_instance_count_tracks_live_handles() {
    let rack = test_rack();
    let a = rack.create_instance();
    let b = rack.create_instance();
    let c = rack.create_instance();
    assert_eq!(rack.instance_count(), 3);

    rack.destroy_instance(b);
    assert_eq!(rack.instance_count(), 2);

    // Destroying twice, or destroying a handle that never existed, changes nothing.
    rack.destroy_instance(b);
    rack.destroy_instance(InstanceId::from_raw(9999));
    assert_eq!(rack.instance_count(), 2);
    assert_eq!(rack.instance_ids(), vec![a, c]);
}

#[test]
fn test_destroyed_handle_is_never_reissued() {
    let rack = test_rack();
    let first = rack.create_instance();
    rack.destroy_instance(first);
    let second = rack.create_instance();
    assert_ne!(first, second);
    assert!(second > first);
}

#[test]
fn test_destroyed_handle_is_inert() {
    let rack = test_rack();
    let id = rack.create_instance();
    assert!(rack.load_model(id, &gain_model(3.0)));
    rack.destroy_instance(id);

    assert!(!rack.has_model(id));
    assert!(!rack.load_model(id, &gain_model(1.0)));
    assert_eq!(run(&rack, id, &BYPASS_INPUT), BYPASS_INPUT);
    assert_eq!(rack.model_loudness(id), 0.0);
    assert!(!rack.has_model_loudness(id));

    // Control operations on a dead handle are silent no-ops.
    rack.unload_model(id);
    rack.reset(id);
    assert_eq!(rack.instance_count(), 0);
    assert_eq!(rack.loaded_count(), 0);
}

#[test]
fn test_load_into_unknown_handle_reports_it() {
    let rack = test_rack();
    let err = rack
        .try_load_model(InstanceId::from_raw(9999), &gain_model(1.0))
        .unwrap_err();
    assert!(matches!(err, ampslot::rack::Error::UnknownInstance(id) if id.as_raw() == 9999));
}
