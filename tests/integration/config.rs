//! Global audio config and configuration file integration tests

use crate::helpers::*;
use ampslot::prelude::*;
use std::io::Write;

#[test]
fn test_config_propagates_to_loaded_engines() {
    let (factory, log) = probe_factory();
    let rack = ampslot::builder().factory(factory).build().unwrap();

    let loaded = rack.create_instance();
    let _empty = rack.create_instance();
    assert!(rack.load_model(loaded, "probe"));
    assert_eq!(*log.lock().unwrap(), vec![(48000.0, 128)]);
    log.lock().unwrap().clear();

    rack.set_sample_rate(44100.0);
    rack.set_max_buffer_size(256);
    assert_eq!(
        *log.lock().unwrap(),
        vec![(44100.0, 128), (44100.0, 256)]
    );
    assert_eq!(rack.audio_config(), AudioConfig::new(44100.0, 256));
}

#[test]
fn test_late_load_is_built_for_current_config() {
    let (factory, log) = probe_factory();
    let rack = ampslot::builder().factory(factory).build().unwrap();
    rack.set_sample_rate(44100.0);
    rack.set_max_buffer_size(256);

    let id = rack.create_instance();
    assert!(rack.load_model(id, "probe"));
    assert_eq!(*log.lock().unwrap(), vec![(44100.0, 256)]);
}

#[test]
fn test_failed_load_leaves_no_trace() {
    let (factory, log) = probe_factory();
    let rack = ampslot::builder().factory(factory).build().unwrap();
    let id = rack.create_instance();
    assert!(!rack.load_model(id, "bad"));
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(rack.loaded_count(), 0);
}

#[test]
fn test_setters_store_values_verbatim() {
    let rack = test_rack();
    rack.set_sample_rate(96000.0);
    rack.set_max_buffer_size(1);
    assert_eq!(rack.sample_rate(), 96000.0);
    assert_eq!(rack.max_buffer_size(), 1);
}

#[test]
fn test_builder_defaults() {
    let rack = ampslot::builder().build().unwrap();
    assert_eq!(rack.sample_rate(), ampslot::DEFAULT_SAMPLE_RATE);
    assert_eq!(rack.max_buffer_size(), ampslot::DEFAULT_MAX_BUFFER_SIZE);
    assert_eq!(rack.activation_policy(), ActivationPolicy::OnFirstLoad);
}

#[test]
fn test_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "activation = \"disabled\"\n\n[audio]\nsample_rate = 44100.0\nmax_buffer_size = 64"
    )
    .unwrap();

    let rack = ampslot::builder().config_file(file.path()).build().unwrap();
    assert_eq!(rack.audio_config(), AudioConfig::new(44100.0, 64));
    assert_eq!(rack.activation_policy(), ActivationPolicy::Disabled);
}

#[test]
fn test_setters_override_config_file_in_any_order() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[audio]\nsample_rate = 44100.0\nmax_buffer_size = 64").unwrap();

    let builder = ampslot::builder()
        .sample_rate(96000.0)
        .config_file(file.path());
    let config = builder.resolve_config().unwrap();
    assert_eq!(config.audio, AudioConfig::new(96000.0, 64));

    let rack = builder.build().unwrap();
    assert_eq!(rack.sample_rate(), 96000.0);
}

#[test]
fn test_config_file_errors() {
    let missing = ampslot::builder()
        .config_file("/definitely/not/here/ampslot.toml")
        .build()
        .unwrap_err();
    assert!(matches!(
        missing,
        ampslot::Error::Core(ampslot::core::Error::Io(_))
    ));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[audio\nsample_rate = ").unwrap();
    let malformed = ampslot::builder()
        .config_file(file.path())
        .build()
        .unwrap_err();
    assert!(matches!(
        malformed,
        ampslot::Error::Core(ampslot::core::Error::ConfigParse(_))
    ));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[audio]\nmax_buffer_size = 0").unwrap();
    let invalid = ampslot::builder()
        .config_file(file.path())
        .build()
        .unwrap_err();
    assert!(matches!(
        invalid,
        ampslot::Error::Core(ampslot::core::Error::InvalidConfig(_))
    ));
}

#[test]
fn test_invalid_override_is_rejected_at_build() {
    let err = ampslot::builder().sample_rate(0.0).build().unwrap_err();
    assert!(matches!(err, ampslot::Error::Rack(_)));
}
