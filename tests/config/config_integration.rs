//! End-to-end tests for loading and validating configuration documents

use crate::common::{load_value, reference_value, TestEnv};
use wfcos_core::{ConfigError, LogLevelKind, ModelKind, OptimizerKind};

#[test]
fn test_reference_document_loads() {
    let config = load_value(&reference_value()).unwrap();

    assert_eq!(config.model().model_type, ModelKind::Wfcos);
    assert_eq!(config.model().backbone.depth, 101);
    assert_eq!(config.model().head.num_classes, 81);
    assert_eq!(config.data().train.ann_file, "annotations/instances_train2017.json");
    assert_eq!(config.optimizer().lr, 0.01);
    assert_eq!(config.run().total_epochs, 1);
}

#[test]
fn test_reference_document_details() {
    let config = load_value(&reference_value()).unwrap();

    assert_eq!(config.optimizer().kind, OptimizerKind::Sgd);
    assert_eq!(config.optimizer().momentum, Some(0.9));
    let paramwise = config.optimizer().paramwise_options.as_ref().unwrap();
    assert_eq!(paramwise.bias_lr_mult, 2.0);
    assert_eq!(paramwise.bias_decay_mult, 0.0);

    // "1.0 / 3.0" in the document, evaluated at load time.
    assert!((config.lr_schedule().warmup_ratio - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(config.lr_schedule().warmup_iters, 500);

    assert_eq!(config.run().log_level, LogLevelKind::Info);
    assert!(!config.run().resume);
    assert_eq!(config.run().num_gpus, 1);
}

#[test]
fn test_round_trip_through_serialization() {
    let first = load_value(&reference_value()).unwrap();
    let second = wfcos_config::ConfigLoader::load(&first.to_json_string()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_nested_field() {
    let mut document = reference_value();
    document["loss"]["energy"].as_object_mut().unwrap().remove("loss_weight");

    let err = load_value(&document).unwrap_err();
    match err {
        ConfigError::MissingField { path } => assert_eq!(path, "loss.energy.loss_weight"),
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn test_unknown_top_level_key_rejected() {
    let mut document = reference_value();
    document.as_object_mut().unwrap().insert("foo".into(), 1.into());

    let err = load_value(&document).unwrap_err();
    match err {
        ConfigError::UnknownField { path } => assert_eq!(path, "foo"),
        other => panic!("expected UnknownField, got {other:?}"),
    }
}

#[test]
fn test_head_neck_channel_mismatch_cites_invariant_2() {
    let mut document = reference_value();
    document["head"]["in_channels"] = 512.into();

    let err = load_value(&document).unwrap_err();
    match err {
        ConfigError::InvariantViolation { invariant, .. } => assert_eq!(invariant, 2),
        other => panic!("expected InvariantViolation, got {other:?}"),
    }
}

#[test]
fn test_step_milestones_cite_invariant_3() {
    // Not strictly increasing.
    let mut document = reference_value();
    document["lr_config"]["step"] = serde_json::json!([1, 1]);
    let err = load_value(&document).unwrap_err();
    match err {
        ConfigError::InvariantViolation { invariant, .. } => assert_eq!(invariant, 3),
        other => panic!("expected InvariantViolation, got {other:?}"),
    }

    // Beyond total_epochs.
    let mut document = reference_value();
    document["lr_config"]["step"] = serde_json::json!([2]);
    let err = load_value(&document).unwrap_err();
    match err {
        ConfigError::InvariantViolation { invariant, .. } => assert_eq!(invariant, 3),
        other => panic!("expected InvariantViolation, got {other:?}"),
    }
}

#[test]
fn test_warmup_ratio_expression_forms() {
    let mut document = reference_value();
    document["lr_config"]["warmup_ratio"] = "0.5 * 0.5".into();
    let config = load_value(&document).unwrap();
    assert_eq!(config.lr_schedule().warmup_ratio, 0.25);

    let mut document = reference_value();
    document["lr_config"]["warmup_ratio"] = serde_json::json!(0.1);
    let config = load_value(&document).unwrap();
    assert_eq!(config.lr_schedule().warmup_ratio, 0.1);

    let mut document = reference_value();
    document["lr_config"]["warmup_ratio"] = "import os".into();
    let err = load_value(&document).unwrap_err();
    assert!(matches!(err, ConfigError::Expression { .. }));
}

#[test]
fn test_load_from_file() {
    let env = TestEnv::with_document(&reference_value());
    let config = env.load().unwrap();

    assert_eq!(config.model().backbone.depth, 101);
    assert_eq!(config.data().data_root, "data/coco");
}

#[test]
fn test_malformed_document_from_file() {
    let env = TestEnv::with_document(&reference_value());
    std::fs::write(&env.config_path, "{ not json").unwrap();

    let err = env.load().unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { .. }));
}
