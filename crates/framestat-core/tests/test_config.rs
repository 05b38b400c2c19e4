use std::path::PathBuf;

use framestat_core::batch::BatchOptions;
use framestat_core::config::AnalysisConfig;
use framestat_core::error::FramestatError;
use framestat_core::grid::ColorMode;
use framestat_core::roi::Roi;

#[test]
fn test_default_config_roundtrip() {
    let config = AnalysisConfig::default();
    let text = config.to_toml_string().unwrap();
    let back = AnalysisConfig::from_toml_str(&text).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_minimal_config_uses_defaults() {
    let config = AnalysisConfig::from_toml_str(r#"folder = "frames""#).unwrap();
    assert_eq!(config.folder, PathBuf::from("frames"));
    assert_eq!(config.color_mode, ColorMode::Grayscale);
    assert!(config.roi.is_none());
    assert!(config.filter.enabled);
    assert_eq!(config.filter.stopband2, 2500.0);
    assert_eq!(config.filter.order, 3);
    assert_eq!(config.sampling.sample_count, 10);
    assert_eq!(config.sampling.block_size, 4);
}

#[test]
fn test_full_config() {
    let text = r#"
        folder = "/data/run1"
        color_mode = "Native"
        sort_by_name = true

        [roi]
        min_x = 10
        min_y = 5
        max_x = 50
        max_y = 10

        [filter]
        enabled = false
        stopband2 = 900.0
        order = 2

        [sampling]
        column_x = 3
        row_y = 7
        sample_count = 5
        block_size = 2
    "#;
    let config = AnalysisConfig::from_toml_str(text).unwrap();
    assert_eq!(config.color_mode, ColorMode::Native);
    assert_eq!(config.roi, Some(Roi::new(10, 5, 50, 10).unwrap()));
    assert_eq!(config.sampling.row_y, 7);

    let options = BatchOptions::from_config(&config).unwrap();
    assert!(options.filter.is_none());
    assert!(options.sort_by_name);
    assert_eq!(options.roi, config.roi);
}

#[test]
fn test_inverted_roi_rejected() {
    let text = r#"
        folder = "."
        [roi]
        min_x = 50
        min_y = 0
        max_x = 10
        max_y = 10
    "#;
    assert!(matches!(
        AnalysisConfig::from_toml_str(text),
        Err(FramestatError::InvalidRoi(_))
    ));
}

#[test]
fn test_bad_filter_and_sampling_rejected() {
    let zero_order = r#"
        folder = "."
        [filter]
        enabled = true
        stopband2 = 2500.0
        order = 0
    "#;
    assert!(matches!(
        AnalysisConfig::from_toml_str(zero_order),
        Err(FramestatError::InvalidFilter(_))
    ));

    let zero_samples = r#"
        folder = "."
        [sampling]
        column_x = 0
        row_y = 0
        sample_count = 0
        block_size = 4
    "#;
    assert!(matches!(
        AnalysisConfig::from_toml_str(zero_samples),
        Err(FramestatError::InvalidSampling(_))
    ));
}

#[test]
fn test_malformed_toml_is_config_error() {
    assert!(matches!(
        AnalysisConfig::from_toml_str("folder = "),
        Err(FramestatError::Config(_))
    ));
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis.toml");
    let config = AnalysisConfig {
        roi: Some(Roi::new(1, 2, 3, 4).unwrap()),
        ..AnalysisConfig::default()
    };
    std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

    assert_eq!(AnalysisConfig::from_toml_file(&path).unwrap(), config);
}

#[test]
fn test_roi_serializes_as_json_object() {
    let roi = Roi::new(1, 2, 3, 4).unwrap();
    let json = serde_json::to_value(roi).unwrap();
    assert_eq!(json["min_x"], 1);
    assert_eq!(json["max_y"], 4);
}
