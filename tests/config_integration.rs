//! Configuration file integration tests

use tempfile::TempDir;
use tickgraph::pipeline::nodes::IterSource;
use tickgraph::{Pipeline, PipelineConfig};

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("pipeline.toml");

    let config = PipelineConfig {
        graph_name: "ingest".to_string(),
        tick_limit: Some(250),
        log_filter: "debug".to_string(),
    };
    config.save(&path).unwrap();

    let loaded = PipelineConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = PipelineConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
    assert_eq!(PipelineConfig::load_or_default(&path), PipelineConfig::default());
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "tick_limit = \"soon\"").unwrap();

    assert!(PipelineConfig::load(&path).is_err());
    assert_eq!(PipelineConfig::load_or_default(&path), PipelineConfig::default());
}

#[test]
fn test_loaded_config_drives_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pipeline.toml");
    std::fs::write(&path, "graph_name = \"limited\"\ntick_limit = 3\n").unwrap();

    let mut pipeline = Pipeline::with_config(PipelineConfig::load(&path).unwrap());
    pipeline.create_node(IterSource::new(0..100));

    assert!(!pipeline.drive());
    assert_eq!(pipeline.ticks(), 3);
    assert!(pipeline.to_string().starts_with("digraph limited {"));
}
