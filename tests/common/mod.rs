//! Common test utilities and helpers

use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;
use wfcos_config::{ConfigLoader, ValidatedConfig};
use wfcos_core::Result;

/// The reference COCO ResNet-101 document shipped with the repository.
pub const REFERENCE_DOCUMENT: &str = include_str!("../../configs/coco_wfcos_r101.json");

/// Parse the reference document into a mutable tree for test mutations.
pub fn reference_value() -> Value {
    serde_json::from_str(REFERENCE_DOCUMENT).unwrap()
}

/// Load a (possibly mutated) document tree through the public loader.
pub fn load_value(document: &Value) -> Result<ValidatedConfig> {
    ConfigLoader::load(&document.to_string())
}

/// Test environment: a configuration document written to a temp directory.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestEnv {
    /// Write the given document under a fresh temp directory.
    pub fn with_document(document: &Value) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("run.json");
        std::fs::write(&config_path, document.to_string()).unwrap();
        Self { temp_dir, config_path }
    }

    /// Load the written document from disk.
    pub fn load(&self) -> Result<ValidatedConfig> {
        ConfigLoader::load_from_file(&self.config_path)
    }
}
