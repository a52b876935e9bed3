use std::path::Path;

use serde::Deserialize;

use crate::impl_serde_default;

fn entry_default() -> String {
  "index.js".to_string()
}

/// `test.config.json` of a fixture directory.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TestConfig {
  #[serde(default = "entry_default")]
  pub entry: String,

  #[serde(default)]
  pub environment: Option<String>,

  /// Set when the build is expected to fail instead of producing a snapshot.
  #[serde(default)]
  pub expected_error: Option<ExpectedError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpectedError {
  pub code: String,
  pub message: String,
}

impl TestConfig {
  pub fn from_config_path(filepath: &Path) -> Self {
    let raw = std::fs::read_to_string(filepath).unwrap_or_else(|_| "{}".to_string());
    serde_json::from_str(&raw)
      .unwrap_or_else(|e| panic!("invalid test config {}: {e}", filepath.display()))
  }
}

impl_serde_default!(TestConfig);
