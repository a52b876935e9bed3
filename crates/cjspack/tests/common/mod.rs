use std::{
  path::Path,
  sync::{Arc, Mutex},
};

use cjspack::{render_preamble, BuildError, BuildResult, Bundler, InputOptions};
use cjspack_test_utils::{RecordingFileSystem, TestConfig};

pub struct CompiledFixture {
  pub config: TestConfig,
  pub output: BuildResult<String>,
  pub warnings: Arc<Mutex<Vec<String>>>,
}

impl CompiledFixture {
  pub fn output_friendly_to_snapshot(&self) -> String {
    let output = self.output.as_ref().unwrap();
    let preamble = render_preamble(self.config.environment.as_deref());
    let body = output
      .strip_prefix(&preamble)
      .unwrap_or_else(|| panic!("bundle should start with the preamble:\n{output}"));

    let warnings = self.warnings.lock().unwrap();
    let mut sections = vec![body.trim().to_string()];
    if !warnings.is_empty() {
      sections.push("---------- WARNINGS ----------".to_string());
      sections.extend(warnings.iter().cloned());
    }
    sections.join("\n")
  }
}

pub fn compile_fixture(test_config_path: &Path) -> CompiledFixture {
  let fixture_path = test_config_path.parent().unwrap();
  let config = TestConfig::from_config_path(test_config_path);
  let fs = RecordingFileSystem::from_dir(fixture_path);

  let warnings = Arc::new(Mutex::new(vec![]));
  let collected = warnings.clone();
  let bundler = Bundler::new(InputOptions {
    entry: config.entry.clone(),
    environment: config.environment.clone(),
    on_warn: Arc::new(move |err: BuildError| {
      let warning = format!("{}: {}", err.kind.code(), err.kind);
      collected.lock().unwrap().push(warning);
    }),
  });
  let output = bundler.generate(&fs);

  CompiledFixture {
    config,
    output,
    warnings,
  }
}

pub fn run_test(test_config_path: &Path) {
  let compiled_fx = compile_fixture(test_config_path);

  if let Some(expected_error) = &compiled_fx.config.expected_error {
    let error = compiled_fx
      .output
      .as_ref()
      .expect_err("Expected error but got success");
    assert_eq!(error.kind.code(), expected_error.code);
    assert_eq!(error.kind.to_string(), expected_error.message);
    return;
  }

  // Configure insta to store the snapshot next to the test config
  let fixture_folder = test_config_path.parent().unwrap();
  let mut settings = insta::Settings::clone_current();
  settings.set_snapshot_path(fixture_folder);
  settings.set_prepend_module_to_snapshot(false);
  settings.set_input_file(test_config_path);
  settings.bind(|| {
    insta::assert_snapshot!("output", compiled_fx.output_friendly_to_snapshot());
  });
}
