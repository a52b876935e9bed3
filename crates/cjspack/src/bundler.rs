use std::io::Write;

use cjspack_core::{BuildError, BuildResult, BundlerCore, Graph};
use cjspack_fs::FileSystem;

use crate::InputOptions;

pub struct Bundler {
  core: BundlerCore,
}

impl Bundler {
  pub fn new(input_options: InputOptions) -> Self {
    Self {
      core: BundlerCore::new(input_options),
    }
  }

  /// Streams the bundle into `out`. Nothing written to `out` is usable if this fails.
  pub fn write<W: Write>(&self, fs: &dyn FileSystem, out: W) -> BuildResult<Graph> {
    self.core.build(fs, out)
  }

  pub fn generate(&self, fs: &dyn FileSystem) -> BuildResult<String> {
    let mut out = vec![];
    self.core.build(fs, &mut out)?;
    String::from_utf8(out).map_err(|err| BuildError::panic(err.to_string()))
  }
}
