use std::io::Write;

use cjspack_fs::FileSystem;
use tracing::instrument;

use crate::{module_loader::ModuleLoader, BuildResult, BundleWriter, Graph, InputOptions};

pub struct BundlerCore {
  input_options: InputOptions,
}

impl BundlerCore {
  pub fn new(input_options: InputOptions) -> Self {
    Self { input_options }
  }

  pub fn input_options(&self) -> &InputOptions {
    &self.input_options
  }

  /// Bundles the module graph rooted at the entry into `out`.
  ///
  /// Modules are streamed out as they finish loading. On failure, whatever was written to
  /// `out` so far is not a valid bundle.
  #[instrument(skip_all)]
  pub fn build<W: Write>(&self, fs: &dyn FileSystem, out: W) -> BuildResult<Graph> {
    tracing::debug!("{:#?}", self.input_options);
    let mut writer = BundleWriter::new(out);
    writer.open(self.input_options.environment.as_deref())?;
    let graph = ModuleLoader::new(&self.input_options, fs, &mut writer).fetch_all_modules()?;
    writer.close()?;
    tracing::debug!("wrote {} modules", writer.modules_written());
    Ok(graph)
  }
}
