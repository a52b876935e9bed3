mod bundler;
pub use {
  bundler::Bundler,
  cjspack_common::{CanonicalPath, ModuleId},
  cjspack_core::{
    default_warning_handler, render_preamble, BuildError, BuildResult, Graph, InputOptions,
    ModuleEntry, WarningHandler,
  },
  cjspack_fs::{DiskFileSystem, FileSystem, MemoryFileSystem},
};
