mod bundler;
pub use bundler::*;
mod graph;
pub use graph::*;
mod module_loader;
mod options;
pub use options::*;
mod runtime;
pub use runtime::render_preamble;
mod writer;
pub use writer::*;

// public exports

pub type BuildResult<T> = cjspack_error::Result<T>;
pub type BuildError = cjspack_error::Error;
