use std::io::{self, Read};

mod disk;
pub use disk::*;
mod memory;
pub use memory::*;
mod tarball;

/// A tree of files addressed by canonical, repository-relative paths.
///
/// Module resolution probes several candidate paths for every `require`, so `is_file` is
/// expected to answer without touching the disk.
pub trait FileSystem {
  fn is_file(&self, path: &str) -> bool;

  /// Opens a file for reading. The returned reader is released when dropped.
  fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>>;

  /// Releases any storage backing this tree. The tree must not be used afterwards.
  fn close(&mut self) -> io::Result<()>;
}

pub(crate) fn not_found(path: &str) -> io::Error {
  io::Error::new(
    io::ErrorKind::NotFound,
    format!("Could not open path: {path}"),
  )
}
