use std::io::{self, Read};

use cjspack_common::clean;
use rustc_hash::FxHashMap;

use crate::{not_found, tarball, FileSystem};

/// Keeps every file of the tree in memory.
///
/// Loading an archive this way holds the whole decompressed tree, so it suits trees of a
/// few hundred megabytes at most. See [`crate::DiskFileSystem`] for larger ones.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem {
  files: FxHashMap<String, Vec<u8>>,
}

impl MemoryFileSystem {
  pub fn new<P, C>(files: impl IntoIterator<Item = (P, C)>) -> Self
  where
    P: AsRef<str>,
    C: Into<Vec<u8>>,
  {
    Self {
      files: files
        .into_iter()
        .map(|(path, contents)| (clean(path.as_ref()), contents.into()))
        .collect(),
    }
  }

  /// Loads every regular file of a gzipped tarball.
  pub fn from_tarball<R: Read>(reader: R) -> io::Result<Self> {
    let mut files = FxHashMap::default();
    tarball::for_each_file(reader, |name, contents| {
      let mut buf = Vec::new();
      contents.read_to_end(&mut buf)?;
      files.insert(name, buf);
      Ok(())
    })?;
    tracing::debug!("loaded {} files into memory", files.len());
    Ok(Self { files })
  }

  pub fn insert(&mut self, path: &str, contents: impl Into<Vec<u8>>) {
    self.files.insert(clean(path), contents.into());
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }
}

impl FileSystem for MemoryFileSystem {
  fn is_file(&self, path: &str) -> bool {
    self.files.contains_key(path)
  }

  fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
    match self.files.get(path) {
      Some(contents) => Ok(Box::new(contents.as_slice())),
      None => Err(not_found(path)),
    }
  }

  fn close(&mut self) -> io::Result<()> {
    self.files = Default::default();
    Ok(())
  }
}
