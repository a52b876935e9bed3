use std::{
  fs::File,
  io::{self, Read},
  path::{Path, PathBuf},
};

use cjspack_common::clean;
use rustc_hash::FxHashSet;
use sugar_path::{AsPath, SugarPath, SugarPathBuf};
use tempfile::TempDir;

use crate::{not_found, tarball, FileSystem};

/// Serves files from a directory on disk.
///
/// The set of file names is collected up front, so `is_file` never hits the disk.
/// Paths are not sandboxed beyond that set: only names known to the tree can be opened.
#[derive(Debug)]
pub struct DiskFileSystem {
  root: PathBuf,
  files: FxHashSet<String>,
  // Present when the tree was extracted by us and has to be removed on close.
  extracted_to: Option<TempDir>,
}

impl DiskFileSystem {
  /// Extracts a gzipped tarball into a fresh temporary directory.
  ///
  /// The directory is removed by [`FileSystem::close`], or when this value is dropped.
  pub fn from_tarball<R: Read>(reader: R) -> io::Result<Self> {
    let temp_dir = tempfile::Builder::new().prefix("cjspack").tempdir()?;
    let root = temp_dir.path().to_path_buf();
    let mut files = FxHashSet::default();
    tarball::for_each_file(reader, |name, contents| {
      let dest = root.join(name.as_path());
      if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
      }
      io::copy(contents, &mut File::create(&dest)?)?;
      files.insert(name);
      Ok(())
    })?;
    tracing::debug!("extracted {} files to {}", files.len(), root.display());
    Ok(Self {
      root,
      files,
      extracted_to: Some(temp_dir),
    })
  }

  /// Serves an existing directory. Closing it leaves the directory untouched.
  pub fn from_dir(root: impl AsRef<Path>) -> io::Result<Self> {
    let root = root.as_ref().to_path_buf().into_absolutize();
    let mut files = FxHashSet::default();
    for entry in walkdir::WalkDir::new(&root) {
      let entry = entry?;
      if !entry.file_type().is_file() {
        continue;
      }
      let relative = entry.path().relative(&root);
      let name = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
      files.insert(clean(&name));
    }
    Ok(Self {
      root,
      files,
      extracted_to: None,
    })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }
}

impl FileSystem for DiskFileSystem {
  fn is_file(&self, path: &str) -> bool {
    self.files.contains(path)
  }

  fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
    if !self.is_file(path) {
      return Err(not_found(path));
    }
    Ok(Box::new(File::open(self.root.join(path.as_path()))?))
  }

  fn close(&mut self) -> io::Result<()> {
    self.files.clear();
    match self.extracted_to.take() {
      Some(temp_dir) => temp_dir.close(),
      None => Ok(()),
    }
  }
}
