use std::{
  cell::RefCell,
  io::{self, Read},
  path::Path,
};

use cjspack_fs::{FileSystem, MemoryFileSystem};

/// In-memory tree that records every probe and every open, in call order.
#[derive(Debug, Default)]
pub struct RecordingFileSystem {
  inner: MemoryFileSystem,
  checked: RefCell<Vec<String>>,
  opened: RefCell<Vec<String>>,
}

impl RecordingFileSystem {
  pub fn new<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
    Self {
      inner: MemoryFileSystem::new(files),
      ..Default::default()
    }
  }

  /// Loads every file below `dir`, keyed by its path relative to `dir`.
  pub fn from_dir(dir: &Path) -> Self {
    let mut inner = MemoryFileSystem::default();
    for entry in walkdir::WalkDir::new(dir) {
      let entry = entry.unwrap();
      if !entry.file_type().is_file() {
        continue;
      }
      let relative = entry.path().strip_prefix(dir).unwrap();
      let name = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
      inner.insert(&name, std::fs::read(entry.path()).unwrap());
    }
    Self {
      inner,
      ..Default::default()
    }
  }

  pub fn checked(&self) -> Vec<String> {
    self.checked.borrow().clone()
  }

  pub fn opened(&self) -> Vec<String> {
    self.opened.borrow().clone()
  }
}

impl FileSystem for RecordingFileSystem {
  fn is_file(&self, path: &str) -> bool {
    self.checked.borrow_mut().push(path.to_string());
    self.inner.is_file(path)
  }

  fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
    self.opened.borrow_mut().push(path.to_string());
    self.inner.open(path)
  }

  fn close(&mut self) -> io::Result<()> {
    self.inner.close()
  }
}
