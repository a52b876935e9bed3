use cjspack_common::{CanonicalPath, ModuleId};
use hashlink::LinkedHashMap;
use rustc_hash::FxHashMap;

/// A module that has been read, scanned and written.
#[derive(Debug)]
pub struct ModuleEntry {
  pub(crate) id: ModuleId,
  /// Keyed by the specifier as spelled in the source, in order of first appearance.
  pub(crate) dependencies: LinkedHashMap<String, CanonicalPath>,
}

impl ModuleEntry {
  pub fn id(&self) -> ModuleId {
    self.id
  }

  pub fn dependencies(&self) -> &LinkedHashMap<String, CanonicalPath> {
    &self.dependencies
  }
}

/// Every module of a bundle, keyed by canonical path.
///
/// A path gets its id when loading of the module starts; the [`ModuleEntry`] only shows
/// up once the module and all of its dependencies are written.
#[derive(Debug, Default)]
pub struct Graph {
  pub(crate) id_by_path: FxHashMap<CanonicalPath, ModuleId>,
  pub(crate) module_by_path: FxHashMap<CanonicalPath, ModuleEntry>,
}

impl Graph {
  pub fn id_of(&self, path: &CanonicalPath) -> Option<ModuleId> {
    self.id_by_path.get(path).copied()
  }

  pub fn get(&self, path: &CanonicalPath) -> Option<&ModuleEntry> {
    self.module_by_path.get(path)
  }

  pub fn modules(&self) -> impl Iterator<Item = (&CanonicalPath, &ModuleEntry)> {
    self.module_by_path.iter()
  }

  pub fn len(&self) -> usize {
    self.module_by_path.len()
  }

  pub fn is_empty(&self) -> bool {
    self.module_by_path.is_empty()
  }

  /// Whether `path` has an id but is still being loaded.
  pub(crate) fn is_loading(&self, path: &CanonicalPath) -> bool {
    self.id_by_path.contains_key(path) && !self.module_by_path.contains_key(path)
  }

  pub(crate) fn reserve(&mut self, path: CanonicalPath, id: ModuleId) {
    let prev = self.id_by_path.insert(path, id);
    debug_assert!(prev.is_none());
  }

  pub(crate) fn add_module(&mut self, path: CanonicalPath, module: ModuleEntry) {
    debug_assert_eq!(self.id_of(&path), Some(module.id));
    self.module_by_path.insert(path, module);
  }

  /// Projects the dependencies of `module` down to module ids.
  pub fn imports_of<'a>(
    &'a self,
    module: &'a ModuleEntry,
  ) -> impl Iterator<Item = (&'a str, ModuleId)> + 'a {
    module.dependencies.iter().map(|(specifier, path)| {
      let id = self
        .id_of(path)
        .unwrap_or_else(|| unreachable!("dependency {} should have an id", path));
      (specifier.as_str(), id)
    })
  }
}
