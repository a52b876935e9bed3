use std::io::Read;

use cjspack_common::CanonicalPath;
use cjspack_fs::FileSystem;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Directories searched for bare specifiers such as `lodash` or `lib/util`.
///
/// Packaged trees have a single flat dependency namespace, so only the root is searched.
/// There is no walk up the ancestors looking for `node_modules`.
const MODULE_SEARCH_PATHS: &[&str] = &["."];

const FILE_EXTENSIONS: &[&str] = &[".js", ".json"];
const DIRECTORY_INDEXES: &[&str] = &["index.js", "index.json"];

#[derive(Deserialize)]
struct PackageJson {
  main: Option<String>,
}

/// Resolves `require(X)` the way node does, minus core modules and `.node` addons:
///
/// ```text
/// require(X) from module at path Y
/// 1. If X begins with './' or '/' or '../'
///    a. LOAD_AS_FILE(Y + X)
///    b. LOAD_AS_DIRECTORY(Y + X)
/// 2. LOAD_NODE_MODULES(X)
/// 3. THROW "not found"
/// ```
///
/// Successful lookups are memoized for the lifetime of the resolver. A bare specifier is
/// cached under its raw spelling and answers for every caller. A path specifier is not:
/// it is cached under the cleaned joined path, because its raw spelling means different
/// files from different directories (`./a.js` from `x` and from `y`).
pub struct Resolver<'fs> {
  fs: &'fs dyn FileSystem,
  cache: FxHashMap<String, CanonicalPath>,
}

impl<'fs> Resolver<'fs> {
  pub fn new(fs: &'fs dyn FileSystem) -> Self {
    Self {
      fs,
      cache: Default::default(),
    }
  }

  pub fn resolve(
    &mut self,
    specifier: &str,
    context: &CanonicalPath,
  ) -> cjspack_error::Result<CanonicalPath> {
    if is_path_specifier(specifier) {
      let joined = context.join(specifier);
      if let Some(resolved) = self.cache.get(joined.as_str()) {
        return Ok(resolved.clone());
      }

      let resolved = self
        .load_as_file(&joined)
        .or_else(|| self.load_as_directory(&joined))
        .ok_or_else(|| cjspack_error::Error::unresolved_import(specifier, context))?;
      tracing::trace!("resolved {} from {} to {}", specifier, context, resolved);
      self
        .cache
        .insert(joined.as_str().to_string(), resolved.clone());
      return Ok(resolved);
    }

    if let Some(resolved) = self.cache.get(specifier) {
      return Ok(resolved.clone());
    }

    let resolved = self
      .load_node_modules(specifier)
      .ok_or_else(|| cjspack_error::Error::unresolved_import(specifier, context))?;
    tracing::trace!("resolved module {} to {}", specifier, resolved);
    self.cache.insert(specifier.to_string(), resolved.clone());
    Ok(resolved)
  }

  /// ```text
  /// LOAD_AS_FILE(X)
  /// 1. If X is a file, STOP
  /// 2. If X.js is a file, STOP
  /// 3. If X.json is a file, STOP
  /// ```
  fn load_as_file(&self, path: &CanonicalPath) -> Option<CanonicalPath> {
    if self.probe(path.as_str()) {
      return Some(path.clone());
    }
    FILE_EXTENSIONS
      .iter()
      .map(|ext| format!("{path}{ext}"))
      .find(|candidate| self.probe(candidate))
      .map(CanonicalPath::new)
  }

  /// ```text
  /// LOAD_AS_DIRECTORY(X)
  /// 1. If X/package.json is a file,
  ///    a. Parse X/package.json, and look for a "main" field
  ///    b. LOAD_AS_FILE(X + main)
  /// 2. If X/index.js is a file, STOP
  /// 3. If X/index.json is a file, STOP
  /// ```
  ///
  /// A `package.json` that can't be read, can't be parsed, lacks `main`, or whose `main`
  /// doesn't resolve is skipped in favour of the index files.
  fn load_as_directory(&self, path: &CanonicalPath) -> Option<CanonicalPath> {
    let package_json = path.join("package.json");
    if self.probe(package_json.as_str()) {
      match self.read_main(&package_json) {
        Ok(main) => {
          if let Some(resolved) = self.load_as_file(&path.join(&main)) {
            return Some(resolved);
          }
          tracing::debug!(
            "\"main\" of {} points to missing file {}",
            package_json,
            main
          );
        }
        Err(err) => tracing::debug!("{}", err),
      }
    }

    DIRECTORY_INDEXES
      .iter()
      .map(|index| path.join(index))
      .find(|candidate| self.probe(candidate.as_str()))
  }

  fn load_node_modules(&self, specifier: &str) -> Option<CanonicalPath> {
    MODULE_SEARCH_PATHS.iter().find_map(|dir| {
      let path = CanonicalPath::new(dir).join(specifier);
      self
        .load_as_file(&path)
        .or_else(|| self.load_as_directory(&path))
    })
  }

  fn read_main(&self, package_json: &CanonicalPath) -> cjspack_error::Result<String> {
    let malformed =
      |reason: String| cjspack_error::Error::malformed_package_json(package_json.clone(), reason);
    let mut raw = String::new();
    self
      .fs
      .open(package_json.as_str())
      .and_then(|mut reader| reader.read_to_string(&mut raw))
      .map_err(|e| malformed(e.to_string()))?;
    let parsed: PackageJson = serde_json::from_str(&raw).map_err(|e| malformed(e.to_string()))?;
    parsed
      .main
      .ok_or_else(|| malformed("no \"main\" field".to_string()))
  }

  fn probe(&self, path: &str) -> bool {
    let exists = self.fs.is_file(path);
    tracing::trace!("probe {} -> {}", path, exists);
    exists
  }
}

fn is_path_specifier(specifier: &str) -> bool {
  specifier.starts_with("./") || specifier.starts_with("../") || specifier.starts_with('/')
}
