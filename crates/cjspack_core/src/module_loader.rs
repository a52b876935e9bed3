use std::io::{Read, Write};

use cjspack_common::{CanonicalPath, ModuleId};
use cjspack_compiler::Compiler;
use cjspack_fs::FileSystem;
use cjspack_resolver::Resolver;
use cjspack_swc_visitors::scan_requires;
use hashlink::LinkedHashMap;

use crate::{BuildError, BuildResult, BundleWriter, Graph, InputOptions, ModuleEntry};

/// Walks the `require` graph depth-first from the entry, writing each module as soon as all
/// of its dependencies are written.
pub(crate) struct ModuleLoader<'a, W: Write> {
  input_options: &'a InputOptions,
  fs: &'a dyn FileSystem,
  resolver: Resolver<'a>,
  compiler: Compiler,
  writer: &'a mut BundleWriter<W>,
  graph: Graph,
  next_id: usize,
}

struct LoadedSource {
  code: String,
  requires: Vec<String>,
}

impl<'a, W: Write> ModuleLoader<'a, W> {
  pub(crate) fn new(
    input_options: &'a InputOptions,
    fs: &'a dyn FileSystem,
    writer: &'a mut BundleWriter<W>,
  ) -> Self {
    Self {
      input_options,
      fs,
      resolver: Resolver::new(fs),
      compiler: Compiler::default(),
      writer,
      graph: Graph::default(),
      next_id: 0,
    }
  }

  pub(crate) fn fetch_all_modules(mut self) -> BuildResult<Graph> {
    let entry = self.input_options.entry.as_str();
    self.add(entry, &CanonicalPath::root())?;
    Ok(self.graph)
  }

  /// Loads the module `specifier` refers to from `context` unless it is already known.
  ///
  /// An id is taken before resolving; it is thrown away when the module turns out to be
  /// known already, so ids may have gaps.
  fn add(&mut self, specifier: &str, context: &CanonicalPath) -> BuildResult<CanonicalPath> {
    let id = ModuleId::new(self.next_id);
    self.next_id += 1;

    let path = self.resolver.resolve(specifier, context)?;
    if self.graph.id_of(&path).is_some() {
      if self.graph.is_loading(&path) {
        tracing::debug!("cyclic require of {} from {}", path, context);
      }
      return Ok(path);
    }
    tracing::trace!("loading {} as module {}", path, id);
    self.graph.reserve(path.clone(), id);

    let LoadedSource { code, requires } = self.load(&path)?;
    let dir = path.parent();
    let mut dependencies = LinkedHashMap::default();
    for specifier in requires {
      let dependency = self
        .add(&specifier, &dir)
        .map_err(|err| err.context(format!("required by {path}")))?;
      dependencies.insert(specifier, dependency);
    }

    self
      .graph
      .add_module(path.clone(), ModuleEntry { id, dependencies });
    let module = &self.graph.module_by_path[&path];
    self
      .writer
      .write(&code, id, self.graph.imports_of(module))?;
    Ok(path)
  }

  fn load(&self, path: &CanonicalPath) -> BuildResult<LoadedSource> {
    let mut code = String::new();
    self
      .fs
      .open(path.as_str())
      .and_then(|mut reader| reader.read_to_string(&mut code))
      .map_err(|err| BuildError::io_error(err).context(format!("Read {path}")))?;

    if path.extension() == Some("json") {
      serde_json::from_str::<serde_json::Value>(&code)
        .map_err(|err| BuildError::parse_json_failed(path.clone(), err))?;
      return Ok(LoadedSource {
        code: format!("module.exports = {};", code.trim()),
        requires: vec![],
      });
    }

    let source_file = self.compiler.create_source_file(path, code.clone());
    let script = self.compiler.parse(&source_file).map_err(|err| {
      let line = self.compiler.line_of_error(&err);
      BuildError::parse_js_failed(path.clone(), line, err)
    })?;
    let scanned = scan_requires(&script);
    for ambiguous in scanned.ambiguous {
      let line = self.compiler.line_of(ambiguous.span);
      (self.input_options.on_warn)(BuildError::ambiguous_require(
        path.clone(),
        line,
        ambiguous.kind.to_string(),
      ));
    }

    Ok(LoadedSource {
      code,
      requires: scanned.requires.into_iter().collect(),
    })
  }
}
