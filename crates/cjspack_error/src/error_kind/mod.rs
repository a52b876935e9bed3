use std::fmt::Display;

use cjspack_common::{CanonicalPath, StaticStr};

pub mod error_code;

#[derive(Debug)]
pub enum ErrorKind {
  // --- Resolution
  UnresolvedImport {
    specifier: String,
    context: CanonicalPath,
  },
  /// Never fatal. Resolution falls through to `index.js`/`index.json`.
  MalformedPackageJson {
    path: CanonicalPath,
    reason: StaticStr,
  },

  // --- Parsing
  ParseJsFailed {
    path: CanonicalPath,
    line: usize,
    source: swc_core::ecma::parser::error::Error,
  },
  ParseJsonFailed {
    path: CanonicalPath,
    source: serde_json::Error,
  },
  /// A `require` call that can't be turned into a dependency edge. Reported as a warning.
  AmbiguousRequire {
    module: CanonicalPath,
    line: usize,
    reason: StaticStr,
  },

  // --- Output
  WriterState {
    expected: &'static str,
    actual: &'static str,
  },

  /// This error means that cjspack gives up because an unrecoverable error happens.
  ///
  /// We also use this to replace `panic!()` in the code for graceful shutdown.
  Panic {
    source: anyhow::Error,
  },

  IoError(std::io::Error),
}

impl Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ErrorKind::UnresolvedImport { specifier, context } => write!(f, "Could not resolve '{specifier}' from '{context}'"),
      ErrorKind::MalformedPackageJson { path, reason } => write!(f, "Ignoring \"{path}\": {reason}"),
      ErrorKind::ParseJsFailed { path, line, source } => write!(f, "Parse failed: {path}:{line}: {}", source.kind().msg()),
      ErrorKind::ParseJsonFailed { path, source } => write!(f, "Parse failed: {path}: {source}"),
      ErrorKind::AmbiguousRequire { module, line, reason } => write!(f, "{module}:{line}: {reason}, the call is not treated as a dependency"),
      ErrorKind::WriterState { expected, actual } => write!(f, "Bundle writer is {actual}, expected it to be {expected}"),
      ErrorKind::Panic { source } => source.fmt(f),
      ErrorKind::IoError(e) => e.fmt(f),
    }
  }
}

impl ErrorKind {
  pub fn code(&self) -> &'static str {
    match self {
      ErrorKind::UnresolvedImport { .. } => error_code::UNRESOLVED_IMPORT,
      ErrorKind::MalformedPackageJson { .. } => error_code::MALFORMED_PACKAGE_JSON,
      ErrorKind::ParseJsFailed { .. } => error_code::PARSE_ERROR,
      ErrorKind::ParseJsonFailed { .. } => error_code::PARSE_ERROR,
      ErrorKind::AmbiguousRequire { .. } => error_code::AMBIGUOUS_REQUIRE,
      ErrorKind::WriterState { .. } => error_code::WRITER_STATE,
      ErrorKind::Panic { .. } => error_code::PANIC,
      ErrorKind::IoError(_) => error_code::IO_ERROR,
    }
  }

  /// Whether the build has to stop when this error shows up.
  pub fn is_fatal(&self) -> bool {
    !matches!(
      self,
      ErrorKind::MalformedPackageJson { .. } | ErrorKind::AmbiguousRequire { .. }
    )
  }
}
