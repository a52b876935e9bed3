use std::fmt::Display;

use cjspack_common::{CanonicalPath, StaticStr};

use crate::ErrorKind;

#[derive(Debug)]
pub struct Error {
  contexts: Vec<String>,
  pub kind: ErrorKind,
}

impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    self.kind.to_string().eq(&other.kind.to_string())
  }
}

impl Eq for Error {}

impl Error {
  fn with_kind(kind: ErrorKind) -> Self {
    Self {
      contexts: vec![],
      kind,
    }
  }

  pub fn context(mut self, context: String) -> Self {
    self.contexts.push(context);
    self
  }

  pub fn contexts(&self) -> &[String] {
    &self.contexts
  }

  pub fn unresolved_import(specifier: impl Into<String>, context: &CanonicalPath) -> Self {
    Self::with_kind(ErrorKind::UnresolvedImport {
      specifier: specifier.into(),
      context: context.clone(),
    })
  }

  pub fn malformed_package_json(path: CanonicalPath, reason: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::MalformedPackageJson {
      path,
      reason: reason.into(),
    })
  }

  pub fn parse_js_failed(
    path: CanonicalPath,
    line: usize,
    source: swc_core::ecma::parser::error::Error,
  ) -> Self {
    Self::with_kind(ErrorKind::ParseJsFailed { path, line, source })
  }

  pub fn parse_json_failed(path: CanonicalPath, source: serde_json::Error) -> Self {
    Self::with_kind(ErrorKind::ParseJsonFailed { path, source })
  }

  pub fn ambiguous_require(module: CanonicalPath, line: usize, reason: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::AmbiguousRequire {
      module,
      line,
      reason: reason.into(),
    })
  }

  pub fn writer_state(expected: &'static str, actual: &'static str) -> Self {
    Self::with_kind(ErrorKind::WriterState { expected, actual })
  }

  pub fn io_error(e: std::io::Error) -> Self {
    Self::with_kind(ErrorKind::IoError(e))
  }

  pub fn panic(msg: String) -> Self {
    anyhow::format_err!(msg).into()
  }
}

impl std::convert::From<anyhow::Error> for Error {
  fn from(value: anyhow::Error) -> Self {
    Self::with_kind(ErrorKind::Panic { source: value })
  }
}

impl std::convert::From<std::io::Error> for Error {
  fn from(value: std::io::Error) -> Self {
    Self::io_error(value)
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match &self.kind {
      ErrorKind::Panic { source, .. } => Some(source.as_ref()),
      ErrorKind::ParseJsonFailed { source, .. } => Some(source),
      ErrorKind::IoError(source) => Some(source),
      _ => None,
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for ctx in self.contexts.iter().rev() {
      writeln!(f, "{}: {}", ansi_term::Color::Yellow.paint("context"), ctx)?;
    }

    self.kind.fmt(f)
  }
}
