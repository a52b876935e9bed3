use std::{collections::BTreeMap, fmt, io::Write};

use cjspack_common::ModuleId;

use crate::{
  runtime::{
    render_preamble, FIRST_MODULE_PREFIX, MODULE_END, MODULE_POST, MODULE_PRE, MODULE_SEPARATOR,
    MODULE_TABLE_START, TRAILER,
  },
  BuildError, BuildResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
  Fresh,
  Open,
  Closed,
}

impl WriterState {
  fn as_str(self) -> &'static str {
    match self {
      WriterState::Fresh => "not opened",
      WriterState::Open => "open",
      WriterState::Closed => "closed",
    }
  }
}

impl fmt::Display for WriterState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Streams a bundle to `out` one module at a time.
///
/// Calls must follow `open`, any number of `write`, then `close`.
#[derive(Debug)]
pub struct BundleWriter<W: Write> {
  out: W,
  state: WriterState,
  written: usize,
}

impl<W: Write> BundleWriter<W> {
  pub fn new(out: W) -> Self {
    Self {
      out,
      state: WriterState::Fresh,
      written: 0,
    }
  }

  /// Emits the loader preamble and opens the module table.
  pub fn open(&mut self, environment: Option<&str>) -> BuildResult<()> {
    self.expect_state(WriterState::Fresh)?;
    self.out.write_all(render_preamble(environment).as_bytes())?;
    self.out.write_all(MODULE_TABLE_START.as_bytes())?;
    self.state = WriterState::Open;
    Ok(())
  }

  /// Appends one module-table entry. `imports` maps each `require`
  /// specifier of the module to the id it resolved to.
  pub fn write<'a>(
    &mut self,
    source: &str,
    id: ModuleId,
    imports: impl IntoIterator<Item = (&'a str, ModuleId)>,
  ) -> BuildResult<()> {
    self.expect_state(WriterState::Open)?;
    let imports = imports
      .into_iter()
      .map(|(specifier, id)| (specifier, id.value()))
      .collect::<BTreeMap<_, _>>();
    let imports = serde_json::to_string(&imports).map_err(|e| BuildError::panic(e.to_string()))?;

    let separator = if self.written == 0 {
      FIRST_MODULE_PREFIX
    } else {
      MODULE_SEPARATOR
    };
    write!(
      self.out,
      "{separator}{id}{MODULE_PRE}{source}{MODULE_POST}{imports}{MODULE_END}"
    )?;
    self.written += 1;
    Ok(())
  }

  /// Closes the module table and appends the call that starts module `0`.
  pub fn close(&mut self) -> BuildResult<()> {
    self.expect_state(WriterState::Open)?;
    self.out.write_all(TRAILER.as_bytes())?;
    self.out.flush()?;
    self.state = WriterState::Closed;
    Ok(())
  }

  pub fn modules_written(&self) -> usize {
    self.written
  }

  pub fn into_inner(self) -> W {
    self.out
  }

  fn expect_state(&self, expected: WriterState) -> BuildResult<()> {
    if self.state == expected {
      Ok(())
    } else {
      Err(BuildError::writer_state(expected.as_str(), self.state.as_str()))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const NO_IMPORTS: [(&str, ModuleId); 0] = [];

  fn body(bundle: Vec<u8>) -> String {
    let bundle = String::from_utf8(bundle).unwrap();
    let preamble = render_preamble(None);
    bundle.strip_prefix(&preamble).unwrap().to_string()
  }

  #[test]
  fn empty_bundle() {
    let mut writer = BundleWriter::new(Vec::<u8>::new());
    writer.open(None).unwrap();
    writer.close().unwrap();
    assert_eq!(body(writer.into_inner()), "({\n},{},[0]);");
  }

  #[test]
  fn entries_are_comma_separated() {
    let mut writer = BundleWriter::new(Vec::<u8>::new());
    writer.open(None).unwrap();
    writer
      .write("module.exports = 1;", ModuleId::new(1), NO_IMPORTS)
      .unwrap();
    writer
      .write(
        "require('./lib');",
        ModuleId::new(0),
        [("./lib", ModuleId::new(1))],
      )
      .unwrap();
    writer.close().unwrap();
    assert_eq!(writer.modules_written(), 2);
    assert_eq!(
      body(writer.into_inner()),
      "({\n1: [function(require,module,exports) {\nmodule.exports = 1;\n}, {}],\n0: [function(require,module,exports) {\nrequire('./lib');\n}, {\"./lib\":1}]\n},{},[0]);"
    );
  }

  #[test]
  fn imports_are_sorted_by_specifier() {
    let mut writer = BundleWriter::new(Vec::<u8>::new());
    writer.open(None).unwrap();
    writer
      .write(
        "",
        ModuleId::new(0),
        [
          ("./z", ModuleId::new(1)),
          ("a", ModuleId::new(2)),
          ("./b", ModuleId::new(3)),
        ],
      )
      .unwrap();
    let out = String::from_utf8(writer.into_inner()).unwrap();
    assert!(out.ends_with(r#"{"./b":3,"./z":1,"a":2}]"#));
  }

  #[test]
  fn preamble_carries_environment() {
    let mut writer = BundleWriter::new(Vec::<u8>::new());
    writer.open(Some("production")).unwrap();
    let out = String::from_utf8(writer.into_inner()).unwrap();
    assert!(out.starts_with(&render_preamble(Some("production"))));
    assert!(out.ends_with("({"));
  }

  #[test]
  fn write_before_open_is_rejected() {
    let mut writer = BundleWriter::new(Vec::<u8>::new());
    let err = writer.write("", ModuleId::ENTRY, NO_IMPORTS).unwrap_err();
    assert_eq!(err.kind.code(), "WRITER_STATE");
    assert!(writer.into_inner().is_empty());
  }

  #[test]
  fn calls_after_close_are_rejected() {
    let mut writer = BundleWriter::new(Vec::<u8>::new());
    writer.open(None).unwrap();
    writer.close().unwrap();
    assert!(writer.write("", ModuleId::ENTRY, NO_IMPORTS).is_err());
    assert!(writer.close().is_err());
    assert!(writer.open(None).is_err());
  }
}
