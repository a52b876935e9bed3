const PREAMBLE_TEMPLATE: &str = include_str!("./preamble.js");
const ENV_PLACEHOLDER: &str = "__CJSPACK_ENV__";

pub(crate) const MODULE_TABLE_START: &str = "({";
pub(crate) const MODULE_SEPARATOR: &str = ",\n";
pub(crate) const FIRST_MODULE_PREFIX: &str = "\n";
pub(crate) const MODULE_PRE: &str = ": [function(require,module,exports) {\n";
pub(crate) const MODULE_POST: &str = "\n}, ";
pub(crate) const MODULE_END: &str = "]";
/// Closes the module table, seeds an empty module cache and starts module `0`.
pub(crate) const TRAILER: &str = "\n},{},[0]);";

/// The loader runtime with `environment` exposed as `process.env.NODE_ENV`.
///
/// It evaluates to a function taking `(modules, cache, entries)`.
pub fn render_preamble(environment: Option<&str>) -> String {
  let env = match environment {
    Some(value) => format!("'{}'", escape_single_quoted(value)),
    None => "undefined".to_string(),
  };
  PREAMBLE_TEMPLATE.trim_end().replace(ENV_PLACEHOLDER, &env)
}

fn escape_single_quoted(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for c in value.chars() {
    match c {
      '\\' => escaped.push_str("\\\\"),
      '\'' => escaped.push_str("\\'"),
      '\n' => escaped.push_str("\\n"),
      '\r' => escaped.push_str("\\r"),
      '\u{2028}' => escaped.push_str("\\u2028"),
      '\u{2029}' => escaped.push_str("\\u2029"),
      c => escaped.push(c),
    }
  }
  escaped
}
