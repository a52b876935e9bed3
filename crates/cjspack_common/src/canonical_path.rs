use std::fmt::Display;

/// A normalized, repository-relative, `/`-separated path.
///
/// Two specifiers that resolve to the same `CanonicalPath` denote the same module.
/// The tree is rooted at `.`, so a leading `/` carries no meaning and is dropped.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct CanonicalPath(String);

impl CanonicalPath {
  pub fn new(value: impl AsRef<str>) -> Self {
    Self(clean(value.as_ref()))
  }

  /// The repository root, used as the context of the entry module.
  pub fn root() -> Self {
    Self(".".to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Joins `other` onto this path and normalizes the result.
  pub fn join(&self, other: &str) -> Self {
    Self(clean(&format!("{}/{}", self.0, other)))
  }

  /// The directory containing this path. `a.js` lives in `.`.
  pub fn parent(&self) -> Self {
    match self.0.rsplit_once('/') {
      Some((dir, _)) => Self(clean(dir)),
      None => Self::root(),
    }
  }

  pub fn extension(&self) -> Option<&str> {
    let file_name = self.0.rsplit('/').next()?;
    match file_name.rsplit_once('.') {
      Some((stem, ext)) if !stem.is_empty() => Some(ext),
      _ => None,
    }
  }
}

impl Display for CanonicalPath {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for CanonicalPath {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl From<&str> for CanonicalPath {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}

impl From<String> for CanonicalPath {
  fn from(value: String) -> Self {
    Self::new(value)
  }
}

/// Lexically normalizes a `/`-separated path.
///
/// Empty and `.` segments are dropped, `..` pops the previous segment unless there is
/// none left to pop, in which case it is kept. An empty result becomes `.`.
pub fn clean(path: &str) -> String {
  let mut segments: Vec<&str> = Vec::new();
  for segment in path.split('/') {
    match segment {
      "" | "." => {}
      ".." => match segments.last() {
        Some(last) if *last != ".." => {
          segments.pop();
        }
        _ => segments.push(".."),
      },
      segment => segments.push(segment),
    }
  }
  if segments.is_empty() {
    ".".to_string()
  } else {
    segments.join("/")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clean_collapses_dots() {
    assert_eq!(clean("./a/./b//c.js"), "a/b/c.js");
    assert_eq!(clean("a/../b.js"), "b.js");
    assert_eq!(clean("../a/../../b"), "../../b");
    assert_eq!(clean("a/.."), ".");
    assert_eq!(clean(""), ".");
    assert_eq!(clean("/abs/x"), "abs/x");
  }

  #[test]
  fn join_from_context() {
    assert_eq!(CanonicalPath::new("proj").join("./a.js").as_str(), "proj/a.js");
    assert_eq!(
      CanonicalPath::new("other").join("../proj/a.js").as_str(),
      "proj/a.js"
    );
    assert_eq!(CanonicalPath::root().join("/x").as_str(), "x");
    assert_eq!(CanonicalPath::root().join("./index.js").as_str(), "index.js");
  }

  #[test]
  fn parent_and_extension() {
    assert_eq!(CanonicalPath::new("a.js").parent().as_str(), ".");
    assert_eq!(CanonicalPath::new("x/y/a.js").parent().as_str(), "x/y");
    assert_eq!(CanonicalPath::new("x/y/a.json").extension(), Some("json"));
    assert_eq!(CanonicalPath::new("x.y/README").extension(), None);
    assert_eq!(CanonicalPath::new(".eslintrc").extension(), None);
  }
}
