use std::borrow::Cow;
use std::fmt::Display;

mod canonical_path;
pub use canonical_path::*;

/// Integer id of a module inside a bundle. The entry module is always `0`.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct ModuleId(usize);

impl ModuleId {
  pub const ENTRY: ModuleId = ModuleId(0);

  pub fn new(value: usize) -> Self {
    Self(value)
  }

  pub fn value(&self) -> usize {
    self.0
  }
}

impl Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<usize> for ModuleId {
  fn from(value: usize) -> Self {
    Self(value)
  }
}

pub type StaticStr = Cow<'static, str>;
