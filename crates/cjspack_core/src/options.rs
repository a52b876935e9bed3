use std::sync::Arc;

use derivative::Derivative;

use crate::BuildError;

pub type WarningHandler = Arc<dyn Fn(BuildError) + Send + Sync>;

pub fn default_warning_handler() -> WarningHandler {
  Arc::new(|err| {
    tracing::warn!("{}", err);
  })
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct InputOptions {
  /// Specifier of the entry module, resolved from the root of the file system.
  pub entry: String,
  /// Exposed to bundled code as `process.env.NODE_ENV`.
  pub environment: Option<String>,
  #[derivative(Debug = "ignore")]
  pub on_warn: WarningHandler,
}

impl Default for InputOptions {
  fn default() -> Self {
    Self {
      entry: "index.js".to_string(),
      environment: None,
      on_warn: default_warning_handler(),
    }
  }
}
