use std::sync::atomic::AtomicBool;

use tracing::{level_filters::LevelFilter, Level};

static IS_INIT: AtomicBool = AtomicBool::new(false);

/// Installs the global subscriber once, printing to stderr.
///
/// `RUST_LOG` takes precedence. Without it, warnings and errors are shown, or everything
/// when `verbose` is set. Events from other crates are never printed.
pub fn init(verbose: bool) {
  use tracing_subscriber::{filter::Targets, fmt, prelude::*, EnvFilter};
  if !IS_INIT.swap(true, std::sync::atomic::Ordering::SeqCst) {
    let default_level = if verbose {
      LevelFilter::TRACE
    } else {
      LevelFilter::WARN
    };
    tracing_subscriber::registry()
      .with(fmt::layer().with_writer(std::io::stderr))
      .with(
        EnvFilter::builder()
          .with_default_directive(default_level.into())
          .from_env_lossy(),
      )
      .with(Targets::new().with_target("cjspack", Level::TRACE))
      .init();
  }
}
