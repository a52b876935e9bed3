use std::{
  fs::File,
  io::BufWriter,
  path::{Path, PathBuf},
  process::ExitCode,
};

use cjspack::{
  BuildError, BuildResult, Bundler, DiskFileSystem, FileSystem, InputOptions, MemoryFileSystem,
};
use clap::Parser;

#[derive(Parser)]
#[command(
  name = "cjspack",
  about = "Bundles a tree of CommonJS modules into a single script",
  version
)]
struct Cli {
  /// Gzipped tarball holding the source tree
  #[arg(long, required_unless_present = "dir", conflicts_with = "dir")]
  archive: Option<PathBuf>,

  /// Directory holding the source tree, read in place
  #[arg(long)]
  dir: Option<PathBuf>,

  /// Specifier of the entry module, resolved from the root of the archive
  #[arg(long, default_value = "index.js")]
  entrypoint: String,

  /// Where to write the bundle
  #[arg(long)]
  output: PathBuf,

  /// Value of `process.env.NODE_ENV` inside the bundle
  #[arg(long)]
  environment: Option<String>,

  /// Extract the archive to a temporary directory instead of keeping it in memory
  #[arg(long)]
  extract_to_disk: bool,

  /// Log every resolution probe and loaded module
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  cjspack_tracing::init(cli.verbose);

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      tracing::error!("{}", err);
      ExitCode::FAILURE
    }
  }
}

fn run(cli: &Cli) -> BuildResult<()> {
  let mut fs = open_source_tree(cli)?;

  let bundled = bundle(cli, fs.as_ref());
  let closed = fs.close();
  bundled?;
  closed?;
  Ok(())
}

fn open_source_tree(cli: &Cli) -> BuildResult<Box<dyn FileSystem>> {
  let Some(archive_path) = &cli.archive else {
    let dir = cli.dir.as_deref().unwrap_or(Path::new("."));
    let fs = DiskFileSystem::from_dir(dir)
      .map_err(|err| BuildError::io_error(err).context(format!("Read {}", dir.display())))?;
    return Ok(Box::new(fs));
  };

  let archive = File::open(archive_path).map_err(|err| {
    BuildError::io_error(err).context(format!("Open archive {}", archive_path.display()))
  })?;
  Ok(if cli.extract_to_disk {
    Box::new(DiskFileSystem::from_tarball(archive)?)
  } else {
    Box::new(MemoryFileSystem::from_tarball(archive)?)
  })
}

fn bundle(cli: &Cli, fs: &dyn FileSystem) -> BuildResult<()> {
  let dir = match cli.output.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  // Renamed over the destination only once the bundle is complete.
  let mut temp = tempfile::Builder::new()
    .prefix(".cjspack")
    .tempfile_in(dir)?;

  let bundler = Bundler::new(InputOptions {
    entry: cli.entrypoint.clone(),
    environment: cli.environment.clone(),
    ..Default::default()
  });
  let graph = bundler.write(fs, BufWriter::new(temp.as_file_mut()))?;

  temp
    .persist(&cli.output)
    .map_err(|err| BuildError::io_error(err.error))?;
  tracing::info!(
    "bundled {} modules into {}",
    graph.len(),
    cli.output.display()
  );
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::ffi::OsStr;

  use super::*;

  fn dir_cli(src: &Path, output: &Path) -> Cli {
    Cli::try_parse_from([
      OsStr::new("cjspack"),
      OsStr::new("--dir"),
      src.as_os_str(),
      OsStr::new("--output"),
      output.as_os_str(),
    ])
    .unwrap()
  }

  #[test]
  fn source_tree_is_required_once() {
    assert!(Cli::try_parse_from(["cjspack", "--output", "out.js"]).is_err());
    assert!(Cli::try_parse_from([
      "cjspack", "--archive", "a.tgz", "--dir", "src", "--output", "out.js"
    ])
    .is_err());
    let cli = Cli::try_parse_from(["cjspack", "--archive", "a.tgz", "--output", "out.js"]).unwrap();
    assert_eq!(cli.entrypoint, "index.js");
  }

  #[test]
  fn bundle_from_dir() {
    let src = tempfile::tempdir().unwrap();
    std::fs::write(src.path().join("index.js"), "require('./lib');\n").unwrap();
    std::fs::write(src.path().join("lib.js"), "module.exports = 1;\n").unwrap();
    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("bundle.js");

    let cli = dir_cli(src.path(), &output);
    run(&cli).unwrap();

    let bundle = std::fs::read_to_string(&output).unwrap();
    assert!(bundle.ends_with("}, {\"./lib\":1}]\n},{},[0]);"));
    assert!(src.path().join("index.js").is_file());
  }

  #[test]
  fn failed_build_leaves_no_output() {
    let src = tempfile::tempdir().unwrap();
    std::fs::write(src.path().join("index.js"), "require('./missing');\n").unwrap();
    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("bundle.js");

    let cli = dir_cli(src.path(), &output);
    assert!(run(&cli).is_err());
    assert!(!output.exists());
  }
}
