use std::io::{self, Read};

use cjspack_common::clean;
use flate2::read::GzDecoder;
use tar::Archive;

/// Invokes `each` with the normalized name and contents of every regular file in a
/// gzipped tarball.
///
/// Entries escaping the archive root (`../x`) are skipped.
pub(crate) fn for_each_file<R: Read>(
  reader: R,
  mut each: impl FnMut(String, &mut dyn Read) -> io::Result<()>,
) -> io::Result<()> {
  let mut archive = Archive::new(GzDecoder::new(reader));
  for entry in archive.entries()? {
    let mut entry = entry?;
    if !entry.header().entry_type().is_file() {
      continue;
    }
    let name = {
      let path = entry.path()?;
      clean(&path.to_string_lossy())
    };
    if name == "." || name == ".." || name.starts_with("../") {
      tracing::warn!("skipping archive entry outside of the root: {}", name);
      continue;
    }
    each(name, &mut entry)?;
  }
  Ok(())
}

#[cfg(test)]
pub(crate) mod test_archive {
  use flate2::{write::GzEncoder, Compression};

  /// Builds an in-memory `.tar.gz` with the given files.
  pub fn build(files: &[(&str, &str)]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, contents) in files {
      let mut header = tar::Header::new_gnu();
      // Written raw so that names `set_path` refuses (`../x`) can be archived too.
      header.as_old_mut().name[..name.len()].copy_from_slice(name.as_bytes());
      header.set_entry_type(tar::EntryType::Regular);
      header.set_size(contents.len() as u64);
      header.set_mode(0o644);
      header.set_cksum();
      builder.append(&header, contents.as_bytes()).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
  }
}
