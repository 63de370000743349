//! Filesystem primitives used by the store accessor and the log locator.
//!
//! Everything that touches the disk goes through [`FileSystem`], so callers
//! can swap in a recording or synthetic implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
  Regular,
  Symlink,
  Directory,
  /// Devices, sockets, fifos and anything else.
  Other,
}

/// Result of a symlink-unaware status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
  pub kind: EntryKind,
  pub size: u64,
  pub executable: bool,
}

pub trait FileSystem: Send + Sync {
  /// Status of `path` itself, not its symlink target. `Ok(None)` if nothing is there.
  fn lstat(&self, path: &Path) -> io::Result<Option<FileInfo>>;

  /// Entry names of a directory, excluding `.` and `..`.
  fn read_dir_names(&self, path: &Path) -> io::Result<Vec<String>>;

  fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

  fn read_link(&self, path: &Path) -> io::Result<PathBuf>;

  fn path_exists(&self, path: &Path) -> io::Result<bool> {
    Ok(self.lstat(path)?.is_some())
  }
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
  fn lstat(&self, path: &Path) -> io::Result<Option<FileInfo>> {
    let metadata = match fs::symlink_metadata(path) {
      Ok(metadata) => metadata,
      Err(e) if is_missing(&e) => return Ok(None),
      Err(e) => return Err(e),
    };

    let file_type = metadata.file_type();
    let kind = if file_type.is_file() {
      EntryKind::Regular
    } else if file_type.is_symlink() {
      EntryKind::Symlink
    } else if file_type.is_dir() {
      EntryKind::Directory
    } else {
      EntryKind::Other
    };

    Ok(Some(FileInfo {
      kind,
      size: metadata.len(),
      executable: kind == EntryKind::Regular && is_executable(&metadata),
    }))
  }

  fn read_dir_names(&self, path: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(path)? {
      names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
  }

  fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
  }

  fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
    fs::read_link(path)
  }
}

/// A missing path or a missing intermediate directory both mean "nothing here".
fn is_missing(err: &io::Error) -> bool {
  matches!(err.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory)
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
  use std::os::unix::fs::PermissionsExt;
  metadata.permissions().mode() & 0o100 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
  false
}
