//! Filesystem-style access to the contents of store paths.
//!
//! Callers address files by virtual path (`<store_dir>/<hash>-<name>/sub/path`).
//! Every operation first checks that the owning store path is valid, and only
//! then translates to the real location and touches the disk.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::fs::EntryKind;
use crate::store::RealStore;
use crate::store::path::{StorePathError, to_store_path};

#[derive(Debug, Error)]
pub enum AccessorError {
  #[error("path '{path}' is not a valid store path")]
  InvalidPath { path: String },

  #[error("file '{path}' has unsupported type")]
  UnsupportedFileType { path: String },

  #[error(transparent)]
  StorePath(#[from] StorePathError),

  #[error("I/O error on {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: io::Error,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
  Missing,
  Regular,
  Symlink,
  Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stat {
  pub file_type: FileType,
  /// Zero unless the entry is a regular file.
  pub file_size: u64,
  /// Only ever set for regular files.
  pub is_executable: bool,
}

impl Stat {
  pub const MISSING: Stat = Stat {
    file_type: FileType::Missing,
    file_size: 0,
    is_executable: false,
  };
}

/// Read-only view of store contents by virtual path.
pub trait FsAccessor {
  fn stat(&self, path: &str) -> Result<Stat, AccessorError>;

  fn read_directory(&self, path: &str) -> Result<BTreeSet<String>, AccessorError>;

  fn read_file(&self, path: &str) -> Result<Vec<u8>, AccessorError>;

  fn read_link(&self, path: &str) -> Result<PathBuf, AccessorError>;
}

/// Accessor over a store whose contents live on a local filesystem.
///
/// Holds a shared handle to the store and nothing else; cloning it is cheap
/// and any number can be used concurrently.
#[derive(Clone)]
pub struct LocalStoreAccessor {
  store: Arc<dyn RealStore>,
}

impl LocalStoreAccessor {
  pub fn new(store: Arc<dyn RealStore>) -> Self {
    Self { store }
  }

  /// Check the owning store path of `path` and translate it to its on-disk location.
  ///
  /// No filesystem access happens before the validity check passes.
  pub fn to_real_path(&self, path: &str) -> Result<String, AccessorError> {
    let store_path = to_store_path(self.store.store_dir(), path)?;

    if !self.store.is_valid_path(store_path) {
      debug!(path, store_path, "rejecting access to invalid store path");
      return Err(AccessorError::InvalidPath {
        path: store_path.to_string(),
      });
    }

    Ok(self.store.to_real_path(path))
  }
}

fn io_error(path: &str) -> impl FnOnce(io::Error) -> AccessorError + '_ {
  move |source| AccessorError::Io {
    path: path.to_string(),
    source,
  }
}

impl FsAccessor for LocalStoreAccessor {
  fn stat(&self, path: &str) -> Result<Stat, AccessorError> {
    let real_path = self.to_real_path(path)?;

    let info = match self
      .store
      .filesystem()
      .lstat(Path::new(&real_path))
      .map_err(io_error(&real_path))?
    {
      Some(info) => info,
      None => return Ok(Stat::MISSING),
    };

    let file_type = match info.kind {
      EntryKind::Regular => FileType::Regular,
      EntryKind::Symlink => FileType::Symlink,
      EntryKind::Directory => FileType::Directory,
      EntryKind::Other => {
        return Err(AccessorError::UnsupportedFileType { path: path.to_string() });
      }
    };

    let regular = file_type == FileType::Regular;
    Ok(Stat {
      file_type,
      file_size: if regular { info.size } else { 0 },
      is_executable: regular && info.executable,
    })
  }

  fn read_directory(&self, path: &str) -> Result<BTreeSet<String>, AccessorError> {
    let real_path = self.to_real_path(path)?;
    let names = self
      .store
      .filesystem()
      .read_dir_names(Path::new(&real_path))
      .map_err(io_error(&real_path))?;
    Ok(names.into_iter().collect())
  }

  fn read_file(&self, path: &str) -> Result<Vec<u8>, AccessorError> {
    let real_path = self.to_real_path(path)?;
    self
      .store
      .filesystem()
      .read_file(Path::new(&real_path))
      .map_err(io_error(&real_path))
  }

  fn read_link(&self, path: &str) -> Result<PathBuf, AccessorError> {
    let real_path = self.to_real_path(path)?;
    self
      .store
      .filesystem()
      .read_link(Path::new(&real_path))
      .map_err(io_error(&real_path))
  }
}
