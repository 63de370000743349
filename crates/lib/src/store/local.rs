use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::accessor::LocalStoreAccessor;
use crate::build_log::find_build_log;
use crate::compression::{Bzip2Decompressor, Decompressor};
use crate::config::StoreConfig;
use crate::fs::{FileSystem, RealFileSystem};
use crate::nar::NarEncoder;
use crate::store::RealStore;
use crate::store::db::{PathInfoDb, PathInfoError};
use crate::store::path::{StorePathError, assert_store_path, base_name_of};

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("path '{path}' is not valid")]
  NotValid { path: String },

  #[error(transparent)]
  StorePath(#[from] StorePathError),

  #[error("path info query failed: {0}")]
  Database(#[source] PathInfoError),

  #[error("I/O error on {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },
}

/// Shared handle to a store living on a local filesystem.
///
/// Holds no mutable state of its own; wrap it in an `Arc` and hand out
/// accessors with [`LocalFsStore::get_fs_accessor`].
pub struct LocalFsStore {
  config: StoreConfig,
  db: Arc<dyn PathInfoDb>,
  fs: Arc<dyn FileSystem>,
  decompressor: Arc<dyn Decompressor>,
}

impl LocalFsStore {
  pub fn new(config: StoreConfig, db: Arc<dyn PathInfoDb>) -> Self {
    Self::with_filesystem(config, db, Arc::new(RealFileSystem))
  }

  pub fn with_filesystem(config: StoreConfig, db: Arc<dyn PathInfoDb>, fs: Arc<dyn FileSystem>) -> Self {
    Self {
      config,
      db,
      fs,
      decompressor: Arc::new(Bzip2Decompressor),
    }
  }

  pub fn with_decompressor(mut self, decompressor: Arc<dyn Decompressor>) -> Self {
    self.decompressor = decompressor;
    self
  }

  pub fn config(&self) -> &StoreConfig {
    &self.config
  }

  pub fn db(&self) -> &dyn PathInfoDb {
    self.db.as_ref()
  }

  pub fn get_fs_accessor(self: &Arc<Self>) -> LocalStoreAccessor {
    LocalStoreAccessor::new(self.clone())
  }

  /// Serialize a valid store path's on-disk tree through `encoder`.
  pub fn nar_from_path(&self, path: &str, sink: &mut dyn Write, encoder: &dyn NarEncoder) -> Result<(), StoreError> {
    if !self.db.is_valid_path(path) {
      return Err(StoreError::NotValid { path: path.to_string() });
    }

    let real_path = self.to_real_path(path);
    encoder
      .dump_path(Path::new(&real_path), sink)
      .map_err(|source| StoreError::Io {
        path: real_path,
        source,
      })
  }

  /// Build log of `path`, or of the derivation that produced it.
  ///
  /// Returns `Ok(None)` when the path is unknown, has no recorded deriver, or
  /// no log was found.
  pub fn get_build_log(&self, path: &str) -> Result<Option<String>, StoreError> {
    assert_store_path(&self.config.store_dir, path)?;

    let drv_path = if self.db.is_derivation(path) {
      path.to_string()
    } else {
      let info = match self.db.query_path_info(path) {
        Ok(info) => info,
        Err(PathInfoError::InvalidPath(_)) => {
          debug!(path, "no build log for unknown path");
          return Ok(None);
        }
        Err(e) => return Err(StoreError::Database(e)),
      };
      match info.deriver() {
        Some(deriver) => {
          debug!(path, deriver, "resolved output to its deriver");
          deriver.to_string()
        }
        None => {
          debug!(path, "no build log for path without deriver");
          return Ok(None);
        }
      }
    };

    let log_dir = &self.config.log_dir;
    find_build_log(
      self.fs.as_ref(),
      self.decompressor.as_ref(),
      log_dir,
      base_name_of(&drv_path),
    )
    .map_err(|e| StoreError::Io {
      path: e.path.display().to_string(),
      source: e.source,
    })
  }
}

impl RealStore for LocalFsStore {
  fn store_dir(&self) -> &str {
    &self.config.store_dir
  }

  fn real_store_dir(&self) -> &str {
    &self.config.real_store_dir
  }

  fn is_valid_path(&self, path: &str) -> bool {
    self.db.is_valid_path(path)
  }

  fn filesystem(&self) -> &dyn FileSystem {
    self.fs.as_ref()
  }
}
