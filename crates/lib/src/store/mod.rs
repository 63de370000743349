//! Local filesystem store.
//!
//! # Layout
//!
//! ```text
//! <real_store_dir>/           # seen by callers as <store_dir>/
//! └── <hash>-<name>/          # store path, only readable once registered valid
//! <log_dir>/drvs/             # build logs, see crate::build_log
//! ```
//!
//! # Submodules
//!
//! - [`path`] - store path syntax
//! - [`translate`] - virtual to real path mapping
//! - [`db`] - path validity database interface
//! - [`local`] - the store handle itself

pub mod db;
pub mod local;
pub mod path;
pub mod translate;

pub use local::{LocalFsStore, StoreError};

use crate::fs::FileSystem;

/// What an accessor needs from a store whose contents sit on a real filesystem.
pub trait RealStore: Send + Sync {
  fn store_dir(&self) -> &str;

  fn real_store_dir(&self) -> &str;

  fn is_valid_path(&self, path: &str) -> bool;

  fn filesystem(&self) -> &dyn FileSystem;

  /// Translate a virtual path without checking it.
  fn to_real_path(&self, path: &str) -> String {
    translate::to_real_path(self.store_dir(), self.real_store_dir(), path)
  }
}
