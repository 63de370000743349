//! Store configuration.
//!
//! A store is described by three directories:
//!
//! - `store_dir`: the virtual prefix every store path starts with (e.g. `/nix/store`)
//! - `real_store_dir`: where that prefix actually lives on disk
//! - `log_dir`: the root of the build log tree (`<log_dir>/drvs/...`)
//!
//! The real store dir differs from the virtual one for chrooted stores, where
//! the whole store tree lives under a root directory.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LOG_DIR, DEFAULT_STORE_DIR, ENV_LOG_DIR, ENV_REAL_STORE_DIR, ENV_ROOT, ENV_STORE_DIR};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
  pub store_dir: String,
  pub real_store_dir: String,
  pub log_dir: String,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self::new(DEFAULT_STORE_DIR)
  }
}

impl StoreConfig {
  /// A store whose real location is the virtual one, with the default log directory.
  pub fn new(store_dir: impl Into<String>) -> Self {
    let store_dir = normalize_dir(store_dir.into());
    Self {
      real_store_dir: store_dir.clone(),
      store_dir,
      log_dir: DEFAULT_LOG_DIR.to_string(),
    }
  }

  pub fn with_real_store_dir(mut self, real_store_dir: impl Into<String>) -> Self {
    self.real_store_dir = normalize_dir(real_store_dir.into());
    self
  }

  pub fn with_log_dir(mut self, log_dir: impl Into<String>) -> Self {
    self.log_dir = normalize_dir(log_dir.into());
    self
  }

  /// Relocate the store under a chroot root.
  ///
  /// Overwrites both the real store dir and the log dir, so apply explicit
  /// overrides after this.
  pub fn with_root(mut self, root: impl AsRef<str>) -> Self {
    let root = normalize_dir(root.as_ref().to_string());
    let root = root.trim_end_matches('/');
    self.real_store_dir = format!("{}{}", root, self.store_dir);
    self.log_dir = format!("{}{}", root, DEFAULT_LOG_DIR);
    self
  }

  /// Build a configuration from `STOREFS_*` environment variables.
  ///
  /// `STOREFS_ROOT` relocates the real store and log directories; the more
  /// specific `STOREFS_REAL_STORE_DIR` and `STOREFS_LOG_DIR` win over it.
  pub fn from_env() -> Self {
    let store_dir = env_nonempty(ENV_STORE_DIR).unwrap_or_else(|| DEFAULT_STORE_DIR.to_string());
    let mut config = Self::new(store_dir);

    if let Some(root) = env_nonempty(ENV_ROOT) {
      config = config.with_root(root);
    }
    if let Some(real) = env_nonempty(ENV_REAL_STORE_DIR) {
      config = config.with_real_store_dir(real);
    }
    if let Some(log_dir) = env_nonempty(ENV_LOG_DIR) {
      config = config.with_log_dir(log_dir);
    }

    config
  }
}

fn env_nonempty(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn normalize_dir(mut dir: String) -> String {
  while dir.len() > 1 && dir.ends_with('/') {
    dir.pop();
  }
  dir
}
