mod cat;
mod log;
mod ls;
mod readlink;
mod stat;

pub use cat::cmd_cat;
pub use log::cmd_log;
pub use ls::cmd_ls;
pub use readlink::cmd_readlink;
pub use stat::cmd_stat;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use storefs_lib::{LocalFsStore, MemoryPathDb, StoreConfig};

/// Options locating the store, shared by every command.
#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
  /// JSON registry of valid store paths
  #[arg(long, env = "STOREFS_REGISTRY", global = true)]
  pub registry: Option<PathBuf>,

  /// Virtual store directory (default: $STOREFS_STORE_DIR or /nix/store)
  #[arg(long, global = true)]
  pub store_dir: Option<String>,

  /// On-disk store directory (default: $STOREFS_REAL_STORE_DIR or the store directory)
  #[arg(long, global = true)]
  pub real_store_dir: Option<String>,

  /// Build log directory (default: $STOREFS_LOG_DIR or /nix/var/log/nix)
  #[arg(long, global = true)]
  pub log_dir: Option<String>,
}

impl StoreArgs {
  /// Environment configuration with command-line flags applied on top.
  pub fn config(&self) -> StoreConfig {
    let mut config = StoreConfig::from_env();
    if let Some(store_dir) = &self.store_dir {
      // an unrelocated store keeps its real dir in step with the virtual one
      let relocated = config.real_store_dir != config.store_dir;
      let mut updated = StoreConfig::new(store_dir.as_str()).with_log_dir(config.log_dir.clone());
      if relocated {
        updated = updated.with_real_store_dir(config.real_store_dir.clone());
      }
      config = updated;
    }
    if let Some(real) = &self.real_store_dir {
      config = config.with_real_store_dir(real.as_str());
    }
    if let Some(log_dir) = &self.log_dir {
      config = config.with_log_dir(log_dir.as_str());
    }
    config
  }

  pub fn open(&self) -> Result<Arc<LocalFsStore>> {
    let db = match &self.registry {
      Some(path) => MemoryPathDb::from_json_file(path).context("Failed to load path registry")?,
      None => MemoryPathDb::new(),
    };
    let config = self.config();
    debug!(?config, paths = db.len(), "opened store");
    Ok(Arc::new(LocalFsStore::new(config, Arc::new(db))))
  }
}
