//! Path validity database interface.
//!
//! The store's real metadata database lives elsewhere; this crate only
//! consumes it through [`PathInfoDb`]. [`MemoryPathDb`] is a small in-memory
//! registry, loadable from JSON, for tools and tests that need a concrete one.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::path::is_derivation;

/// Metadata recorded for a valid store path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathInfo {
  pub path: String,
  /// Derivation that produced this path, if known. An empty string means unknown.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub deriver: Option<String>,
}

impl PathInfo {
  pub fn new(path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      deriver: None,
    }
  }

  pub fn with_deriver(mut self, deriver: impl Into<String>) -> Self {
    self.deriver = Some(deriver.into());
    self
  }

  /// The recorded deriver, treating an empty string as absent.
  pub fn deriver(&self) -> Option<&str> {
    self.deriver.as_deref().filter(|d| !d.is_empty())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathInfoError {
  #[error("path '{0}' is not valid")]
  InvalidPath(String),

  #[error("path info backend error: {0}")]
  Backend(String),
}

pub trait PathInfoDb: Send + Sync {
  fn is_valid_path(&self, path: &str) -> bool;

  /// Fails with [`PathInfoError::InvalidPath`] for paths the database doesn't know.
  fn query_path_info(&self, path: &str) -> Result<PathInfo, PathInfoError>;

  fn is_derivation(&self, path: &str) -> bool {
    is_derivation(path)
  }
}

#[derive(Debug, Error)]
pub enum RegistryError {
  #[error("failed to read registry {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse registry {path}: {source}")]
  Parse {
    path: String,
    #[source]
    source: serde_json::Error,
  },
}

#[derive(Debug, Default)]
pub struct MemoryPathDb {
  paths: RwLock<HashMap<String, PathInfo>>,
}

impl MemoryPathDb {
  pub fn new() -> Self {
    Self::default()
  }

  /// Load a registry file holding a JSON array of [`PathInfo`] records.
  pub fn from_json_file(path: &Path) -> Result<Self, RegistryError> {
    let content = fs::read_to_string(path).map_err(|source| RegistryError::Read {
      path: path.display().to_string(),
      source,
    })?;
    let infos: Vec<PathInfo> = serde_json::from_str(&content).map_err(|source| RegistryError::Parse {
      path: path.display().to_string(),
      source,
    })?;

    let db = Self::new();
    for info in infos {
      db.register(info);
    }
    Ok(db)
  }

  pub fn register(&self, info: PathInfo) {
    let mut paths = self.paths.write().unwrap_or_else(|e| e.into_inner());
    paths.insert(info.path.clone(), info);
  }

  pub fn len(&self) -> usize {
    self.paths.read().unwrap_or_else(|e| e.into_inner()).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl PathInfoDb for MemoryPathDb {
  fn is_valid_path(&self, path: &str) -> bool {
    self.paths.read().unwrap_or_else(|e| e.into_inner()).contains_key(path)
  }

  fn query_path_info(&self, path: &str) -> Result<PathInfo, PathInfoError> {
    self
      .paths
      .read()
      .unwrap_or_else(|e| e.into_inner())
      .get(path)
      .cloned()
      .ok_or_else(|| PathInfoError::InvalidPath(path.to_string()))
  }
}
