//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const STORE_DIR: &str = "/nix/store";

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the real store tree,
/// the build log tree, and the path registry.
pub struct TestEnv {
  pub temp: TempDir,
  registry: Vec<serde_json::Value>,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("registry.json"), "[]").unwrap();
    Self {
      temp,
      registry: Vec::new(),
    }
  }

  fn dir(&self, name: &str) -> PathBuf {
    let p = self.temp.path().join(name);
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// On-disk location of `/nix/store`.
  pub fn real_store(&self) -> PathBuf {
    self.dir("store")
  }

  pub fn log_dir(&self) -> PathBuf {
    self.dir("log")
  }

  pub fn registry_path(&self) -> PathBuf {
    self.temp.path().join("registry.json")
  }

  /// Register a store path as valid, optionally with a deriver.
  pub fn register(&mut self, path: &str, deriver: Option<&str>) {
    let mut info = serde_json::json!({ "path": path });
    if let Some(deriver) = deriver {
      info["deriver"] = serde_json::Value::from(deriver);
    }
    self.registry.push(info);
    std::fs::write(self.registry_path(), serde_json::to_string(&self.registry).unwrap()).unwrap();
  }

  /// Write a file below the real store, e.g. `abc-foo/bin/foo`.
  pub fn write_store_file(&self, relative_path: &str, content: &[u8]) -> PathBuf {
    write_file(&self.real_store().join(relative_path), content)
  }

  /// Write a file below `<log_dir>/drvs`.
  pub fn write_log(&self, relative_path: &str, content: &[u8]) -> PathBuf {
    write_file(&self.log_dir().join("drvs").join(relative_path), content)
  }

  /// Get a pre-configured Command for the storefs binary.
  ///
  /// Points every `STOREFS_*` variable at this environment.
  pub fn storefs_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("storefs");
    cmd.env_remove("STOREFS_ROOT");
    cmd.env("STOREFS_STORE_DIR", STORE_DIR);
    cmd.env("STOREFS_REAL_STORE_DIR", self.real_store());
    cmd.env("STOREFS_LOG_DIR", self.log_dir());
    cmd.env("STOREFS_REGISTRY", self.registry_path());
    cmd
  }
}

fn write_file(path: &Path, content: &[u8]) -> PathBuf {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(path, content).unwrap();
  path.to_path_buf()
}

pub fn bzip2(data: &[u8]) -> Vec<u8> {
  use std::io::Write;

  let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
  encoder.write_all(data).unwrap();
  encoder.finish().unwrap()
}
