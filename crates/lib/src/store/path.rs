//! Store path syntax.
//!
//! A store path is a direct child of the store directory:
//! `<store_dir>/<hash>-<name>`. Anything deeper is a virtual path whose owning
//! store path is its first component below the store directory.
//!
//! All helpers here are purely syntactic; validity is the database's call.

use thiserror::Error;

use crate::consts::DERIVATION_EXT;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorePathError {
  #[error("path '{path}' is not in the store")]
  NotInStore { path: String },

  #[error("path '{path}' is not a store path")]
  NotStorePath { path: String },

  #[error("path '{path}' contains '.' or '..' components")]
  Traversal { path: String },
}

/// Whether `path` lies strictly inside `store_dir` (at least one name component below it).
pub fn is_in_store(store_dir: &str, path: &str) -> bool {
  match path.strip_prefix(store_dir).and_then(|rest| rest.strip_prefix('/')) {
    Some(rest) => !rest.is_empty(),
    None => false,
  }
}

/// Extract the owning store path of a virtual path.
///
/// `/nix/store/abc-foo/bin/foo` yields `/nix/store/abc-foo`; a bare store path
/// is returned unchanged. Paths with `.` or `..` components below the store
/// dir are rejected, since the remainder is later joined onto the real root
/// without interpretation.
pub fn to_store_path<'a>(store_dir: &str, path: &'a str) -> Result<&'a str, StorePathError> {
  if !is_in_store(store_dir, path) {
    return Err(StorePathError::NotInStore { path: path.to_string() });
  }

  let name_start = store_dir.len() + 1;
  if path[name_start..].split('/').any(|c| c == "." || c == "..") {
    return Err(StorePathError::Traversal { path: path.to_string() });
  }

  match path[name_start..].find('/') {
    Some(offset) => Ok(&path[..name_start + offset]),
    None => Ok(path),
  }
}

/// Whether `path` is exactly `<store_dir>/<name>`.
pub fn is_store_path(store_dir: &str, path: &str) -> bool {
  if !is_in_store(store_dir, path) {
    return false;
  }
  let name = &path[store_dir.len() + 1..];
  !name.contains('/') && name != "." && name != ".."
}

pub fn assert_store_path(store_dir: &str, path: &str) -> Result<(), StorePathError> {
  if is_store_path(store_dir, path) {
    Ok(())
  } else {
    Err(StorePathError::NotStorePath { path: path.to_string() })
  }
}

/// Final component of a slash-separated path, ignoring one trailing slash.
pub fn base_name_of(path: &str) -> &str {
  let trimmed = path.strip_suffix('/').unwrap_or(path);
  match trimmed.rfind('/') {
    Some(pos) => &trimmed[pos + 1..],
    None => trimmed,
  }
}

pub fn is_derivation(path: &str) -> bool {
  path.ends_with(DERIVATION_EXT)
}

#[cfg(test)]
mod tests {
  use super::*;

  const STORE: &str = "/nix/store";

  #[test]
  fn in_store_requires_separator_and_name() {
    assert!(is_in_store(STORE, "/nix/store/abc-foo"));
    assert!(is_in_store(STORE, "/nix/store/abc-foo/bin"));
    assert!(!is_in_store(STORE, "/nix/store"));
    assert!(!is_in_store(STORE, "/nix/store/"));
    assert!(!is_in_store(STORE, "/nix/storefoo/abc"));
    assert!(!is_in_store(STORE, "/etc/passwd"));
  }

  #[test]
  fn owning_store_path_is_first_component() {
    assert_eq!(to_store_path(STORE, "/nix/store/abc-foo/bin/foo"), Ok("/nix/store/abc-foo"));
    assert_eq!(to_store_path(STORE, "/nix/store/abc-foo"), Ok("/nix/store/abc-foo"));
    assert_eq!(to_store_path(STORE, "/nix/store/abc-foo/"), Ok("/nix/store/abc-foo"));
  }

  #[test]
  fn owning_store_path_rejects_foreign_paths() {
    assert_eq!(
      to_store_path(STORE, "/tmp/abc-foo"),
      Err(StorePathError::NotInStore {
        path: "/tmp/abc-foo".to_string()
      })
    );
  }

  #[test]
  fn dot_components_are_rejected() {
    for path in [
      "/nix/store/abc-foo/../xyz-secret/key",
      "/nix/store/abc-foo/../../outside",
      "/nix/store/abc-foo/./bin",
      "/nix/store/abc-foo/bin/..",
      "/nix/store/..",
      "/nix/store/./abc-foo",
    ] {
      assert_eq!(
        to_store_path(STORE, path),
        Err(StorePathError::Traversal { path: path.to_string() })
      );
    }
    // dots inside a name are fine
    assert_eq!(to_store_path(STORE, "/nix/store/abc-foo/..hidden/.x"), Ok("/nix/store/abc-foo"));
  }

  #[test]
  fn store_path_must_be_direct_child() {
    assert!(assert_store_path(STORE, "/nix/store/abc-foo.drv").is_ok());
    assert!(matches!(
      assert_store_path(STORE, "/nix/store/abc-foo/bin"),
      Err(StorePathError::NotStorePath { .. })
    ));
    assert!(assert_store_path(STORE, "/nix/store").is_err());
    assert!(assert_store_path(STORE, "/nix/store/..").is_err());
  }

  #[test]
  fn base_name_handles_trailing_slash() {
    assert_eq!(base_name_of("/nix/store/x1y2-foo.drv"), "x1y2-foo.drv");
    assert_eq!(base_name_of("/nix/store/x1y2-foo/"), "x1y2-foo");
    assert_eq!(base_name_of("plain"), "plain");
  }

  #[test]
  fn derivations_are_recognized_by_extension() {
    assert!(is_derivation("/nix/store/abc-hello.drv"));
    assert!(!is_derivation("/nix/store/abc-hello"));
    assert!(!is_derivation("/nix/store/abc-hello.drv.bz2"));
  }
}
