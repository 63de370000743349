//! Virtual-to-real path translation.

/// Replace the `store_dir` prefix of `path` with `real_store_dir`.
///
/// Only the prefix length is consulted: the remainder of `path` is appended
/// verbatim, so callers must have checked that `path` is actually inside the
/// store. Paths shorter than the store dir translate to the bare real dir.
pub fn to_real_path(store_dir: &str, real_store_dir: &str, path: &str) -> String {
  let suffix = path.get(store_dir.len()..).unwrap_or("");
  let mut real = String::with_capacity(real_store_dir.len() + suffix.len());
  real.push_str(real_store_dir);
  real.push_str(suffix);
  real
}
