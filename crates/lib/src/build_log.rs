//! Build log lookup.
//!
//! Logs live under `<log_dir>/drvs/` in one of two layouts, probed in order:
//!
//! ```text
//! <log_dir>/drvs/
//! ├── x1/y2-foo.drv[.bz2]     # sharded by the first two characters
//! └── x1y2-foo.drv[.bz2]      # flat
//! ```
//!
//! Within each layout the plain file wins over its `.bz2` variant. A `.bz2`
//! file that can't be read or decompressed is skipped and the search moves on.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::compression::Decompressor;
use crate::consts::{BZ2_SUFFIX, BZIP2_METHOD, DRVS_LOG_DIR, LOG_SHARD_PREFIX_LEN};
use crate::fs::FileSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTier {
  Sharded,
  Flat,
}

/// One layout's pair of locations for a derivation's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCandidate {
  pub tier: LogTier,
  pub plain: PathBuf,
  pub compressed: PathBuf,
}

impl LogCandidate {
  fn new(tier: LogTier, plain: String) -> Self {
    let compressed = format!("{}{}", plain, BZ2_SUFFIX);
    Self {
      tier,
      plain: PathBuf::from(plain),
      compressed: PathBuf::from(compressed),
    }
  }
}

/// An I/O failure on a specific log file.
#[derive(Debug, Error)]
#[error("failed to read build log {}: {source}", path.display())]
pub struct LogReadError {
  pub path: PathBuf,
  #[source]
  pub source: io::Error,
}

fn read_error(path: &Path) -> impl FnOnce(io::Error) -> LogReadError + '_ {
  move |source| LogReadError {
    path: path.to_path_buf(),
    source,
  }
}

/// What a single candidate yielded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierOutcome {
  Found(String),
  Absent,
  /// Only the compressed variant exists and it couldn't be decoded.
  Corrupt,
}

/// Candidates for a derivation basename, in lookup order.
///
/// Basenames too short to split into a shard directory and a remainder only
/// get the flat candidate.
pub fn candidates_for(log_dir: &str, base_name: &str) -> Vec<LogCandidate> {
  let mut candidates = Vec::with_capacity(2);

  let split = base_name
    .char_indices()
    .nth(LOG_SHARD_PREFIX_LEN)
    .map(|(idx, _)| idx);
  if let Some(idx) = split {
    let (shard, rest) = base_name.split_at(idx);
    candidates.push(LogCandidate::new(
      LogTier::Sharded,
      format!("{}/{}/{}/{}", log_dir, DRVS_LOG_DIR, shard, rest),
    ));
  }

  candidates.push(LogCandidate::new(
    LogTier::Flat,
    format!("{}/{}/{}", log_dir, DRVS_LOG_DIR, base_name),
  ));

  candidates
}

/// Resolve one candidate.
///
/// I/O errors on the plain file propagate. Any failure on the compressed
/// variant yields [`TierOutcome::Corrupt`].
pub fn resolve_candidate(
  fs: &dyn FileSystem,
  decompressor: &dyn Decompressor,
  candidate: &LogCandidate,
) -> Result<TierOutcome, LogReadError> {
  let plain = &candidate.plain;
  if fs.path_exists(plain).map_err(read_error(plain))? {
    let content = fs.read_file(plain).map_err(read_error(plain))?;
    return Ok(TierOutcome::Found(String::from_utf8_lossy(&content).into_owned()));
  }

  let compressed = &candidate.compressed;
  if !fs.path_exists(compressed).map_err(read_error(compressed))? {
    return Ok(TierOutcome::Absent);
  }

  let decoded = fs
    .read_file(&candidate.compressed)
    .map_err(|e| e.to_string())
    .and_then(|data| {
      decompressor
        .decompress(BZIP2_METHOD, &data)
        .map_err(|e| e.to_string())
    });

  match decoded {
    Ok(content) => Ok(TierOutcome::Found(String::from_utf8_lossy(&content).into_owned())),
    Err(error) => {
      debug!(path = ?candidate.compressed, %error, "skipping unreadable compressed log");
      Ok(TierOutcome::Corrupt)
    }
  }
}

/// Search both layouts for the log of the derivation named `base_name`.
pub fn find_build_log(
  fs: &dyn FileSystem,
  decompressor: &dyn Decompressor,
  log_dir: &str,
  base_name: &str,
) -> Result<Option<String>, LogReadError> {
  for candidate in candidates_for(log_dir, base_name) {
    debug!(tier = ?candidate.tier, path = ?candidate.plain, "probing build log");
    if let TierOutcome::Found(content) = resolve_candidate(fs, decompressor, &candidate)? {
      return Ok(Some(content));
    }
  }
  Ok(None)
}
