//! Archive serialization interface.
//!
//! The archive format itself is implemented elsewhere; the store only hands
//! an encoder the real on-disk root of a valid store path and a sink.

use std::io::{self, Write};
use std::path::Path;

pub trait NarEncoder: Send + Sync {
  /// Serialize the filesystem tree rooted at `real_path` into `sink`.
  fn dump_path(&self, real_path: &Path, sink: &mut dyn Write) -> io::Result<()>;
}
