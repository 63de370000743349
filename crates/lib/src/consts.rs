//! Fixed names and layout literals shared across the crate.

/// Subdirectory of the log directory holding per-derivation build logs.
pub const DRVS_LOG_DIR: &str = "drvs";

/// Suffix of legacy compressed build logs.
pub const BZ2_SUFFIX: &str = ".bz2";

/// Compression method name understood by the decompressor for `.bz2` logs.
pub const BZIP2_METHOD: &str = "bzip2";

pub const DERIVATION_EXT: &str = ".drv";

/// Number of leading basename characters used as the log shard directory.
pub const LOG_SHARD_PREFIX_LEN: usize = 2;

pub const DEFAULT_STORE_DIR: &str = "/nix/store";

/// Log directory relative to the store root (`/` unless chrooted).
pub const DEFAULT_LOG_DIR: &str = "/nix/var/log/nix";

pub const ENV_STORE_DIR: &str = "STOREFS_STORE_DIR";
pub const ENV_REAL_STORE_DIR: &str = "STOREFS_REAL_STORE_DIR";
pub const ENV_LOG_DIR: &str = "STOREFS_LOG_DIR";
pub const ENV_ROOT: &str = "STOREFS_ROOT";
