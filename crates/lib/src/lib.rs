//! storefs-lib: read access to a local content-addressed store.
//!
//! This crate provides:
//! - `LocalFsStore`: the shared store handle (config, validity database, filesystem)
//! - `LocalStoreAccessor`: stat/list/read/readlink by virtual store path, gated on validity
//! - `nar_from_path`: hands a valid store path's real tree to an archive encoder
//! - `get_build_log`: finds a derivation's build log, including legacy `.bz2` logs

pub mod accessor;
pub mod build_log;
pub mod compression;
pub mod config;
pub mod consts;
pub mod fs;
pub mod nar;
pub mod store;

pub use accessor::{AccessorError, FileType, FsAccessor, LocalStoreAccessor, Stat};
pub use config::StoreConfig;
pub use store::db::{MemoryPathDb, PathInfo, PathInfoDb, PathInfoError};
pub use store::{LocalFsStore, RealStore, StoreError};
