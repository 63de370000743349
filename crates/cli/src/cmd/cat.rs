use std::io::Write;

use anyhow::{Context, Result};

use storefs_lib::FsAccessor;

use super::StoreArgs;

pub fn cmd_cat(store: &StoreArgs, path: &str) -> Result<()> {
  let contents = store.open()?.get_fs_accessor().read_file(path)?;

  let mut stdout = std::io::stdout().lock();
  stdout.write_all(&contents).context("Failed to write to stdout")?;
  stdout.flush()?;
  Ok(())
}
