use anyhow::Result;

use storefs_lib::FsAccessor;

use super::StoreArgs;
use crate::output::{OutputFormat, print_json};

pub fn cmd_ls(store: &StoreArgs, path: &str, output: OutputFormat) -> Result<()> {
  let names = store.open()?.get_fs_accessor().read_directory(path)?;

  if output.is_json() {
    return print_json(&names);
  }

  for name in names {
    println!("{}", name);
  }
  Ok(())
}
