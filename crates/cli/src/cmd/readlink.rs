use anyhow::Result;

use storefs_lib::FsAccessor;

use super::StoreArgs;
use crate::output::{OutputFormat, print_json};

pub fn cmd_readlink(store: &StoreArgs, path: &str, output: OutputFormat) -> Result<()> {
  let target = store.open()?.get_fs_accessor().read_link(path)?;

  if output.is_json() {
    return print_json(&serde_json::json!({ "path": path, "target": target.to_string_lossy() }));
  }

  println!("{}", target.display());
  Ok(())
}
