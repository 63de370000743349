//! Build log command implementation.
//!
//! Prints the build log of a derivation, or of the derivation that produced
//! an output path.

use anyhow::{Result, bail};

use super::StoreArgs;
use crate::output::{OutputFormat, print_json};

pub fn cmd_log(store: &StoreArgs, path: &str, output: OutputFormat) -> Result<()> {
  let log = store.open()?.get_build_log(path)?;

  let Some(log) = log else {
    bail!("build log of '{}' is not available", path);
  };

  if output.is_json() {
    return print_json(&serde_json::json!({ "path": path, "log": log }));
  }

  print!("{}", log);
  Ok(())
}
