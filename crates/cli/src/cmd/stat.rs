use anyhow::Result;

use storefs_lib::{FileType, FsAccessor};

use super::StoreArgs;
use crate::output::{OutputFormat, format_bytes, print_json, print_stat};

pub fn cmd_stat(store: &StoreArgs, path: &str, output: OutputFormat) -> Result<()> {
  let stat = store.open()?.get_fs_accessor().stat(path)?;

  if output.is_json() {
    return print_json(&stat);
  }

  println!("{}", path);
  let kind = match stat.file_type {
    FileType::Missing => "missing",
    FileType::Regular => "regular",
    FileType::Symlink => "symlink",
    FileType::Directory => "directory",
  };
  print_stat("Type", kind);
  if stat.file_type == FileType::Regular {
    print_stat("Size", &format_bytes(stat.file_size));
    print_stat("Executable", if stat.is_executable { "yes" } else { "no" });
  }
  Ok(())
}
