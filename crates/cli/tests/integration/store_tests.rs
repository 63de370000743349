//! Accessor commands against a real store tree.

use predicates::prelude::*;

use crate::common::TestEnv;

const FOO: &str = "/nix/store/abc-foo";

fn env_with_foo() -> TestEnv {
  let mut env = TestEnv::new();
  env.register(FOO, None);
  env.write_store_file("abc-foo/share/doc/README", b"read me\n");
  env.write_store_file("abc-foo/bin/foo", b"#!/bin/sh\necho foo\n");
  env
}

#[test]
fn cat_prints_file_contents() {
  let env = env_with_foo();
  env
    .storefs_cmd()
    .args(["cat", "/nix/store/abc-foo/share/doc/README"])
    .assert()
    .success()
    .stdout("read me\n");
}

#[test]
fn ls_lists_directory_entries_sorted() {
  let env = env_with_foo();
  env
    .storefs_cmd()
    .args(["ls", FOO])
    .assert()
    .success()
    .stdout("bin\nshare\n");
}

#[test]
fn ls_json_outputs_array() {
  let env = env_with_foo();
  let output = env
    .storefs_cmd()
    .args(["ls", FOO, "-o", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(names, vec!["bin".to_string(), "share".to_string()]);
}

#[test]
fn stat_json_reports_regular_file() {
  let env = env_with_foo();
  let output = env
    .storefs_cmd()
    .args(["stat", "/nix/store/abc-foo/share/doc/README", "--output", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let stat: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(stat["file_type"], "regular");
  assert_eq!(stat["file_size"], 8);
  assert_eq!(stat["is_executable"], false);
}

#[test]
fn stat_missing_entry_succeeds() {
  let env = env_with_foo();
  env
    .storefs_cmd()
    .args(["stat", "/nix/store/abc-foo/nope"])
    .assert()
    .success()
    .stdout(predicate::str::contains("missing"));
}

#[test]
fn unregistered_path_is_rejected_even_if_present_on_disk() {
  let env = env_with_foo();
  env.write_store_file("xyz-secret/data", b"hidden");

  env
    .storefs_cmd()
    .args(["cat", "/nix/store/xyz-secret/data"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("path '/nix/store/xyz-secret' is not a valid store path"))
    .stdout(predicate::str::contains("hidden").not());
}

#[cfg(unix)]
#[test]
fn readlink_prints_target() {
  let env = env_with_foo();
  std::os::unix::fs::symlink("share/doc", env.real_store().join("abc-foo/doc")).unwrap();

  env
    .storefs_cmd()
    .args(["readlink", "/nix/store/abc-foo/doc"])
    .assert()
    .success()
    .stdout("share/doc\n");
}

#[test]
fn store_dir_flag_overrides_environment() {
  let env = env_with_foo();
  env
    .storefs_cmd()
    .args(["--store-dir", "/gnu/store", "cat", "/nix/store/abc-foo/share/doc/README"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("is not in the store"));
}

#[test]
fn dot_dot_cannot_reach_unregistered_paths() {
  let env = env_with_foo();
  env.write_store_file("xyz-secret/data", b"hidden");

  env
    .storefs_cmd()
    .args(["cat", "/nix/store/abc-foo/../xyz-secret/data"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("contains '.' or '..' components"))
    .stdout(predicate::str::contains("hidden").not());
}
