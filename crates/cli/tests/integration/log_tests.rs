//! Build log lookup through the `log` command.

use predicates::prelude::*;

use crate::common::{TestEnv, bzip2};

const OUT: &str = "/nix/store/x1y2-foo";
const DRV: &str = "/nix/store/x1y2-foo.drv";

#[test]
fn log_of_derivation_from_sharded_layout() {
  let env = TestEnv::new();
  env.write_log("x1/y2-foo.drv", b"sharded log\n");
  env.write_log("x1y2-foo.drv", b"flat log\n");

  env
    .storefs_cmd()
    .args(["log", DRV])
    .assert()
    .success()
    .stdout("sharded log\n");
}

#[test]
fn log_of_output_uses_deriver_and_compressed_flat_log() {
  let mut env = TestEnv::new();
  env.register(OUT, Some(DRV));
  env.write_log("x1y2-foo.drv.bz2", &bzip2(b"legacy log\n"));

  env
    .storefs_cmd()
    .args(["log", OUT])
    .assert()
    .success()
    .stdout("legacy log\n");
}

#[test]
fn corrupt_sharded_log_falls_through_to_flat() {
  let env = TestEnv::new();
  env.write_log("x1/y2-foo.drv.bz2", b"not bzip2 at all");
  env.write_log("x1y2-foo.drv", b"flat log\n");

  env
    .storefs_cmd()
    .args(["log", DRV])
    .assert()
    .success()
    .stdout("flat log\n");
}

#[test]
fn log_of_unknown_output_is_not_available() {
  let env = TestEnv::new();
  env
    .storefs_cmd()
    .args(["log", OUT])
    .assert()
    .failure()
    .stderr(predicate::str::contains("is not available"));
}

#[test]
fn log_json_includes_content() {
  let env = TestEnv::new();
  env.write_log("x1/y2-foo.drv", b"json log");

  let output = env.storefs_cmd().args(["log", DRV, "-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(value["path"], DRV);
  assert_eq!(value["log"], "json log");
}
