//
//  mediawiki-butt
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// An `mwb` command isolated from the user's config and environment.
fn mwb(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mwb").unwrap();
    cmd.env("MWB_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("MWB_URL")
        .env_remove("MWB_USERNAME")
        .env_remove("MWB_PASSWORD")
        .env_remove("MWB_USER_AGENT")
        .env("MWB_NO_PROMPT", "true");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    mwb(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("contributors"))
        .stdout(predicate::str::contains("block"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    mwb(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_zero_limit_fails_before_network() {
    let dir = TempDir::new().unwrap();
    // Port 9 (discard) is never contacted: the limit is rejected locally.
    mwb(&dir)
        .args(["--url", "http://127.0.0.1:9/w", "list", "tags", "--limit", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("limit"));
}

#[test]
fn test_missing_url_is_reported() {
    let dir = TempDir::new().unwrap();
    mwb(&dir)
        .args(["list", "categories"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No wiki URL"));
}

#[test]
fn test_bad_url_scheme_is_usage_error() {
    let dir = TempDir::new().unwrap();
    mwb(&dir)
        .args(["--url", "ftp://wiki.example.org/w", "list", "tags"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_namespace_is_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    mwb(&dir)
        .args(["--url", "http://127.0.0.1:9/w", "list", "pages", "--namespace", "Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown namespace"));
}

#[test]
fn test_block_requires_login() {
    let dir = TempDir::new().unwrap();
    mwb(&dir)
        .args(["--url", "http://127.0.0.1:9/w", "block", "Eve", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires login"));
}

#[test]
fn test_config_set_get_and_path() {
    let dir = TempDir::new().unwrap();

    mwb(&dir)
        .args(["config", "set", "wiki.url", "https://wiki.example.org/w"])
        .assert()
        .success();

    mwb(&dir)
        .args(["config", "get", "wiki.url"])
        .assert()
        .success()
        .stdout("https://wiki.example.org/w\n");

    mwb(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    mwb(&dir)
        .args(["config", "set", "wiki.password", "hunter2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_completion_generates_script() {
    let dir = TempDir::new().unwrap();
    mwb(&dir)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mwb"));
}
