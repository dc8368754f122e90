use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("prodmanage")
        .env("PRODMANAGE_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    cargo_bin_cmd!("prodmanage")
        .env("PRODMANAGE_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("base_url ="));
    assert!(contents.contains("dismiss_ms ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "# existing config").unwrap();

    cargo_bin_cmd!("prodmanage")
        .env("PRODMANAGE_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_set_url_then_show() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("prodmanage")
        .env("PRODMANAGE_HOME", dir.path())
        .env_remove("PRODMANAGE_API_URL")
        .args(["config", "set-url", "http://localhost:5000/api"])
        .assert()
        .success();

    cargo_bin_cmd!("prodmanage")
        .env("PRODMANAGE_HOME", dir.path())
        .env_remove("PRODMANAGE_API_URL")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:5000/api"));
}

#[test]
fn test_config_show_prefers_env_url() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("prodmanage")
        .env("PRODMANAGE_HOME", dir.path())
        .env("PRODMANAGE_API_URL", "http://api.example.test/api")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://api.example.test/api"));
}

#[test]
fn test_set_url_rejects_garbage() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("prodmanage")
        .env("PRODMANAGE_HOME", dir.path())
        .args(["config", "set-url", "not a url"])
        .assert()
        .failure();

    assert!(!dir.path().join("config.toml").exists());
}
