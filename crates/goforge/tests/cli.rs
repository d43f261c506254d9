//! Integration tests for the non-interactive goforge subcommands.
//!
//! GOFORGE_HOME points each invocation at a throwaway config directory so
//! the tests never touch the real ~/.goforge.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn goforge(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("goforge").unwrap();
    cmd.env("GOFORGE_HOME", home.path());
    cmd
}

#[test]
fn help_lists_the_subcommands() {
    Command::cargo_bin("goforge")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("temp"))
        .stdout(predicate::str::contains("templates"));
}

#[test]
fn templates_lists_the_builtins() {
    let home = TempDir::new().unwrap();
    goforge(&home)
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("blank"))
        .stdout(predicate::str::contains("gin"))
        .stdout(predicate::str::contains("ebiten"));
}

#[test]
fn temp_list_starts_empty_and_writes_the_config() {
    let home = TempDir::new().unwrap();
    goforge(&home)
        .args(["temp", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No temporary projects"));

    assert!(home.path().join("goforge.json").is_file());
    assert!(home.path().join("tmp").is_dir());
}

#[test]
fn temp_rm_unknown_project_fails() {
    let home = TempDir::new().unwrap();
    goforge(&home)
        .args(["temp", "rm", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn temp_list_shows_instances_without_sidecars() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join("tmp").join("scratch")).unwrap();

    goforge(&home)
        .args(["temp", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scratch"))
        .stdout(predicate::str::contains("unknown"));
}

#[test]
fn temp_promote_moves_the_instance_and_strips_metadata() {
    let home = TempDir::new().unwrap();
    let instance = home.path().join("tmp").join("keeper");
    std::fs::create_dir_all(&instance).unwrap();
    std::fs::write(instance.join(".goforge_meta.json"), "{}").unwrap();

    let target = home.path().join("promoted");
    goforge(&home)
        .args(["temp", "promote", "keeper"])
        .arg(&target)
        .assert()
        .success();

    assert!(target.is_dir());
    assert!(!target.join(".goforge_meta.json").exists());
    assert!(!instance.exists());
}

#[test]
fn temp_promote_refuses_an_occupied_target() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join("tmp").join("src")).unwrap();
    let target = home.path().join("busy");
    std::fs::create_dir(&target).unwrap();

    goforge(&home)
        .args(["temp", "promote", "src"])
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn temp_clean_removes_everything() {
    let home = TempDir::new().unwrap();
    for name in ["a", "b"] {
        std::fs::create_dir_all(home.path().join("tmp").join(name)).unwrap();
    }

    goforge(&home).args(["temp", "clean"]).assert().success();

    let remaining: Vec<_> = std::fs::read_dir(home.path().join("tmp"))
        .unwrap()
        .collect();
    assert!(remaining.is_empty());
}
