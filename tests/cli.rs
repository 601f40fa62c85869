// ABOUTME: CLI surface tests via assert_cmd.
// ABOUTME: Only argument parsing paths; nothing here touches an engine socket.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("skafos")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pull"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn pull_requires_an_image_argument() {
    Command::cargo_bin("skafos")
        .unwrap()
        .arg("pull")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IMAGE"));
}

#[test]
fn build_requires_a_tag() {
    Command::cargo_bin("skafos")
        .unwrap()
        .args(["build", "/tmp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--tag"));
}

#[test]
fn unknown_runtime_is_rejected() {
    Command::cargo_bin("skafos")
        .unwrap()
        .args(["--runtime", "lxc", "pull", "nginx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown runtime"));
}

#[test]
fn no_subcommand_fails() {
    Command::cargo_bin("skafos").unwrap().assert().failure();
}
