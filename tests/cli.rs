//! End-to-end tests driving the compiled binary against a fake `docker`
//! placed first on PATH. The fake records every argument vector it receives
//! in `log` and tracks container existence with a marker file, so the
//! remove/create/start sequencing can be asserted without a real runtime.
#![cfg(unix)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::{Path, PathBuf};

fn fake_runtime(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = r#"#!/bin/sh
state="$FAKE_RUNTIME_STATE"
echo "$@" >> "$state/log"
case "$1" in
    build)
        exit 0
        ;;
    create)
        echo x > "$state/container"
        echo 50b70d3e3d7ff1517b813de815a3da16
        exit 0
        ;;
    rm)
        if [ -s "$state/container" ]; then
            : > "$state/container"
            echo "rm-ok" >> "$state/log"
            echo "$2"
            exit 0
        fi
        echo "rm-missing" >> "$state/log"
        echo "Error: No such container: $2" >&2
        exit 1
        ;;
    start)
        if [ -s "$state/container" ]; then
            if [ -f "$state/exit_code" ]; then
                read -r code < "$state/exit_code"
                exit "$code"
            fi
            exit 0
        fi
        echo "Error: No such container: $4" >&2
        exit 1
        ;;
esac
exit 64
"#;

    let path = dir.join("docker");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn task(name: &str, dir: &Path) -> assert_cmd::Command {
    let path = format!(
        "{}:{}",
        dir.display(),
        std::env::var("PATH").unwrap_or_default()
    );

    let mut cmd = cargo_bin_cmd!("pidrone-dev");
    cmd.arg(name)
        .env("FAKE_RUNTIME_STATE", dir)
        .env("PATH", path);
    cmd
}

fn read_log(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn a_clean_sequence_builds_creates_and_runs() {
    let dir = tempfile::tempdir().unwrap();
    fake_runtime(dir.path());

    task("build", dir.path()).assert().success();
    task("create", dir.path()).assert().success();
    task("run", dir.path()).assert().success();

    let log = read_log(dir.path());
    assert!(log[0].starts_with("build "), "unexpected log: {:?}", log);
    assert_eq!(log[1], "rm pidrone_pkg");
    assert_eq!(log[2], "rm-missing");
    assert!(log[3].starts_with("create "), "unexpected log: {:?}", log);
    assert_eq!(log[4], "start --attach --interactive pidrone_pkg");
}

#[test]
fn build_passes_exactly_four_host_build_args() {
    let dir = tempfile::tempdir().unwrap();
    fake_runtime(dir.path());

    task("build", dir.path()).assert().success();

    let log = read_log(dir.path());
    let build = &log[0];
    assert_eq!(build.matches("--build-arg").count(), 4, "line: {}", build);
    for key in &["hostuid=", "hostgid=", "hostuser=", "hostgroup="] {
        assert!(build.contains(key), "missing {} in: {}", key, build);
    }
    assert!(build.contains("--tag pidrone_pkg:ente"));
    assert!(build.ends_with(" ."));
}

#[test]
fn create_reports_the_short_container_id() {
    let dir = tempfile::tempdir().unwrap();
    fake_runtime(dir.path());

    let assert = task("create", dir.path()).assert().success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(stdout.contains("(50b70d3e3d7f)"), "stdout: {}", stdout);
}

#[test]
fn a_second_create_removes_the_first_container() {
    let dir = tempfile::tempdir().unwrap();
    fake_runtime(dir.path());

    task("create", dir.path()).assert().success();
    task("create", dir.path()).assert().success();

    let log = read_log(dir.path());
    let outcomes: Vec<&str> = log
        .iter()
        .filter(|line| line.starts_with("rm-"))
        .map(String::as_str)
        .collect();
    assert_eq!(outcomes, ["rm-missing", "rm-ok"]);
}

#[test]
fn run_fails_when_no_container_exists() {
    let dir = tempfile::tempdir().unwrap();
    fake_runtime(dir.path());

    task("run", dir.path()).assert().failure().code(1);
}

#[test]
fn run_mirrors_the_container_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    fake_runtime(dir.path());

    task("create", dir.path()).assert().success();
    fs::write(dir.path().join("exit_code"), "42\n").unwrap();

    task("run", dir.path()).assert().failure().code(42);
}

#[test]
fn help_lists_the_three_tasks() {
    let assert = cargo_bin_cmd!("pidrone-dev").arg("--help").assert().success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 help");
    for name in &["build", "create", "run"] {
        assert!(output.contains(name), "help missing {}: {}", name, output);
    }
}
