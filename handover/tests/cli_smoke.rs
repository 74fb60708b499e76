//! Binary smoke tests for the `handover` CLI.
//!
//! The docker executable is replaced with `sh`, run from a temp directory
//! that holds a script named `inspect`. `sh inspect <id>` then plays the
//! part of `docker inspect <id>` without needing a Docker daemon.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const RUNNING: &str = r#"[{
    "NetworkSettings": {
        "IPAddress": "172.17.0.3",
        "Ports": {
            "443/tcp": null,
            "80/tcp": [{"HostIp": "0.0.0.0", "HostPort": "49154"}]
        }
    },
    "State": {"Paused": false, "Running": true}
}]"#;

/// Helper: temp dir whose `inspect` script prints `body` to stdout.
fn fake_docker(body: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("inspect"), body).unwrap();
    dir
}

fn printing(json: &str) -> String {
    format!("cat <<'JSON'\n{json}\nJSON\n")
}

#[allow(deprecated)] // cargo_bin works fine for our use case
fn handover(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("handover").unwrap();
    cmd.current_dir(dir.path())
        .env("HANDOVER_DIR", dir.path())
        .env("HANDOVER_DOCKER", "sh")
        .env_remove("HANDOVER_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

// ── Help ────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_flags() {
    let dir = fake_docker("");
    handover(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--id"))
        .stdout(predicate::str::contains("--verbose"));
}

// ── Success ─────────────────────────────────────────────────────────────────

#[test]
fn running_container_prints_ip_and_ports() {
    let dir = fake_docker(&printing(RUNNING));
    handover(&dir)
        .args(["-i", "web"])
        .assert()
        .success()
        .stdout("ip: 172.17.0.3\nport: 80/tcp -> 49154\n");
}

#[test]
fn verbose_logs_the_command() {
    let dir = fake_docker(&printing(RUNNING));
    handover(&dir)
        .args(["--id", "web", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("running: sh inspect web"));
}

#[test]
fn config_file_selects_program() {
    let dir = fake_docker(&printing(RUNNING));
    fs::write(dir.path().join("config"), "docker=sh\n").unwrap();
    handover(&dir)
        .env_remove("HANDOVER_DOCKER")
        .args(["-i", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ip: 172.17.0.3"));
}

// ── Failures ────────────────────────────────────────────────────────────────

#[test]
fn missing_id_fails_without_running_docker() {
    // The script would print a valid record, so success here would mean the
    // id check was skipped.
    let dir = fake_docker(&printing(RUNNING));
    handover(&dir)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("docker container id not set"));
}

#[test]
fn paused_container_fails() {
    let dir = fake_docker(&printing(r#"[{"State": {"Paused": true, "Running": true}}]"#));
    handover(&dir)
        .args(["-i", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not running"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn unknown_container_fails_with_id() {
    let dir = fake_docker(&printing("[]"));
    handover(&dir)
        .args(["-i", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found: ghost"));
}

#[test]
fn docker_error_is_reported_with_stderr() {
    let dir = fake_docker("echo 'Error: No such object: ghost' >&2\nexit 1\n");
    handover(&dir)
        .args(["-i", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error running external command: sh"))
        .stderr(predicate::str::contains("No such object: ghost"));
}

#[test]
fn ambiguous_port_fails() {
    let dir = fake_docker(&printing(
        r#"[{"NetworkSettings": {"Ports": {"81/tcp": [{"HostPort": "1"}, {"HostPort": "2"}]}},
            "State": {"Running": true}}]"#,
    ));
    handover(&dir)
        .args(["-i", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("81/tcp"));
}

#[test]
fn slow_docker_times_out() {
    let dir = fake_docker("sleep 5\necho late\n");
    handover(&dir)
        .env("HANDOVER_TIMEOUT", "1")
        .args(["-i", "web"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timed out after 1s"));
}
