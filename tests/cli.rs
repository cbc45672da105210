//! Exit status and diagnostics of the `deploy-cfg` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SVC: &str =
    "[svc]\nport = 8080 # http\nserver-threads = 4\nmin-memory = 64\nmax-memory = 512\n";

fn deploy_cfg_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("deploy-cfg");
    cmd.current_dir(dir).env_remove("DEPLOY_CFG_ENV_PREFIX");
    cmd
}

fn write_cfg(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("deploy.cfg");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn resolve_prints_values_and_exits_zero() {
    let dir = TempDir::new().unwrap();
    let cfg = write_cfg(&dir, SVC);

    deploy_cfg_cmd(dir.path())
        .args(["resolve", "-s", "svc", "-r", "port", "-r", "max-memory", "--set", "port=9090"])
        .arg("-c")
        .arg(&cfg)
        .assert()
        .success()
        .stdout("port=9090\nmax-memory=512\n");
}

#[test]
fn missing_section_exits_one_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    let cfg = write_cfg(&dir, SVC);

    deploy_cfg_cmd(dir.path())
        .args(["resolve", "-s", "other", "-r", "port"])
        .arg("-c")
        .arg(&cfg)
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("no [other] section"))
        .stderr(predicate::str::contains(cfg.display().to_string()));
}

#[test]
fn missing_config_file_exits_one() {
    let dir = TempDir::new().unwrap();

    deploy_cfg_cmd(dir.path())
        .args(["resolve", "-c", "absent.cfg", "-s", "svc", "-r", "port"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absent.cfg"));
}

#[test]
fn server_scripts_missing_key_exits_one_without_writing() {
    let dir = TempDir::new().unwrap();
    let cfg = write_cfg(&dir, "[svc]\nport = 8080\nserver-threads = 4\nmax-memory = 512\n");

    deploy_cfg_cmd(dir.path())
        .args(["server-scripts", "/srv/svc", "/srv/svc/svc.war"])
        .arg(dir.path())
        .arg("/usr/lib/jvm/java")
        .arg(&cfg)
        .args(["/glassfish/bin/asadmin", "svc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("min-memory"))
        .stderr(predicate::str::contains(cfg.display().to_string()));

    assert!(!dir.path().join("start_service").exists());
    assert!(!dir.path().join("stop_service").exists());
}

#[test]
fn server_scripts_writes_both_scripts() {
    let dir = TempDir::new().unwrap();
    let cfg = write_cfg(&dir, SVC);

    deploy_cfg_cmd(dir.path())
        .args(["server-scripts", "/srv/svc", "/srv/svc/svc.war"])
        .arg(dir.path())
        .arg("/usr/lib/jvm/java")
        .arg(&cfg)
        .args(["/glassfish/bin/asadmin", "svc", "9090"])
        .assert()
        .success();

    let start = std::fs::read_to_string(dir.path().join("start_service")).unwrap();
    assert!(start.contains("--port 9090 --threads 4 --Xms 64 --Xmx 512"));
    assert!(dir.path().join("stop_service").is_file());
}

#[test]
fn test_runner_writes_script_next_to_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("test.cfg"),
        "[NarrativeMethodStoreTest]\ntest.temp-dir = /tmp/nms\n",
    )
    .unwrap();

    deploy_cfg_cmd(dir.path())
        .args(["test-runner", "test.cfg"])
        .assert()
        .success();

    let script = std::fs::read_to_string(dir.path().join("run_tests.sh")).unwrap();
    assert_eq!(
        script,
        "# Generated file - do not check into git\nant test -Dtest.temp-dir=/tmp/nms\n"
    );
}
