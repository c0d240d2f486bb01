use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// `pew` with an empty configuration file and a private `PATH`.
fn pew(root: &TempDir) -> Command {
    let config = root.path().join("config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let bin = root.path().join("bin");
    fs::create_dir_all(&bin).unwrap();

    let mut cmd = Command::cargo_bin("pew").unwrap();
    cmd.env("PEW_CONFIG", &config)
        .env("PATH", &bin)
        .env_remove("PEW_LOG")
        .current_dir(root.path());
    cmd
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[cfg(unix)]
fn script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_banner_without_command() {
    let root = tempfile::tempdir().unwrap();
    let output = pew(&root).output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("the program execution wrapper"));
}

#[test]
fn test_unknown_command_exits_127() {
    let root = tempfile::tempdir().unwrap();
    let output = pew(&root)
        .args(["--modules", "same-dir", "definitely-missing-cmd-xyz", "-O2"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(127));
    assert!(stderr(&output).contains("definitely-missing-cmd-xyz: command not found"));
}

#[test]
fn test_missing_nix_hints_and_passes_through() {
    let root = tempfile::tempdir().unwrap();
    let output = pew(&root).args(["gcc", "-O2", "main.c"]).output().unwrap();

    assert_eq!(output.status.code(), Some(127));
    let err = stderr(&output);
    assert!(err.contains("match NixResolver"));
    assert!(err.contains("pew nix"));
}

#[test]
fn test_unknown_module_is_usage_error() {
    let root = tempfile::tempdir().unwrap();
    let output = pew(&root).args(["--modules", "apt", "ls"]).output().unwrap();

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_malformed_config_exits_1() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("config.toml"), "modules = [").unwrap();
    let output = pew(&root).arg("ls").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("config.toml"));
}

#[test]
fn test_missing_explicit_config_exits_1() {
    let root = tempfile::tempdir().unwrap();
    let output = pew(&root)
        .args(["--config", "nowhere.toml", "ls"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_completions() {
    let root = tempfile::tempdir().unwrap();
    let output = pew(&root).args(["--completions", "bash"]).output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("pew"));
}

#[cfg(unix)]
#[test]
fn test_same_dir_executable_runs() {
    let root = tempfile::tempdir().unwrap();
    script(&root.path().join("foo"), r#"echo "hello $1""#);

    let output = pew(&root).args(["foo", "world"]).output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hello world\n");
    assert!(stderr(&output).contains("./foo world"));
}

#[cfg(unix)]
#[test]
fn test_exit_status_forwarded() {
    let root = tempfile::tempdir().unwrap();
    script(&root.path().join("fail"), "exit 3");

    let output = pew(&root).arg("fail").output().unwrap();

    assert_eq!(output.status.code(), Some(3));
}

#[cfg(unix)]
#[test]
fn test_config_module_order() {
    let root = tempfile::tempdir().unwrap();
    script(&root.path().join("foo"), "exit 0");
    fs::write(root.path().join("config.toml"), r#"modules = ["nix"]"#).unwrap();

    let output = pew(&root).arg("foo").output().unwrap();

    // the same-dir rewrite is disabled, so PATH lookup fails
    assert_eq!(output.status.code(), Some(127));
    assert!(!stderr(&output).contains("SameDirExecutable"));
}
