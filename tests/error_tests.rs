//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;

fn clipsync_bin(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("clipsync").expect("binary should be built");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("CLIPSYNC_INTERVAL");
    cmd
}

#[test]
fn invalid_interval_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    clipsync_bin(&home)
        .args(["--interval", "soon", "--display", ":99"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid interval"));
}

#[test]
fn invalid_interval_from_env_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    clipsync_bin(&home)
        .env("CLIPSYNC_INTERVAL", "-1s")
        .args(["--display", ":99"])
        .assert()
        .code(2);
}

#[test]
fn unknown_selection_flag_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    clipsync_bin(&home)
        .args(["--selection", "tertiary"])
        .assert()
        .code(2);
}

#[test]
fn invalid_mode_in_config_file() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("bad.toml");
    std::fs::write(&config, "mode = \"sideways\"\n").unwrap();

    clipsync_bin(&home)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("mode"));
}

#[test]
fn missing_tool_is_fatal() {
    let home = tempfile::tempdir().unwrap();
    // Nothing on PATH, not even `which`
    clipsync_bin(&home)
        .env("PATH", home.path())
        .args(["--display", ":99"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("xclip not found in PATH"));
}

#[test]
fn missing_display_is_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let home = tempfile::tempdir().unwrap();
    let bin = home.path().join("bin");
    std::fs::create_dir(&bin).unwrap();
    for tool in ["xclip", "wl-copy"] {
        let path = bin.join(tool);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    clipsync_bin(&home)
        .env("PATH", format!("{}:/usr/bin:/bin", bin.display()))
        .env_remove("DISPLAY")
        .arg("--poll")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("DISPLAY"));
}
