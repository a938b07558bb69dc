//! Exit status and output of the installed binaries.
//!
//! Every run uses the null backend with no idle time and a scratch working
//! directory, so no display and no stray config file is involved.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const VIDPROBE: &str = env!("CARGO_BIN_EXE_vidprobe");
const VIDPROBE_GL: &str = env!("CARGO_BIN_EXE_vidprobe-gl");

fn run_in(dir: &Path, exe: &str, args: &[&str]) -> Output {
    Command::new(exe)
        .current_dir(dir)
        .args(["--driver", "null", "--idle", "0"])
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn raster_run_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), VIDPROBE, &[]);

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("All resolutions available."));
    assert!(text.contains("The current video surface width is 1024\n"));
    assert!(text.contains("The current video surface height is 768\n"));
    assert!(text.contains("The video driver name is null\n"));
    assert!(text.ends_with("Successfully done.\n"));
}

#[test]
fn gl_binary_defaults_to_accelerated_policy() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), VIDPROBE_GL, &[]);

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("The current video surface width is 800\n"));
    assert!(text.contains("The current video surface height is 600\n"));
}

#[test]
fn policy_flag_selects_gl_on_main_binary() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), VIDPROBE, &["--policy", "gl"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("The current video surface width is 800\n"));
}

#[test]
fn invalid_resolution_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), VIDPROBE, &["--res", "bogus"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid resolution format"));
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_config_dir_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let output = run_in(dir.path(), VIDPROBE, &["--configdir", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn config_file_selects_gl_policy() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("vidprobe.cfg"), "policy = gl\ngl.res = 640x480\n").unwrap();
    let output = run_in(
        dir.path(),
        VIDPROBE,
        &["--configdir", dir.path().to_str().unwrap(), "--loglevel", "debug"],
    );

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("The current video surface width is 640\n"));
    assert!(text.contains("The current video surface height is 480\n"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("vidprobe OpenGL test window"));
}

#[test]
fn gl_help_names_its_own_binary() {
    let output = Command::new(VIDPROBE_GL).arg("--help").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage: vidprobe-gl"));
}
