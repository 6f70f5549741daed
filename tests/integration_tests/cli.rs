//! Command line surface.

use crate::common::{promptline_command, stdout};

#[test]
fn test_help_lists_subcommands() {
    let output = promptline_command().arg("--help").output().unwrap();
    assert!(output.status.success());
    let help = stdout(&output);
    for subcommand in ["prompt", "branch", "venv", "path", "parse", "explain"] {
        assert!(help.contains(subcommand), "missing {subcommand}:\n{help}");
    }
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "segments = [\"clock\"]\n").unwrap();

    let output = promptline_command()
        .env("PROMPTLINE_CONFIG_PATH", &config_path)
        .arg("path")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"), "{stderr}");
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let output = promptline_command()
        .current_dir(dir.path())
        .args(["-v", "--color", "never", "path"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Loading config from"), "{stderr}");
}
