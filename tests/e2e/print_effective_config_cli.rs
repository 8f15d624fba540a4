//! E2E tests for the `print_effective_config` binary.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::Command;

fn fixture_path(relative: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative)
}

fn command() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_print_effective_config"));
    command
        .env_remove("APPKIT_VALIDATION_ISSUE_PATH")
        .env_remove("APPKIT_VALIDATION_LOG_REJECTIONS");
    command
}

#[test]
fn prints_defaults_as_json() -> Result<(), Box<dyn Error>> {
    let output = command().output()?;
    assert!(output.status.success());

    let printed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(printed["version"], 1);
    assert_eq!(printed["validation"]["issuePath"], "first_segment");
    assert_eq!(printed["validation"]["logRejections"], true);
    Ok(())
}

#[test]
fn env_overrides_reach_the_toml_output() -> Result<(), Box<dyn Error>> {
    let output = command()
        .arg(fixture_path("config/appkit.valid.json"))
        .arg("--toml")
        .env("APPKIT_VALIDATION_LOG_REJECTIONS", "on")
        .output()?;
    assert!(output.status.success());

    let printed = String::from_utf8(output.stdout)?;
    assert!(printed.contains("issuePath = \"full_path\""));
    assert!(printed.contains("logRejections = true"));
    Ok(())
}

#[test]
fn invalid_files_exit_with_an_error() -> Result<(), Box<dyn Error>> {
    let output = command()
        .arg(fixture_path("config/appkit.invalid.json"))
        .output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("invalid config"));
    Ok(())
}
