//! Config-driven validation E2E tests: file + env resolve into a validator.

use appkit::{
    ErrorCode, IssuePathMode, ValidationEnv, load_config_from_path, load_config_from_sources,
    validator_from_config,
};
use appkit_testkit::fixtures::Profile;
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn fixture_path(relative: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative)
}

fn invalid_profile() -> serde_json::Value {
    json!({
        "email": "ada@example.com",
        "address": { "street": "1 Loop Rd", "city": 42 },
        "tags": []
    })
}

#[test]
fn file_config_controls_issue_paths() -> Result<(), Box<dyn Error>> {
    let path = fixture_path("config/appkit.valid.toml");
    let validator = validator_from_config(Some(&path), &ValidationEnv::default())?;

    assert!(!validator.logs_rejections());
    let Err(error) = validator.parse::<Profile>(&invalid_profile())? else {
        return Err("expected rejection".into());
    };
    assert_eq!(
        error.message(),
        "['address.city' -> Expected string, received number]"
    );
    Ok(())
}

#[test]
fn env_overrides_win_over_the_file() -> Result<(), Box<dyn Error>> {
    let mut vars = BTreeMap::new();
    vars.insert(
        "APPKIT_VALIDATION_ISSUE_PATH".to_owned(),
        "first_segment".to_owned(),
    );
    let env = ValidationEnv::from_map(&vars)?;

    let path = fixture_path("config/appkit.valid.json");
    let validator = validator_from_config(Some(&path), &env)?;

    let Err(error) = validator.parse::<Profile>(&invalid_profile())? else {
        return Err("expected rejection".into());
    };
    assert_eq!(
        error.message(),
        "['address' -> Expected string, received number]"
    );
    Ok(())
}

#[test]
fn missing_sources_fall_back_to_defaults() -> Result<(), Box<dyn Error>> {
    let config = load_config_from_sources(None, &ValidationEnv::default())?;

    assert_eq!(config.validation.issue_path, IssuePathMode::FirstSegment);
    assert!(config.validation.log_rejections);
    Ok(())
}

#[test]
fn invalid_config_files_are_rejected_before_use() {
    let path = fixture_path("config/appkit.invalid.json");
    let error = load_config_from_path(Some(&path), &ValidationEnv::default()).err();

    assert_eq!(
        error.map(|error| error.code),
        Some(ErrorCode::new("config", "invalid_config"))
    );
}
