//! Config loading helpers (env + file).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::env::{ValidationEnv, apply_env_overrides};
use crate::schema::{AppkitConfig, parse_config_json, parse_config_toml};
use appkit_shared::{ErrorCode, ErrorEnvelope};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    const fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

/// Load the config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`ValidationEnv`)
/// - config JSON (file content)
/// - defaults (`AppkitConfig::default()`)
pub fn load_config_from_sources(
    config_json: Option<&str>,
    env: &ValidationEnv,
) -> Result<AppkitConfig, ErrorEnvelope> {
    let config = match config_json {
        None => AppkitConfig::default(),
        Some(input) => parse_config_json(input)?,
    };

    Ok(resolve(config, env))
}

/// Load the config from an optional file path (`.json` or `.toml`).
pub fn load_config_from_path(
    config_path: Option<&Path>,
    env: &ValidationEnv,
) -> Result<AppkitConfig, ErrorEnvelope> {
    let config = match config_path {
        None => AppkitConfig::default(),
        Some(path) => {
            let format = detect_config_format(path)?;
            let config_text = read_config_file(path)?;
            debug!(
                path = %path.display(),
                format = format.label(),
                "read config file"
            );
            let parsed = match format {
                ConfigFormat::Json => parse_config_json(&config_text),
                ConfigFormat::Toml => parse_config_toml(&config_text),
            };
            parsed.map_err(|error| error.with_metadata("path", path.to_string_lossy()))?
        },
    };

    Ok(resolve(config, env))
}

/// Load the config from std env and an optional file path.
pub fn load_config_std_env(config_path: Option<&Path>) -> Result<AppkitConfig, ErrorEnvelope> {
    let env = ValidationEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_config_from_path(config_path, &env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &AppkitConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &AppkitConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn resolve(config: AppkitConfig, env: &ValidationEnv) -> AppkitConfig {
    let config = apply_env_overrides(config, env);
    debug!(
        issue_path = %config.validation.issue_path,
        log_rejections = config.validation.log_rejections,
        env_overrides = !env.is_empty(),
        "resolved validation config"
    );
    config
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "read_failed"),
            format!("failed to read config file: {error}"),
        )
        .with_metadata("path", path.to_string_lossy())
        .with_metadata("io_kind", format!("{:?}", error.kind()))
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other)),
    }
}
