//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a variable that is present but empty or
//! unparseable fails the load instead of being ignored.

use crate::schema::{AppkitConfig, ValidationConfig};
use appkit_shared::{ErrorCode, ErrorEnvelope};
use appkit_validation::IssuePathMode;
use std::collections::BTreeMap;

/// Prefix shared by every appkit env var.
pub const ENV_PREFIX: &str = "APPKIT_";
/// Env var: issue path rendering (`first_segment` or `full_path`).
pub const ENV_VALIDATION_ISSUE_PATH: &str = "APPKIT_VALIDATION_ISSUE_PATH";
/// Env var: emit debug events for rejected input.
pub const ENV_VALIDATION_LOG_REJECTIONS: &str = "APPKIT_VALIDATION_LOG_REJECTIONS";

const KNOWN_VARS: [&str; 2] = [ENV_VALIDATION_ISSUE_PATH, ENV_VALIDATION_LOG_REJECTIONS];

/// Parsed env overrides. `None` means the variable was not set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationEnv {
    /// Override for [`ValidationConfig::issue_path`].
    pub issue_path: Option<IssuePathMode>,
    /// Override for [`ValidationConfig::log_rejections`].
    pub log_rejections: Option<bool>,
}

impl ValidationEnv {
    /// Parse env overrides from a name/value map.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            issue_path: parse_optional_issue_path(map, ENV_VALIDATION_ISSUE_PATH)?,
            log_rejections: parse_optional_bool(map, ENV_VALIDATION_LOG_REJECTIONS)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in KNOWN_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_owned(), value);
            }
        }
        Self::from_map(&map)
    }

    /// Returns true when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.issue_path.is_none() && self.log_rejections.is_none()
    }
}

/// Apply env overrides on top of a loaded config.
#[must_use]
pub fn apply_env_overrides(mut config: AppkitConfig, env: &ValidationEnv) -> AppkitConfig {
    let ValidationConfig {
        issue_path,
        log_rejections,
    } = config.validation;

    config.validation = ValidationConfig {
        issue_path: env.issue_path.unwrap_or(issue_path),
        log_rejections: env.log_rejections.unwrap_or(log_rejections),
    };
    config
}

/// Failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    #[error("{var} must be non-empty")]
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    #[error("{var} must be a boolean")]
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    #[error("{var} has an unsupported value")]
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    /// Name of the offending variable.
    #[must_use]
    pub const fn var(&self) -> &'static str {
        match self {
            Self::EmptyValue { var }
            | Self::InvalidBool { var, .. }
            | Self::InvalidEnum { var, .. } => *var,
        }
    }
}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let envelope = Self::expected(ErrorCode::new("config", "invalid_env"), error.to_string())
            .with_metadata("env_var", error.var());

        match error {
            EnvParseError::EmptyValue { .. } => envelope,
            EnvParseError::InvalidBool { value, .. } | EnvParseError::InvalidEnum { value, .. } => {
                envelope.with_metadata("value", value)
            },
        }
    }
}

fn non_empty<'a>(
    map: &'a BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<&'a str>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    Ok(Some(trimmed))
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(trimmed) = non_empty(map, var)? else {
        return Ok(None);
    };

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: trimmed.to_owned(),
        }),
    }
}

fn parse_optional_issue_path(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<IssuePathMode>, EnvParseError> {
    let Some(trimmed) = non_empty(map, var)? else {
        return Ok(None);
    };

    trimmed
        .parse()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidEnum {
            var,
            value: trimmed.to_owned(),
        })
}
