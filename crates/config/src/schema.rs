//! Configuration schema types and helpers.
//!
//! Config documents are checked against the JSON Schema derived from
//! [`AppkitConfig`], the same path DTOs take, so a bad file reports every
//! offending key at once.

use appkit_shared::{ErrorCode, ErrorEnvelope, JsonValue};
use appkit_validation::{
    Dto, DtoValidator, FormatOptions, IssuePathMode, TypedSchema, ValidationError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// How validation failures are formatted and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidationConfig {
    /// Path rendering in formatted messages.
    pub issue_path: IssuePathMode,
    /// Emit a debug event for rejected input.
    pub log_rejections: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            issue_path: IssuePathMode::FirstSegment,
            log_rejections: true,
        }
    }
}

impl ValidationConfig {
    /// Formatting options derived from this config.
    #[must_use]
    pub const fn format_options(&self) -> FormatOptions {
        FormatOptions::with_path_mode(self.issue_path)
    }

    /// Validator configured from this config.
    #[must_use]
    pub const fn validator(&self) -> DtoValidator {
        DtoValidator::new(self.format_options()).with_rejection_logging(self.log_rejections)
    }
}

impl From<&ValidationConfig> for DtoValidator {
    fn from(config: &ValidationConfig) -> Self {
        config.validator()
    }
}

/// Root config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct AppkitConfig {
    /// Schema version.
    #[schemars(range(min = 1, max = 1))]
    pub version: u32,
    /// Validation settings.
    pub validation: ValidationConfig,
}

impl Default for AppkitConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            validation: ValidationConfig::default(),
        }
    }
}

impl Dto for AppkitConfig {
    type Schema = TypedSchema<Self>;

    fn schema() -> Self::Schema {
        TypedSchema::new()
    }
}

/// JSON Schema of the config document, as published for editors and tooling.
pub fn config_json_schema() -> Result<JsonValue, ErrorEnvelope> {
    AppkitConfig::schema()
        .validator()
        .map(|validator| validator.document().clone())
        .map_err(|error| {
            ErrorEnvelope::invariant(
                ErrorCode::new("validation", "invalid_schema"),
                error.to_string(),
            )
        })
}

/// Validate a parsed config document.
pub fn validate_config_value(document: &JsonValue) -> Result<AppkitConfig, ErrorEnvelope> {
    let outcome = AppkitConfig::from_value(document).map_err(ErrorEnvelope::from)?;
    outcome.map_err(invalid_config)
}

/// Parse and validate config JSON.
pub fn parse_config_json(input: &str) -> Result<AppkitConfig, ErrorEnvelope> {
    let document: JsonValue = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
        .with_metadata("source", "config")
    })?;
    validate_config_value(&document)
}

/// Parse and validate config TOML.
pub fn parse_config_toml(input: &str) -> Result<AppkitConfig, ErrorEnvelope> {
    let document: JsonValue = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
        .with_metadata("source", "config")
    })?;
    validate_config_value(&document)
}

fn invalid_config(error: ValidationError) -> ErrorEnvelope {
    let fields: Vec<String> = error
        .issues()
        .iter()
        .map(|issue| issue.path.render(IssuePathMode::FullPath))
        .collect();

    ErrorEnvelope::expected(
        ErrorCode::new("config", "invalid_config"),
        format!("invalid config: {error}"),
    )
    .with_metadata("fields", fields.join(","))
}
