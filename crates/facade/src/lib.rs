//! # appkit
//!
//! Facade API for consumers of the appkit building blocks.
//! This crate depends on `shared`, `validation`, `domain`, and `config`.

use std::path::Path;
use tracing::debug;

/// Shared error envelope and type utilities.
pub use appkit_shared::{
    EmptyObject, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata, ExtractResultError,
    ExtractResultValue, JsonObject, JsonValue, Result, ResultValue, Unit, UnitResult,
    assert_unreachable, assert_unreachable_passthrough, unit_ok,
};

/// Validated DTOs, issues, and the JSON Schema engine.
pub use appkit_validation::{
    CompileError, Dto, DtoFault, DtoResult, DtoValidator, FormatOptions, Issue, IssueCode,
    IssuePath, IssuePathMode, JsonSchemaValidator, Map, ParseError, PathSegment, Schema,
    SchemaExt, SchemaFailure, SchemaFault, TypedSchema, ValidationError, format_issues,
    format_issues_with, validate, validate_with,
};

/// Base entity model.
pub use appkit_domain::{
    BaseEntity, Entity, EntityId, PrimitiveError, SerializedEntity, SerializedEntitySchema,
};

/// Validation configuration.
pub use appkit_config::{
    AppkitConfig, EnvParseError, ValidationConfig, ValidationEnv, load_config_from_path,
    load_config_from_sources, load_config_std_env,
};

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Build a validator from the effective config (defaults, optional file, then env).
pub fn validator_from_config(
    config_path: Option<&Path>,
    env: &ValidationEnv,
) -> Result<DtoValidator> {
    let config = load_config_from_path(config_path, env)?;
    debug!(
        configured = config_path.is_some(),
        issue_path = %config.validation.issue_path,
        "built validator from config"
    );
    Ok(config.validation.validator())
}

/// Rehydrate an entity from untrusted JSON text, surfacing rejections as
/// expected envelopes.
pub fn rehydrate_entity(input_json: &str) -> Result<BaseEntity> {
    let serialized = SerializedEntity::from_json(input_json)
        .map_err(ErrorEnvelope::from)?
        .map_err(ErrorEnvelope::from)?;
    Ok(BaseEntity::from_serialized(serialized))
}
