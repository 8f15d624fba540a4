//! Error envelope fixtures.

use appkit_shared::{ErrorCode, ErrorEnvelope};

/// Every error code the workspace emits.
pub fn emitted_error_codes() -> Vec<ErrorCode> {
    [
        ("validation", "invalid_input"),
        ("validation", "schema_mismatch"),
        ("validation", "invalid_schema"),
        ("appkit", "internal"),
        ("config", "invalid_json"),
        ("config", "invalid_toml"),
        ("config", "invalid_config"),
        ("config", "invalid_env"),
        ("config", "read_failed"),
        ("config", "unsupported_format"),
        ("config", "serialize_toml"),
        ("domain", "invalid_entity_id"),
        ("domain", "invalid_timestamp"),
    ]
    .into_iter()
    .map(|(namespace, code)| ErrorCode::new(namespace, code))
    .collect()
}

/// An expected rejection, as a validator would report it.
pub fn rejected_input_error() -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::invalid_input(), "['name' -> Required]")
        .with_metadata("issue_count", "1")
        .with_metadata("fields", "name")
}

/// An internal error fixture.
pub fn internal_error() -> ErrorEnvelope {
    ErrorEnvelope::unexpected(ErrorCode::internal(), "internal failure")
}
