//! # appkit-validation
//!
//! Validated DTOs for untrusted input.
//!
//! - **Issues** - `Issue`, `IssuePath`, `format_issues`
//! - **Errors** - `ValidationError`, `DtoResult`
//! - **Schemas** - the `Schema` seam, `JsonSchemaValidator` (`jsonschema`), and
//!   `TypedSchema` for types deriving `schemars::JsonSchema`
//! - **DTOs** - `validate`, the `Dto` trait, `DtoValidator`
//!
//! ## Failure model
//!
//! Input that does not match a schema is an expected outcome and comes back
//! as `Ok(Err(ValidationError))`. Any other failure raised while parsing is
//! the schema's `Fault` and is returned as `Err(fault)` without wrapping.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use appkit_shared::{JsonObject, JsonValue};

// =============================================================================
// VALIDATION MODULES
// =============================================================================

pub mod dto;
pub mod error;
pub mod issue;
pub mod json_schema;
pub mod schema;
pub mod typed;

pub use dto::{Dto, DtoFault, DtoResult, DtoValidator, FormatOptions, validate, validate_with};
pub use error::{Cause, ValidationError};
pub use issue::{
    Issue, IssueCode, IssuePath, IssuePathMode, PathSegment, UnknownIssuePathMode, format_issues,
    format_issues_with,
};
pub use json_schema::{CompileError, JsonSchemaValidator};
pub use schema::{Map, ParseError, Schema, SchemaExt, SchemaFailure, SchemaFault};
pub use typed::TypedSchema;

/// Returns the validation crate version.
#[must_use]
pub const fn validation_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
