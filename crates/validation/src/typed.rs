//! JSON Schema validation bound to a Rust output type.

use crate::issue::Issue;
use crate::json_schema::{CompileError, JsonSchemaValidator, canonicalize_integers};
use crate::schema::{ParseError, Schema, SchemaFailure, SchemaFault};
use appkit_shared::JsonValue;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::fmt;

type Refinement<T> = Box<dyn Fn(&T) -> Option<Issue> + Send + Sync>;

/// Validates input against a JSON Schema, decodes it into `T`, then refines.
///
/// The schema is usually derived from `T` with `schemars`, so serde and
/// validation attributes live on the type itself. Refinements run only when
/// the schema accepted the input, and all of them run, so their issues are
/// reported together.
pub struct TypedSchema<T> {
    compiled: Result<JsonSchemaValidator, CompileError>,
    refinements: Vec<Refinement<T>>,
}

impl<T: JsonSchema> Default for TypedSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: JsonSchema> TypedSchema<T> {
    /// Use the schema `schemars` derives for `T`.
    pub fn new() -> Self {
        Self::from_compiled(JsonSchemaValidator::for_type::<T>())
    }
}

impl<T> TypedSchema<T> {
    /// Bind a hand-written JSON Schema document to `T`.
    pub fn from_document(document: JsonValue) -> Self {
        Self::from_compiled(JsonSchemaValidator::compile(
            document,
            std::any::type_name::<T>(),
        ))
    }

    fn from_compiled(compiled: Result<JsonSchemaValidator, CompileError>) -> Self {
        Self {
            compiled,
            refinements: Vec::new(),
        }
    }

    /// Add a cross-field check on the decoded value.
    #[must_use]
    pub fn refine<F>(mut self, check: F) -> Self
    where
        F: Fn(&T) -> Option<Issue> + Send + Sync + 'static,
    {
        self.refinements.push(Box::new(check));
        self
    }

    /// The compiled validator, or why the document did not compile.
    pub const fn validator(&self) -> Result<&JsonSchemaValidator, &CompileError> {
        self.compiled.as_ref()
    }
}

impl<T: DeserializeOwned> Schema for TypedSchema<T> {
    type Output = T;
    type Fault = SchemaFault;

    fn parse(&self, data: &JsonValue) -> Result<T, ParseError<SchemaFault>> {
        let validator = self
            .compiled
            .as_ref()
            .map_err(|error| ParseError::Fault(SchemaFault::Compile(error.clone())))?;
        validator.check(data)?;

        let mut accepted = data.clone();
        canonicalize_integers(&mut accepted);
        let value: T = serde_json::from_value(accepted).map_err(|source| {
            ParseError::Fault(SchemaFault::Decode {
                target: std::any::type_name::<T>(),
                source,
            })
        })?;

        let issues: Vec<Issue> = self
            .refinements
            .iter()
            .filter_map(|refinement| refinement(&value))
            .collect();
        if issues.is_empty() {
            Ok(value)
        } else {
            Err(SchemaFailure::new(issues).into())
        }
    }
}

impl<T> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TypedSchema")
            .field("target", &std::any::type_name::<T>())
            .field("compiled", &self.compiled.is_ok())
            .field("refinements", &self.refinements.len())
            .finish()
    }
}
