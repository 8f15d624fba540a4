//! JSON Schema backed validation.
//!
//! Documents are compiled with `jsonschema` (draft 2020-12); Rust types get
//! theirs from `schemars`. Every error the engine reports becomes an
//! [`Issue`] whose path is resolved against the validated input.

use crate::issue::{Issue, IssueCode, IssuePath, PathSegment};
use crate::schema::{ParseError, Schema, SchemaFailure};
use appkit_shared::JsonValue;
use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::{Draft, ValidationError, Validator};
use schemars::JsonSchema;
use serde_json::{Map, Number};
use std::convert::Infallible;
use std::fmt;

/// A schema document that failed to compile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("schema for `{target}` does not compile: {message}")]
pub struct CompileError {
    /// Type (or document) the schema was built for.
    pub target: &'static str,
    /// Compiler message.
    pub message: String,
}

/// Compiled JSON Schema document.
///
/// As a [`Schema`] it returns the input unchanged when it conforms.
pub struct JsonSchemaValidator {
    target: &'static str,
    document: JsonValue,
    validator: Validator,
}

impl JsonSchemaValidator {
    /// Compile a hand-written document.
    pub fn new(document: JsonValue) -> Result<Self, CompileError> {
        Self::compile(document, std::any::type_name::<JsonValue>())
    }

    /// Compile the document `schemars` derives for `T`.
    ///
    /// Integer formats (`int64`, `uint32`, ...) get explicit bounds so a value
    /// the target integer cannot hold is reported as an issue.
    pub fn for_type<T: JsonSchema>() -> Result<Self, CompileError> {
        let target = std::any::type_name::<T>();
        let mut document =
            serde_json::to_value(schemars::schema_for!(T)).map_err(|error| CompileError {
                target,
                message: error.to_string(),
            })?;
        bound_integer_formats(&mut document);
        Self::compile(document, target)
    }

    pub(crate) fn compile(document: JsonValue, target: &'static str) -> Result<Self, CompileError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&document)
            .map_err(|error| CompileError {
                target,
                message: error.to_string(),
            })?;
        Ok(Self {
            target,
            document,
            validator,
        })
    }

    /// Recompile with the named root properties no longer required.
    ///
    /// Other constraints on those properties still apply when they are present.
    pub fn partial_by<'k>(
        &self,
        keys: impl IntoIterator<Item = &'k str>,
    ) -> Result<Self, CompileError> {
        let keys: Vec<&str> = keys.into_iter().collect();
        let mut document = self.document.clone();
        if let Some(required) = document
            .get_mut("required")
            .and_then(JsonValue::as_array_mut)
        {
            required.retain(|name| name.as_str().is_none_or(|name| !keys.contains(&name)));
        }
        Self::compile(document, self.target)
    }

    /// Recompile with no root property required.
    pub fn partial(&self) -> Result<Self, CompileError> {
        let mut document = self.document.clone();
        if let Some(entries) = document.as_object_mut() {
            entries.remove("required");
        }
        Self::compile(document, self.target)
    }

    /// The compiled document.
    #[must_use]
    pub const fn document(&self) -> &JsonValue {
        &self.document
    }

    /// Every issue in `data`, in the order the engine reports them.
    #[must_use]
    pub fn issues(&self, data: &JsonValue) -> Vec<Issue> {
        self.validator
            .iter_errors(data)
            .map(|error| issue_from(&error, data))
            .collect()
    }

    /// Check `data`, collecting every issue.
    pub fn check(&self, data: &JsonValue) -> Result<(), SchemaFailure> {
        let issues = self.issues(data);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(SchemaFailure::new(issues))
        }
    }
}

impl Schema for JsonSchemaValidator {
    type Output = JsonValue;
    type Fault = Infallible;

    fn parse(&self, data: &JsonValue) -> Result<JsonValue, ParseError<Infallible>> {
        self.check(data)?;
        Ok(data.clone())
    }
}

impl fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("JsonSchemaValidator")
            .field("target", &self.target)
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

fn issue_from(error: &ValidationError<'_>, data: &JsonValue) -> Issue {
    let mut segments = resolve_path(&error.instance_path.to_string(), data);
    let instance: &JsonValue = &error.instance;

    let (code, message) = match &error.kind {
        ValidationErrorKind::Required { property } => {
            segments.push(PathSegment::Key(
                property.as_str().map_or_else(|| property.to_string(), str::to_owned),
            ));
            (IssueCode::InvalidType, "Required".to_owned())
        },
        ValidationErrorKind::Type { kind } => (
            IssueCode::InvalidType,
            format!(
                "Expected {}, received {}",
                expected_types(kind),
                json_type(instance)
            ),
        ),
        ValidationErrorKind::MinLength { limit } => (
            IssueCode::TooSmall,
            format!("String must contain at least {limit} character(s)"),
        ),
        ValidationErrorKind::MaxLength { limit } => (
            IssueCode::TooBig,
            format!("String must contain at most {limit} character(s)"),
        ),
        ValidationErrorKind::MinItems { limit } => (
            IssueCode::TooSmall,
            format!("Array must contain at least {limit} element(s)"),
        ),
        ValidationErrorKind::MaxItems { limit } => (
            IssueCode::TooBig,
            format!("Array must contain at most {limit} element(s)"),
        ),
        ValidationErrorKind::Minimum { limit } => (
            IssueCode::TooSmall,
            format!("Number must be greater than or equal to {limit}"),
        ),
        ValidationErrorKind::ExclusiveMinimum { limit } => (
            IssueCode::TooSmall,
            format!("Number must be greater than {limit}"),
        ),
        ValidationErrorKind::Maximum { limit } => (
            IssueCode::TooBig,
            format!("Number must be less than or equal to {limit}"),
        ),
        ValidationErrorKind::ExclusiveMaximum { limit } => (
            IssueCode::TooBig,
            format!("Number must be less than {limit}"),
        ),
        ValidationErrorKind::Enum { options } => (
            IssueCode::InvalidEnumValue,
            format!(
                "Invalid enum value. Expected {}, received {}",
                render_options(options),
                quoted(instance)
            ),
        ),
        ValidationErrorKind::Constant { expected_value } => (
            IssueCode::InvalidLiteral,
            format!("Invalid literal value, expected {}", quoted(expected_value)),
        ),
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            let keys: Vec<String> = unexpected.iter().map(|key| format!("'{key}'")).collect();
            (
                IssueCode::UnrecognizedKeys,
                format!("Unrecognized key(s) in object: {}", keys.join(", ")),
            )
        },
        ValidationErrorKind::Pattern { pattern } => (
            IssueCode::InvalidString,
            format!("String must match pattern {pattern}"),
        ),
        ValidationErrorKind::Format { format } => {
            (IssueCode::InvalidString, format!("Invalid {format}"))
        },
        ValidationErrorKind::AnyOf { .. } | ValidationErrorKind::OneOfNotValid { .. } => {
            (IssueCode::InvalidValue, "Invalid input".to_owned())
        },
        _ => (IssueCode::InvalidValue, error.to_string()),
    };

    Issue::new(code, IssuePath::from_segments(segments), message)
}

/// Walk a JSON pointer through `data` so numeric tokens become indexes only
/// where the value at that point is an array.
fn resolve_path(pointer: &str, data: &JsonValue) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut cursor = Some(data);

    for token in pointer.split('/').skip(1) {
        let token = token.replace("~1", "/").replace("~0", "~");
        let segment = match (cursor, token.parse::<usize>()) {
            (Some(JsonValue::Array(_)), Ok(index)) => PathSegment::Index(index),
            _ => PathSegment::Key(token),
        };
        cursor = cursor.and_then(|value| match &segment {
            PathSegment::Key(key) => value.get(key.as_str()),
            PathSegment::Index(index) => value.get(*index),
        });
        segments.push(segment);
    }
    segments
}

fn expected_types(kind: &TypeKind) -> String {
    match kind {
        TypeKind::Single(primitive) => primitive.to_string(),
        TypeKind::Multiple(primitives) => {
            let names: Vec<String> = primitives
                .into_iter()
                .map(|primitive| primitive.to_string())
                .collect();
            names.join(" | ")
        },
    }
}

const fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn quoted(value: &JsonValue) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), |text| format!("'{text}'"))
}

fn render_options(options: &JsonValue) -> String {
    options.as_array().map_or_else(
        || options.to_string(),
        |values| {
            let rendered: Vec<String> = values.iter().map(quoted).collect();
            rendered.join(" | ")
        },
    )
}

fn bound_integer_formats(node: &mut JsonValue) {
    match node {
        JsonValue::Object(entries) => {
            let bounds = entries
                .get("format")
                .and_then(JsonValue::as_str)
                .and_then(integer_bounds);
            if let Some((minimum, maximum)) = bounds {
                insert_missing(entries, "minimum", minimum);
                insert_missing(entries, "maximum", maximum);
            }
            entries.values_mut().for_each(bound_integer_formats);
        },
        JsonValue::Array(items) => items.iter_mut().for_each(bound_integer_formats),
        _ => {},
    }
}

fn insert_missing(entries: &mut Map<String, JsonValue>, key: &str, value: JsonValue) {
    entries.entry(key).or_insert(value);
}

fn integer_bounds(format: &str) -> Option<(JsonValue, JsonValue)> {
    let bounds = match format {
        "int8" => (JsonValue::from(i8::MIN), JsonValue::from(i8::MAX)),
        "int16" => (JsonValue::from(i16::MIN), JsonValue::from(i16::MAX)),
        "int32" => (JsonValue::from(i32::MIN), JsonValue::from(i32::MAX)),
        "int64" | "int" => (JsonValue::from(i64::MIN), JsonValue::from(i64::MAX)),
        "uint8" => (JsonValue::from(0_u8), JsonValue::from(u8::MAX)),
        "uint16" => (JsonValue::from(0_u16), JsonValue::from(u16::MAX)),
        "uint32" => (JsonValue::from(0_u32), JsonValue::from(u32::MAX)),
        "uint64" | "uint" => (JsonValue::from(0_u64), JsonValue::from(u64::MAX)),
        _ => return None,
    };
    Some(bounds)
}

/// Rewrite whole-valued floats (`3.0`, `1e3`) as exact integers, recursively.
///
/// JSON Schema's `integer` accepts them, serde's integer decoding does not.
pub(crate) fn canonicalize_integers(value: &mut JsonValue) {
    match value {
        JsonValue::Number(number) => {
            if let Some(exact) = exact_integer(number) {
                *number = exact;
            }
        },
        JsonValue::Array(items) => items.iter_mut().for_each(canonicalize_integers),
        JsonValue::Object(entries) => entries.values_mut().for_each(canonicalize_integers),
        _ => {},
    }
}

fn exact_integer(number: &Number) -> Option<Number> {
    if !number.is_f64() {
        return None;
    }
    let float = number.as_f64()?;
    if float.fract().abs() > 0.0 {
        return None;
    }
    let digits = format!("{float:.0}");
    digits
        .parse::<i64>()
        .map(Number::from)
        .or_else(|_| digits.parse::<u64>().map(Number::from))
        .ok()
}
