//! DTO validation: untrusted input in, typed result out.
//!
//! Data-shape failures come back as values (`Ok(Err(ValidationError))`).
//! Anything else a schema raises is returned unchanged on the outer channel.

use crate::error::ValidationError;
use crate::issue::IssuePathMode;
use crate::schema::{ParseError, Schema};
use appkit_shared::JsonValue;
use tracing::{debug, warn};

/// Outcome of validating one input: the validated value or why it was rejected.
pub type DtoResult<T> = Result<T, ValidationError>;

/// Validate `data` against `schema`.
///
/// Returns `Ok(Ok(value))` on success, `Ok(Err(error))` when the schema
/// rejected the data, and `Err(fault)` for any other failure. Side-effect free.
///
/// ```
/// use appkit_validation::{JsonSchemaValidator, validate};
/// use serde_json::json;
///
/// let schema = JsonSchemaValidator::new(json!({
///     "type": "object",
///     "properties": { "name": { "type": "string" } }
/// }))?;
/// let rejected = validate(&schema, &json!({"name": 1})).unwrap_or_else(|never| match never {});
/// assert_eq!(
///     rejected.err().map(|error| error.to_string()).as_deref(),
///     Some("['name' -> Expected string, received number]")
/// );
/// # Ok::<(), appkit_validation::CompileError>(())
/// ```
pub fn validate<S: Schema>(
    schema: &S,
    data: &JsonValue,
) -> Result<DtoResult<S::Output>, S::Fault> {
    validate_with(schema, data, FormatOptions::default())
}

/// [`validate`] with explicit formatting options.
pub fn validate_with<S: Schema>(
    schema: &S,
    data: &JsonValue,
    options: FormatOptions,
) -> Result<DtoResult<S::Output>, S::Fault> {
    match schema.parse(data) {
        Ok(value) => Ok(Ok(value)),
        Err(ParseError::Invalid(failure)) => Ok(Err(ValidationError::from_failure_with(
            failure,
            options.path_mode,
        ))),
        Err(ParseError::Fault(fault)) => Err(fault),
    }
}

/// How validation failures are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Path rendering for each issue.
    pub path_mode: IssuePathMode,
}

impl FormatOptions {
    /// Options with the given path mode.
    #[must_use]
    pub const fn with_path_mode(path_mode: IssuePathMode) -> Self {
        Self { path_mode }
    }
}

/// Validation capability with fixed formatting and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DtoValidator {
    options: FormatOptions,
    log_rejections: bool,
}

impl Default for DtoValidator {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

impl DtoValidator {
    /// Create a validator that logs rejections at debug level.
    #[must_use]
    pub const fn new(options: FormatOptions) -> Self {
        Self {
            options,
            log_rejections: true,
        }
    }

    /// Toggle the debug event emitted for rejected input.
    #[must_use]
    pub const fn with_rejection_logging(mut self, enabled: bool) -> Self {
        self.log_rejections = enabled;
        self
    }

    /// Formatting options in use.
    #[must_use]
    pub const fn options(&self) -> FormatOptions {
        self.options
    }

    /// Whether rejections are logged.
    #[must_use]
    pub const fn logs_rejections(&self) -> bool {
        self.log_rejections
    }

    /// Validate `data` against `schema`. Same outcomes as [`validate`].
    pub fn validate<S: Schema>(
        &self,
        schema: &S,
        data: &JsonValue,
    ) -> Result<DtoResult<S::Output>, S::Fault> {
        let outcome = validate_with(schema, data, self.options);
        match &outcome {
            Ok(Err(error)) if self.log_rejections => {
                debug!(
                    target_type = std::any::type_name::<S::Output>(),
                    issue_count = error.issues().len(),
                    message = %error,
                    "input rejected"
                );
            },
            Err(fault) => {
                warn!(
                    target_type = std::any::type_name::<S::Output>(),
                    error = %fault,
                    "schema fault while validating input"
                );
            },
            Ok(_) => {},
        }
        outcome
    }

    /// Validate `data` into the DTO type `D`.
    pub fn parse<D: Dto>(&self, data: &JsonValue) -> Result<DtoResult<D>, DtoFault<D>> {
        self.validate(&D::schema(), data)
    }
}

/// Fault type of a DTO's schema.
pub type DtoFault<D> = <<D as Dto>::Schema as Schema>::Fault;

/// A type constructed only through validation.
///
/// ```
/// use appkit_validation::{Dto, TypedSchema};
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize, JsonSchema)]
/// struct Person {
///     #[schemars(length(min = 1))]
///     name: String,
///     age: u32,
/// }
///
/// impl Dto for Person {
///     type Schema = TypedSchema<Self>;
///
///     fn schema() -> Self::Schema {
///         TypedSchema::new()
///     }
/// }
///
/// let person = Person::from_json(r#"{"name":"Ada","age":36}"#);
/// assert!(matches!(person, Ok(Ok(Person { age: 36, .. }))));
/// ```
pub trait Dto: Sized {
    /// Schema producing `Self`.
    type Schema: Schema<Output = Self>;

    /// Build the schema. Called once per validation.
    fn schema() -> Self::Schema;

    /// Validate already-parsed JSON.
    fn from_value(data: &JsonValue) -> Result<DtoResult<Self>, DtoFault<Self>> {
        validate(&Self::schema(), data)
    }

    /// Parse and validate JSON text. Malformed text is a validation failure.
    fn from_json(text: &str) -> Result<DtoResult<Self>, DtoFault<Self>> {
        match serde_json::from_str::<JsonValue>(text) {
            Ok(data) => Self::from_value(&data),
            Err(error) => Ok(Err(ValidationError::with_cause(
                format!("invalid JSON: {error}"),
                error,
            ))),
        }
    }
}
