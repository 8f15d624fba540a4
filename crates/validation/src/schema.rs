//! The schema seam: anything that turns untyped JSON into a typed value.

use crate::issue::{Issue, format_issues};
use crate::json_schema::CompileError;
use appkit_shared::{ErrorCode, ErrorEnvelope, JsonValue};
use std::fmt;

/// Validates and transforms untyped input into `Self::Output`.
///
/// Implementations report data-shape problems as [`ParseError::Invalid`] and
/// everything else as [`ParseError::Fault`].
pub trait Schema {
    /// Validated (and possibly coerced) output.
    type Output;
    /// Failure that is not a data-shape problem.
    type Fault: std::error::Error;

    /// Parse `data` into the output type.
    fn parse(&self, data: &JsonValue) -> Result<Self::Output, ParseError<Self::Fault>>;
}

impl<S: Schema + ?Sized> Schema for &S {
    type Output = S::Output;
    type Fault = S::Fault;

    fn parse(&self, data: &JsonValue) -> Result<Self::Output, ParseError<Self::Fault>> {
        (**self).parse(data)
    }
}

impl<S: Schema + ?Sized> Schema for Box<S> {
    type Output = S::Output;
    type Fault = S::Fault;

    fn parse(&self, data: &JsonValue) -> Result<Self::Output, ParseError<Self::Fault>> {
        (**self).parse(data)
    }
}

/// Outcome of a failed [`Schema::parse`].
#[derive(Debug)]
pub enum ParseError<F> {
    /// Input does not conform to the schema.
    Invalid(SchemaFailure),
    /// Something other than the input went wrong.
    Fault(F),
}

impl<F> From<SchemaFailure> for ParseError<F> {
    fn from(failure: SchemaFailure) -> Self {
        Self::Invalid(failure)
    }
}

/// Structured data-shape failure: the ordered issues found in one parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFailure {
    issues: Vec<Issue>,
}

impl SchemaFailure {
    /// Wrap the issues found during a parse.
    #[must_use]
    pub const fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Issues in the order they were found.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consume and return the issues.
    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

impl fmt::Display for SchemaFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&format_issues(&self.issues))
    }
}

impl std::error::Error for SchemaFailure {}

/// Faults raised by [`TypedSchema`](crate::TypedSchema).
///
/// Both mean the schema and its output type disagree, never bad input.
#[derive(Debug, thiserror::Error)]
pub enum SchemaFault {
    /// The schema document could not be compiled.
    #[error(transparent)]
    Compile(#[from] CompileError),
    /// The schema accepted the input but the output type could not be built from it.
    #[error("validated input does not decode into `{target}`: {source}")]
    Decode {
        /// Rust type the schema produces.
        target: &'static str,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
}

impl SchemaFault {
    /// Rust type the failing schema was built for.
    #[must_use]
    pub const fn target(&self) -> &'static str {
        match self {
            Self::Compile(error) => error.target,
            Self::Decode { target, .. } => *target,
        }
    }
}

impl From<SchemaFault> for ErrorEnvelope {
    fn from(fault: SchemaFault) -> Self {
        let code = match &fault {
            SchemaFault::Compile(_) => ErrorCode::new("validation", "invalid_schema"),
            SchemaFault::Decode { .. } => ErrorCode::schema_mismatch(),
        };
        Self::invariant(code, fault.to_string()).with_metadata("target", fault.target())
    }
}

/// Combinators available on every schema.
pub trait SchemaExt: Schema + Sized {
    /// Transform the output of a successful parse.
    fn map<U, F>(self, op: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U,
    {
        Map { inner: self, op }
    }
}

impl<S: Schema> SchemaExt for S {}

/// Schema returned by [`SchemaExt::map`].
#[derive(Debug, Clone)]
pub struct Map<S, F> {
    inner: S,
    op: F,
}

impl<S, F, U> Schema for Map<S, F>
where
    S: Schema,
    F: Fn(S::Output) -> U,
{
    type Output = U;
    type Fault = S::Fault;

    fn parse(&self, data: &JsonValue) -> Result<Self::Output, ParseError<Self::Fault>> {
        self.inner.parse(data).map(&self.op)
    }
}
