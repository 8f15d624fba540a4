//! Error envelope shared by every appkit crate.
//!
//! Crate-local error types (`ValidationError`, `SchemaFault`, config and env
//! errors) convert into an [`ErrorEnvelope`] at crate boundaries so callers
//! can branch on [`ErrorKind`] and match on a stable [`ErrorCode`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Metadata attached to errors for diagnostics.
pub type ErrorMetadata = BTreeMap<String, String>;

/// Where a failure comes from, and therefore who should handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad input from outside: report it back.
    Expected,
    /// Two parts of the program disagree (a schema and its output type).
    Invariant,
    /// Anything else (I/O, serialization).
    Unexpected,
}

impl ErrorKind {
    /// Returns true when the failure is part of normal control flow.
    #[must_use]
    pub const fn is_expected(self) -> bool {
        matches!(self, Self::Expected)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Expected => "expected",
            Self::Invariant => "invariant",
            Self::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Stable `namespace:code` identifier.
///
/// Serialized as a single string, e.g. `"validation:invalid_input"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ErrorCode {
    namespace: String,
    code: String,
}

impl ErrorCode {
    /// Create a code from its two parts.
    pub fn new(namespace: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            code: code.into(),
        }
    }

    /// Input rejected by a schema: `validation:invalid_input`.
    pub fn invalid_input() -> Self {
        Self::new("validation", "invalid_input")
    }

    /// Schema accepted a value its output type cannot hold:
    /// `validation:schema_mismatch`.
    pub fn schema_mismatch() -> Self {
        Self::new("validation", "schema_mismatch")
    }

    /// Catch-all internal failure: `appkit:internal`.
    pub fn internal() -> Self {
        Self::new("appkit", "internal")
    }

    /// Returns the namespace portion.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the code identifier.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.namespace, self.code)
    }
}

/// Text that is not a `namespace:code` pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed error code '{0}'; expected namespace:code")]
pub struct MalformedErrorCode(String);

impl FromStr for ErrorCode {
    type Err = MalformedErrorCode;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.split_once(':') {
            Some((namespace, code))
                if !namespace.is_empty() && !code.is_empty() && !code.contains(':') =>
            {
                Ok(Self::new(namespace, code))
            },
            _ => Err(MalformedErrorCode(input.to_owned())),
        }
    }
}

impl TryFrom<String> for ErrorCode {
    type Error = MalformedErrorCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        code.to_string()
    }
}

/// Structured error envelope shared across crates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error kind describing the origin category.
    pub kind: ErrorKind,
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Additional diagnostic metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: ErrorMetadata,
}

impl ErrorEnvelope {
    /// Create an expected error.
    pub fn expected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Expected, code, message)
    }

    /// Create an invariant error.
    pub fn invariant(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Invariant, code, message)
    }

    /// Create an unexpected error.
    pub fn unexpected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Unexpected, code, message)
    }

    fn with_kind(kind: ErrorKind, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            metadata: ErrorMetadata::new(),
        }
    }

    /// Attach a single metadata entry, replacing any previous value.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Look up a metadata value.
    #[must_use]
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Returns true when the error is an expected (input) failure.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        self.kind.is_expected()
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} {}: {}", self.kind, self.code, self.message)
    }
}

impl std::error::Error for ErrorEnvelope {}
