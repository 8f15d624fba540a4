//! The validation failure returned to DTO callers.

use crate::issue::{Issue, IssuePathMode, format_issues_with};
use crate::schema::SchemaFailure;
use appkit_shared::{ErrorCode, ErrorEnvelope};
use std::error::Error;
use std::fmt;

/// Boxed diagnostic cause carried by a [`ValidationError`].
pub type Cause = Box<dyn Error + Send + Sync + 'static>;

const FALLBACK_MESSAGE: &str = "validation failed";

/// Failed validation of untrusted input.
///
/// The message is never empty. When built from a [`SchemaFailure`] the failure
/// is kept as the error source, so the structured issues stay reachable.
#[derive(Debug)]
pub struct ValidationError {
    message: String,
    cause: Option<Cause>,
}

impl ValidationError {
    /// Create an error from a literal message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: non_empty(message.into()),
            cause: None,
        }
    }

    /// Create an error from a literal message and an underlying cause.
    pub fn with_cause(message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        Self {
            message: non_empty(message.into()),
            cause: Some(cause.into()),
        }
    }

    /// Create an error from a schema failure, rendering only the first path segment.
    #[must_use]
    pub fn from_failure(failure: SchemaFailure) -> Self {
        Self::from_failure_with(failure, IssuePathMode::FirstSegment)
    }

    /// Create an error from a schema failure with an explicit path mode.
    #[must_use]
    pub fn from_failure_with(failure: SchemaFailure, mode: IssuePathMode) -> Self {
        let message = format_issues_with(failure.issues(), mode);
        Self::with_cause(message, failure)
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Underlying cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Structured issues when the error came from a schema failure.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        match self.schema_failure() {
            Some(failure) => failure.issues(),
            None => &[],
        }
    }

    /// The originating schema failure, if any.
    #[must_use]
    pub fn schema_failure(&self) -> Option<&SchemaFailure> {
        self.cause()
            .and_then(|cause| cause.downcast_ref::<SchemaFailure>())
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        FALLBACK_MESSAGE.to_owned()
    } else {
        message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| -> &(dyn Error + 'static) { cause })
    }
}

impl From<SchemaFailure> for ValidationError {
    fn from(failure: SchemaFailure) -> Self {
        Self::from_failure(failure)
    }
}

impl From<ValidationError> for ErrorEnvelope {
    fn from(error: ValidationError) -> Self {
        let issues = error.issues();
        let mut envelope = Self::expected(
            ErrorCode::invalid_input(),
            error.message(),
        )
        .with_metadata("issue_count", issues.len().to_string());

        if !issues.is_empty() {
            let fields: Vec<String> = issues
                .iter()
                .map(|issue| issue.path.render(IssuePathMode::FullPath))
                .collect();
            envelope = envelope.with_metadata("fields", fields.join(","));
        }

        envelope
    }
}
