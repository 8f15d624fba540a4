//! Hand-written schemas that fail in controlled ways.

use appkit_shared::JsonValue;
use appkit_validation::{Issue, ParseError, Schema, SchemaFailure};
use std::convert::Infallible;

/// Fault raised by [`FaultySchema`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fixture fault: {0}")]
pub struct FixtureFault(pub String);

/// Schema that raises a fault for every input.
#[derive(Debug, Clone)]
pub struct FaultySchema {
    message: String,
}

impl FaultySchema {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Schema for FaultySchema {
    type Output = JsonValue;
    type Fault = FixtureFault;

    fn parse(&self, _data: &JsonValue) -> Result<JsonValue, ParseError<FixtureFault>> {
        Err(ParseError::Fault(FixtureFault(self.message.clone())))
    }
}

/// Schema that rejects every input with a fixed list of issues.
#[derive(Debug, Clone)]
pub struct RejectingSchema {
    issues: Vec<Issue>,
}

impl RejectingSchema {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }
}

impl Schema for RejectingSchema {
    type Output = JsonValue;
    type Fault = Infallible;

    fn parse(&self, _data: &JsonValue) -> Result<JsonValue, ParseError<Infallible>> {
        Err(SchemaFailure::new(self.issues.clone()).into())
    }
}
