//! Domain primitives with validated constructors.

use appkit_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Validation failures for domain primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitiveError {
    /// `EntityId` is empty after trimming.
    #[error("EntityId must be non-empty")]
    InvalidEntityId {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// A timestamp is not RFC 3339.
    #[error("{field} must be an RFC 3339 timestamp")]
    InvalidTimestamp {
        /// Serialized field name.
        field: &'static str,
        /// Raw input.
        input: String,
    },
}

impl From<PrimitiveError> for ErrorEnvelope {
    fn from(error: PrimitiveError) -> Self {
        let message = error.to_string();
        match error {
            PrimitiveError::InvalidEntityId { input_length } => {
                Self::expected(ErrorCode::new("domain", "invalid_entity_id"), message)
                    .with_metadata("input_length", input_length.to_string())
            },
            PrimitiveError::InvalidTimestamp { field, input } => {
                Self::expected(ErrorCode::new("domain", "invalid_timestamp"), message)
                    .with_metadata("field", field)
                    .with_metadata("input", input)
            },
        }
    }
}

/// Identity of an entity. Immutable once assigned.
///
/// Generated ids are UUID v4 strings; ids supplied by a store may be any
/// non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(Box<str>);

impl EntityId {
    /// Generate a fresh UUID v4 id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string().into_boxed_str())
    }

    /// Parse an `EntityId` from external input.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PrimitiveError> {
        let raw = input.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PrimitiveError::InvalidEntityId {
                input_length: raw.len(),
            });
        }

        Ok(Self(trimmed.to_owned().into_boxed_str()))
    }

    /// Access the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the underlying string.
    #[must_use]
    pub fn into_inner(self) -> Box<str> {
        self.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<String> for EntityId {
    type Error = PrimitiveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.into_inner().into()
    }
}
