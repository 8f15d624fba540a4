//! The base entity: identity plus creation and update timestamps.

use crate::primitives::{EntityId, PrimitiveError};
use appkit_shared::JsonValue;
use appkit_validation::{Dto, Issue, ParseError, Schema, SchemaFailure, SchemaFault, TypedSchema};
use chrono::{DateTime, TimeDelta, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity and timestamps shared by every entity.
///
/// `created_at` never changes after construction; `updated_at` only moves
/// forward through [`BaseEntity::mark_updated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseEntity {
    id: EntityId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Default for BaseEntity {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseEntity {
    /// Create an entity with a fresh id, created and updated now.
    #[must_use]
    pub fn new() -> Self {
        Self::new_at(Utc::now())
    }

    /// Create an entity with a fresh id, created and updated at `now`.
    #[must_use]
    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            id: EntityId::generate(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate an entity from its serialized form, verbatim.
    #[must_use]
    pub fn from_serialized(serialized: SerializedEntity) -> Self {
        Self {
            id: serialized.id,
            created_at: serialized.created_at,
            updated_at: serialized.updated_at,
        }
    }

    /// Entity id.
    #[must_use]
    pub const fn id(&self) -> &EntityId {
        &self.id
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update time.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Record a modification now.
    pub fn mark_updated(&mut self) {
        self.mark_updated_at(Utc::now());
    }

    /// Record a modification at `now`.
    ///
    /// The stored time is strictly later than the previous one even when the
    /// clock has not advanced (or went backwards): at least one microsecond.
    pub fn mark_updated_at(&mut self, now: DateTime<Utc>) {
        let floor = self
            .updated_at
            .checked_add_signed(TimeDelta::microseconds(1))
            .unwrap_or(self.updated_at);
        self.updated_at = now.max(floor);
    }

    /// Serialized form of the base properties.
    #[must_use]
    pub fn serialize(&self) -> SerializedEntity {
        SerializedEntity {
            id: self.id.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Any type embedding a [`BaseEntity`].
pub trait Entity {
    /// Embedded base.
    fn base(&self) -> &BaseEntity;

    /// Embedded base, mutably.
    fn base_mut(&mut self) -> &mut BaseEntity;

    /// Entity id.
    fn id(&self) -> &EntityId {
        self.base().id()
    }

    /// Creation time.
    fn created_at(&self) -> DateTime<Utc> {
        self.base().created_at()
    }

    /// Last update time.
    fn updated_at(&self) -> DateTime<Utc> {
        self.base().updated_at()
    }

    /// Record a modification now.
    fn mark_updated(&mut self) {
        self.base_mut().mark_updated();
    }

    /// Serialized form of the base properties.
    fn to_serialized(&self) -> SerializedEntity {
        self.base().serialize()
    }
}

impl Entity for BaseEntity {
    fn base(&self) -> &BaseEntity {
        self
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        self
    }
}

/// Plain-data form of a [`BaseEntity`], as stored or sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedEntity {
    /// Entity id.
    #[serde(rename = "Id")]
    pub id: EntityId,
    /// Creation time.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Last update time.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<&BaseEntity> for SerializedEntity {
    fn from(entity: &BaseEntity) -> Self {
        entity.serialize()
    }
}

impl From<SerializedEntity> for BaseEntity {
    fn from(serialized: SerializedEntity) -> Self {
        Self::from_serialized(serialized)
    }
}

impl Dto for SerializedEntity {
    type Schema = SerializedEntitySchema;

    fn schema() -> Self::Schema {
        SerializedEntitySchema::new()
    }
}

const ID_KEY: &str = "Id";
const CREATED_AT_KEY: &str = "createdAt";
const UPDATED_AT_KEY: &str = "updatedAt";

/// Raw row as it arrives from a store, before ids and timestamps are parsed.
#[derive(Debug, Deserialize, JsonSchema)]
struct StoredEntity {
    #[serde(rename = "Id")]
    #[schemars(length(min = 1))]
    id: String,
    #[serde(rename = "createdAt")]
    created_at: String,
    #[serde(rename = "updatedAt")]
    updated_at: String,
}

/// Schema for untrusted [`SerializedEntity`] input.
///
/// Structure is checked against the derived JSON Schema of the raw row; the
/// id and the RFC 3339 timestamps are then parsed, and each one that does
/// not parse is reported as an issue on its field.
#[derive(Debug)]
pub struct SerializedEntitySchema {
    stored: TypedSchema<StoredEntity>,
}

impl Default for SerializedEntitySchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SerializedEntitySchema {
    /// Create the schema.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stored: TypedSchema::new(),
        }
    }
}

impl Schema for SerializedEntitySchema {
    type Output = SerializedEntity;
    type Fault = SchemaFault;

    fn parse(&self, data: &JsonValue) -> Result<SerializedEntity, ParseError<SchemaFault>> {
        let stored = self.stored.parse(data)?;

        let mut issues = Vec::new();
        let id = EntityId::parse(&stored.id)
            .map_err(|error| issues.push(Issue::custom([ID_KEY], error.to_string())))
            .ok();
        let created_at = parse_timestamp(CREATED_AT_KEY, &stored.created_at, &mut issues);
        let updated_at = parse_timestamp(UPDATED_AT_KEY, &stored.updated_at, &mut issues);

        match (id, created_at, updated_at) {
            (Some(id), Some(created_at), Some(updated_at)) => Ok(SerializedEntity {
                id,
                created_at,
                updated_at,
            }),
            _ => Err(SchemaFailure::new(issues).into()),
        }
    }
}

fn parse_timestamp(
    field: &'static str,
    input: &str,
    issues: &mut Vec<Issue>,
) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(input) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(_) => {
            let error = PrimitiveError::InvalidTimestamp {
                field,
                input: input.to_owned(),
            };
            issues.push(Issue::custom([field], error.to_string()));
            None
        },
    }
}
