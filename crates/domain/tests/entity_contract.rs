//! Contract tests for types that embed a `BaseEntity`.

use appkit_domain::{BaseEntity, Entity, EntityId, SerializedEntity};
use appkit_validation::Dto;
use chrono::Utc;
use serde_json::json;
use std::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Task {
    base: BaseEntity,
    title: String,
}

impl Task {
    fn create(title: &str) -> Self {
        Self {
            base: BaseEntity::new(),
            title: title.to_owned(),
        }
    }

    fn from_serialized(serialized: SerializedEntity, title: &str) -> Self {
        Self {
            base: BaseEntity::from_serialized(serialized),
            title: title.to_owned(),
        }
    }

    fn rename(&mut self, title: &str) {
        title.clone_into(&mut self.title);
        self.mark_updated();
    }
}

impl Entity for Task {
    fn base(&self) -> &BaseEntity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        &mut self.base
    }
}

#[test]
fn created_entities_carry_base_properties() {
    let task = Task::create("write tests");

    assert!(!task.id().as_str().is_empty());
    assert_eq!(task.updated_at(), task.created_at());
}

#[test]
fn serialize_exposes_the_base_properties() {
    let task = Task::create("write tests");
    let serialized = task.to_serialized();

    assert_eq!(
        serialized,
        SerializedEntity {
            id: task.id().clone(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    );
}

#[test]
fn ids_differ_across_entities() {
    let first = Task::create("a");
    let second = Task::create("b");

    assert_ne!(first.id(), second.id());
}

#[test]
fn rehydration_keeps_the_given_data() -> Result<(), Box<dyn Error>> {
    let created_at = Utc::now();
    let updated_at = Utc::now();
    let task = Task::from_serialized(
        SerializedEntity {
            id: EntityId::parse("abc")?,
            created_at,
            updated_at,
        },
        "stored",
    );

    assert_eq!(task.id().as_str(), "abc");
    assert_eq!(task.created_at(), created_at);
    assert_eq!(task.updated_at(), updated_at);
    Ok(())
}

#[test]
fn updates_move_updated_at_past_created_at() {
    let mut task = Task::create("draft");
    assert_eq!(task.updated_at(), task.created_at());

    task.rename("final");

    assert_eq!(task.title, "final");
    assert!(task.updated_at() > task.created_at());
}

#[test]
fn repeated_updates_never_repeat_a_timestamp() {
    let mut task = Task::create("draft");
    let mut previous = task.updated_at();

    for _ in 0..100 {
        task.mark_updated();
        assert!(task.updated_at() > previous);
        previous = task.updated_at();
    }
}

#[test]
fn json_round_trip_through_the_dto_path() -> Result<(), Box<dyn Error>> {
    let mut task = Task::create("persist me");
    task.mark_updated();

    let stored = serde_json::to_string(&task.to_serialized())?;
    let restored = SerializedEntity::from_json(&stored)??;
    let rehydrated = Task::from_serialized(restored, "persist me");

    assert_eq!(rehydrated, task);
    Ok(())
}

#[test]
fn untrusted_rows_are_rejected_with_issues() -> Result<(), Box<dyn Error>> {
    let outcome = SerializedEntity::from_value(&json!({
        "createdAt": "2024-01-01T00:00:00Z"
    }))?;
    let Err(error) = outcome else {
        return Err("missing fields must be rejected".into());
    };
    assert_eq!(error.message(), "['Id' -> Required,'updatedAt' -> Required]");

    let outcome = SerializedEntity::from_value(&json!({
        "Id": "row-1",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "not a date"
    }))?;
    let Err(error) = outcome else {
        return Err("bad timestamps must be rejected".into());
    };
    assert_eq!(
        error.message(),
        "['updatedAt' -> updatedAt must be an RFC 3339 timestamp]"
    );
    Ok(())
}
