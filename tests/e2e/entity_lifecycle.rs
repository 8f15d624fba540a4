//! Entity lifecycle E2E tests: create, update, persist as JSON, rehydrate.

use appkit::{BaseEntity, Dto, Entity, ErrorCode, SerializedEntity, rehydrate_entity};
use serde_json::json;
use std::error::Error;

struct Invoice {
    base: BaseEntity,
    total_cents: u64,
}

impl Entity for Invoice {
    fn base(&self) -> &BaseEntity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        &mut self.base
    }
}

#[test]
fn entity_survives_a_storage_round_trip() -> Result<(), Box<dyn Error>> {
    let mut invoice = Invoice {
        base: BaseEntity::new(),
        total_cents: 0,
    };
    invoice.total_cents = 4_200;
    invoice.mark_updated();
    assert!(invoice.updated_at() > invoice.created_at());

    let row = serde_json::to_string(&invoice.to_serialized())?;
    let restored = rehydrate_entity(&row)?;

    assert_eq!(&restored, invoice.base());
    assert_eq!(invoice.total_cents, 4_200);
    Ok(())
}

#[test]
fn stored_ids_are_kept_verbatim() -> Result<(), Box<dyn Error>> {
    let row = json!({
        "Id": "abc",
        "createdAt": "2023-11-14T22:13:20Z",
        "updatedAt": "2023-11-14T22:13:20.5Z"
    });

    let serialized = SerializedEntity::from_value(&row)??;
    let entity = BaseEntity::from_serialized(serialized.clone());

    assert_eq!(entity.id().as_str(), "abc");
    assert!(entity.updated_at() > entity.created_at());
    assert_eq!(entity.serialize(), serialized);
    assert_eq!(serde_json::to_value(&serialized)?["Id"], json!("abc"));
    Ok(())
}

#[test]
fn corrupt_rows_are_expected_errors() {
    let error = rehydrate_entity(r#"{"Id": "abc", "createdAt": "soon", "updatedAt": "later"}"#).err();

    let Some(error) = error else {
        unreachable!("unparseable timestamps are rejected");
    };
    assert_eq!(error.code, ErrorCode::invalid_input());
    assert_eq!(
        error.metadata_value("fields"),
        Some("createdAt,updatedAt")
    );
}
