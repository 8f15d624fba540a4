//! DTO validation E2E tests through the facade.

use appkit::{
    Dto, DtoValidator, ErrorKind, FormatOptions, IssuePathMode, JsonSchemaValidator, TypedSchema,
    ValidationError, assert_unreachable_passthrough, validate, validate_with,
};
use appkit_testkit::fixtures::{Person, Profile, Role, SignupForm, person_json, valid_profile_json};
use appkit_testkit::schemas::{FaultySchema, FixtureFault};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::error::Error;

#[test]
fn valid_input_yields_the_transformed_value() -> Result<(), Box<dyn Error>> {
    let person = Person::from_value(&person_json("  Grace  ", 85))??;
    assert_eq!(person.name, "Grace");
    assert_eq!(person.age, 85);

    let profile = Profile::from_value(&valid_profile_json())??;
    assert_eq!(profile.email, "ada@example.com");
    assert_eq!(profile.role, Role::Admin);
    Ok(())
}

#[test]
fn every_issue_is_reported_in_order() -> Result<(), Box<dyn Error>> {
    let Err(error) = Person::from_value(&person_json("", "old"))? else {
        return Err("expected rejection".into());
    };

    assert_eq!(
        error.message(),
        "['name' -> String must contain at least 1 character(s),'age' -> Expected integer, received string]"
    );
    assert_eq!(error.issues().len(), 2);
    Ok(())
}

#[test]
fn numbers_outside_an_integer_field_are_rejections() -> Result<(), Box<dyn Error>> {
    let person = Person::from_value(&person_json("Ada", 3.0))??;
    assert_eq!(person.age, 3);

    let Err(error) = Person::from_value(&person_json("Ada", 1e20))? else {
        return Err("expected rejection".into());
    };
    assert_eq!(
        error.message(),
        "['age' -> Number must be less than or equal to 150]"
    );

    let Err(error) = Person::from_value(&person_json("Ada", -1))? else {
        return Err("expected rejection".into());
    };
    assert_eq!(
        error.message(),
        "['age' -> Number must be greater than or equal to 0]"
    );
    Ok(())
}

#[test]
fn nested_issues_use_the_configured_path_mode() -> Result<(), Box<dyn Error>> {
    let input = json!({
        "email": "ada@example.com",
        "address": { "street": "", "city": "London" },
        "tags": ["math", 7],
        "role": "member"
    });

    let Err(first) = Profile::from_value(&input)? else {
        return Err("expected rejection".into());
    };
    assert_eq!(
        first.message(),
        "['address' -> String must contain at least 1 character(s),'tags' -> Expected string, received number]"
    );

    let validator = DtoValidator::new(FormatOptions::with_path_mode(IssuePathMode::FullPath));
    let Err(full) = validator.parse::<Profile>(&input)? else {
        return Err("expected rejection".into());
    };
    assert_eq!(
        full.message(),
        "['address.street' -> String must contain at least 1 character(s),'tags.1' -> Expected string, received number]"
    );
    Ok(())
}

#[test]
fn cross_field_rules_run_after_the_schema_passes() -> Result<(), Box<dyn Error>> {
    let Err(error) = SignupForm::from_value(&json!({
        "password": "correct horse",
        "confirm": "battery staple"
    }))?
    else {
        return Err("expected rejection".into());
    };

    assert_eq!(error.message(), "['confirm' -> Passwords do not match]");
    Ok(())
}

#[test]
fn faults_propagate_unchanged() {
    let outcome = validate(&FaultySchema::new("store offline"), &json!({}));

    assert_eq!(outcome.err(), Some(FixtureFault("store offline".to_owned())));
}

#[test]
fn ad_hoc_schemas_work_without_a_dto_type() -> Result<(), Box<dyn Error>> {
    #[derive(Debug, Deserialize, JsonSchema)]
    struct Batch {
        #[schemars(length(min = 1))]
        ids: Vec<String>,
    }

    let schema = TypedSchema::<Batch>::new();

    let batch = validate(&schema, &json!({ "ids": ["a", "b"] }))??;
    assert_eq!(batch.ids, ["a", "b"]);

    let outcome = validate_with(
        &schema,
        &json!({ "ids": [] }),
        FormatOptions::with_path_mode(IssuePathMode::FullPath),
    )?;
    assert_eq!(
        outcome.err().map(|error| error.message().to_owned()),
        Some("['ids' -> Array must contain at least 1 element(s)]".to_owned())
    );
    Ok(())
}

#[test]
fn plain_documents_cannot_fault() -> Result<(), Box<dyn Error>> {
    let validator = JsonSchemaValidator::new(json!({
        "type": "object",
        "properties": { "name": { "type": "string" } },
        "required": ["name"]
    }))?
    .partial_by(["name"])?;

    let accepted = validate(&validator, &json!({})).unwrap_or_else(assert_unreachable_passthrough);
    assert_eq!(accepted.ok(), Some(json!({})));

    let rejected = validate(&validator, &json!({ "name": 1 }))
        .unwrap_or_else(assert_unreachable_passthrough);
    assert_eq!(
        rejected.err().map(|error| error.message().to_owned()),
        Some("['name' -> Expected string, received number]".to_owned())
    );
    Ok(())
}

#[test]
fn rejections_convert_to_expected_envelopes() -> Result<(), Box<dyn Error>> {
    let Err(error) = Person::from_value(&json!({ "name": 7 }))? else {
        return Err("expected rejection".into());
    };
    let envelope = appkit::ErrorEnvelope::from(error);

    assert_eq!(envelope.kind, ErrorKind::Expected);
    assert_eq!(
        envelope.metadata_value("fields"),
        Some("name,age")
    );
    Ok(())
}

#[test]
fn literal_errors_keep_their_cause() {
    let Ok(Err(error)) = Person::from_json("{\"name\": ") else {
        unreachable!("malformed JSON is a rejection");
    };

    assert!(error.message().starts_with("invalid JSON"));
    assert!(std::error::Error::source(&error).is_some());
    assert!(error.issues().is_empty());

    let plain = ValidationError::new("");
    assert!(!plain.message().is_empty());
}

#[test]
fn schemas_are_reusable_across_threads() -> Result<(), Box<dyn Error>> {
    let schema = std::sync::Arc::new(Person::schema());
    let handles: Vec<_> = (0..4_u32)
        .map(|age| {
            let schema = std::sync::Arc::clone(&schema);
            std::thread::spawn(move || validate(&*schema, &person_json("worker", age)))
        })
        .collect();

    for handle in handles {
        let person = handle.join().map_err(|_| "worker panicked")???;
        assert_eq!(person.name, "worker");
    }
    Ok(())
}

#[test]
fn optional_fields_accept_absence_and_null_when_allowed() -> Result<(), Box<dyn Error>> {
    #[derive(Debug, Deserialize)]
    struct Filter {
        query: Option<String>,
        cursor: Option<String>,
    }

    let schema = TypedSchema::<Filter>::from_document(json!({
        "type": "object",
        "properties": {
            "query": { "type": "string" },
            "cursor": { "type": ["string", "null"] }
        },
        "required": ["cursor"]
    }));

    let filter = validate(&schema, &json!({ "cursor": null }))??;
    assert!(filter.query.is_none());
    assert!(filter.cursor.is_none());

    let outcome = validate(&schema, &json!({}))?;
    assert_eq!(
        outcome.err().map(|error| error.message().to_owned()),
        Some("['cursor' -> Required]".to_owned())
    );

    let outcome = validate(&schema, &json!({ "query": null, "cursor": "c1" }))?;
    assert_eq!(
        outcome.err().map(|error| error.message().to_owned()),
        Some("['query' -> Expected string, received null]".to_owned())
    );
    Ok(())
}
