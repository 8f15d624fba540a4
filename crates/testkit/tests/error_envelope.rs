//! Integration tests for error propagation across crates.

use appkit_shared::{ErrorCode, ErrorEnvelope, ErrorKind};
use appkit_testkit::errors::{emitted_error_codes, internal_error, rejected_input_error};
use appkit_testkit::fixtures::{Person, person_json};
use appkit_testkit::schemas::{FaultySchema, FixtureFault};
use appkit_validation::{Dto, validate};
use std::error::Error;

#[test]
fn error_envelope_crosses_crates() {
    let internal = internal_error();
    assert_eq!(internal.code, ErrorCode::internal());

    let boxed: Box<dyn Error> = Box::new(internal);
    assert!(boxed.to_string().contains("internal failure"));

    let rejected = rejected_input_error();
    assert!(rejected.is_expected());
    assert_eq!(rejected.metadata_value("fields"), Some("name"));
}

#[test]
fn validation_errors_become_expected_envelopes() -> Result<(), Box<dyn Error>> {
    let Err(error) = Person::from_value(&person_json("", -1))? else {
        return Err("expected rejection".into());
    };
    let envelope = ErrorEnvelope::from(error);

    assert_eq!(envelope.kind, ErrorKind::Expected);
    assert!(emitted_error_codes().contains(&envelope.code));
    assert_eq!(
        envelope.metadata_value("fields"),
        Some("name,age")
    );
    Ok(())
}

#[test]
fn fixture_faults_escape_validation() {
    let outcome = validate(&FaultySchema::new("db down"), &serde_json::json!({}));
    assert!(matches!(outcome, Err(FixtureFault(ref message)) if message == "db down"));
}
