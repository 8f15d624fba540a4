//! Fixture DTOs covering flat, nested, and refined schemas.

use appkit_shared::JsonValue;
use appkit_validation::{Dto, Issue, Map, SchemaExt, TypedSchema};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Schema of a DTO whose decoded value is normalized after validation.
pub type NormalizedSchema<T> = Map<TypedSchema<T>, fn(T) -> T>;

/// Flat DTO: a non-empty name (trimmed once accepted) and a bounded age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Person {
    #[schemars(length(min = 1))]
    pub name: String,
    #[schemars(range(max = 150))]
    pub age: u32,
}

impl Person {
    fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self
    }
}

impl Dto for Person {
    type Schema = NormalizedSchema<Self>;

    fn schema() -> Self::Schema {
        TypedSchema::<Self>::new().map(Self::trimmed as fn(Self) -> Self)
    }
}

/// Postal address nested inside [`Profile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Address {
    #[schemars(length(min = 1))]
    pub street: String,
    #[schemars(length(min = 1))]
    pub city: String,
    pub zip: Option<String>,
}

/// Profile role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Member,
}

/// Nested DTO with arrays, enums, defaults, and no unknown keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[schemars(length(min = 3))]
    pub email: String,
    pub address: Address,
    #[schemars(length(max = 5))]
    pub tags: Vec<String>,
    #[serde(default)]
    pub role: Role,
    pub nickname: Option<String>,
}

impl Profile {
    fn trimmed(mut self) -> Self {
        self.email = self.email.trim().to_owned();
        self
    }
}

impl Dto for Profile {
    type Schema = NormalizedSchema<Self>;

    fn schema() -> Self::Schema {
        TypedSchema::<Self>::new()
            .refine(|profile: &Self| {
                (profile.role == Role::Admin && profile.tags.is_empty())
                    .then(|| Issue::custom(["tags"], "Admins need at least one tag"))
            })
            .map(Self::trimmed as fn(Self) -> Self)
    }
}

/// DTO whose only rule spans two fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct SignupForm {
    #[schemars(length(min = 8))]
    pub password: String,
    pub confirm: String,
}

impl Dto for SignupForm {
    type Schema = TypedSchema<Self>;

    fn schema() -> Self::Schema {
        TypedSchema::<Self>::new().refine(|form: &Self| {
            (form.password != form.confirm)
                .then(|| Issue::custom(["confirm"], "Passwords do not match"))
        })
    }
}

/// Person input with the given fields.
pub fn person_json(name: impl Into<JsonValue>, age: impl Into<JsonValue>) -> JsonValue {
    json!({ "name": name.into(), "age": age.into() })
}

/// A profile input every rule accepts.
pub fn valid_profile_json() -> JsonValue {
    json!({
        "email": " ada@example.com ",
        "address": { "street": "1 Loop Rd", "city": "London" },
        "tags": ["math", "engines"],
        "role": "admin"
    })
}
