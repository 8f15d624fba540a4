//! Type utilities shared across crates.

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;

/// Any JSON value.
pub type JsonValue = serde_json::Value;

/// A JSON object keyed by string.
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// The empty value. Serializes as `{}` and only deserializes from an empty object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unit;

/// Alias for [`Unit`] when the "empty object" reading is clearer.
pub type EmptyObject = Unit;

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_map(Some(0))?.end()
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(UnitVisitor)
    }
}

struct UnitVisitor;

impl<'de> Visitor<'de> for UnitVisitor {
    type Value = Unit;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an empty object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        if let Some(key) = map.next_key::<String>()? {
            map.next_value::<IgnoredAny>()?;
            return Err(de::Error::unknown_field(&key, &[]));
        }
        Ok(Unit)
    }
}

/// Marks a branch the compiler has proven unreachable.
///
/// Takes an uninhabited value, so a call only type-checks where every other
/// case of a `match` is already handled.
///
/// ```
/// use appkit_shared::assert_unreachable;
/// use std::convert::Infallible;
///
/// fn only_ok(result: Result<u8, Infallible>) -> u8 {
///     match result {
///         Ok(value) => value,
///         Err(never) => assert_unreachable(never),
///     }
/// }
/// assert_eq!(only_ok(Ok(4)), 4);
/// ```
pub const fn assert_unreachable(never: Infallible) -> ! {
    match never {}
}

/// Same as [`assert_unreachable`] but typed as any `T`, for expression positions.
pub const fn assert_unreachable_passthrough<T>(never: Infallible) -> T {
    match never {}
}
