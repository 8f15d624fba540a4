//! # appkit-shared
//!
//! Shared error envelope, result helpers, and type utilities for the appkit workspace.
//!
//! This crate provides foundational types that are used across all other crates:
//!
//! - Error envelope (`ErrorEnvelope`, `ErrorKind`, `ErrorCode`)
//! - Result aliases and result-type projections
//! - Type utilities (`Unit`, `JsonValue`, exhaustiveness helpers)
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Zero-cost abstractions** - Type utilities compile away
//! 3. **Serde-compatible** - All public data types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod result;
pub mod types;

pub use errors::{ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata, MalformedErrorCode};
pub use result::{
    ExtractResultError, ExtractResultValue, Result, ResultValue, UnitResult, unit_ok,
};
pub use types::{
    EmptyObject, JsonObject, JsonValue, Unit, assert_unreachable, assert_unreachable_passthrough,
};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
