//! # appkit-testkit
//!
//! Fixture DTOs, controlled-failure schemas, and error fixtures.
//! This crate depends on `validation` and `shared`.

pub mod errors;
pub mod fixtures;
pub mod schemas;

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
