//! # appkit-domain
//!
//! The base entity model shared by application entities.
//!
//! - **Primitives** - `EntityId`, `PrimitiveError`
//! - **Entity** - `BaseEntity`, `SerializedEntity`, the `Entity` trait
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` and `validation`
//! - No I/O; the only ambient inputs are the system clock and the id generator

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use appkit_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod entity;
pub mod primitives;

pub use entity::{BaseEntity, Entity, SerializedEntity, SerializedEntitySchema};
pub use primitives::{EntityId, PrimitiveError};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
