//! Result aliases and result-type projections.

use crate::errors::ErrorEnvelope;
use crate::types::Unit;

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

/// Result carrying no meaningful success value.
pub type UnitResult<E = ErrorEnvelope> = std::result::Result<Unit, E>;

/// Success shorthand for [`UnitResult`].
pub const fn unit_ok<E>() -> UnitResult<E> {
    Ok(Unit)
}

/// Projects the success type out of a result type.
///
/// ```
/// use appkit_shared::{ExtractResultValue, Result};
///
/// type Loaded = Result<u32>;
/// let value: ExtractResultValue<Loaded> = 7_u32;
/// assert_eq!(value, 7);
/// ```
pub trait ResultValue {
    /// Success type.
    type Value;
    /// Error type.
    type Error;
}

impl<T, E> ResultValue for std::result::Result<T, E> {
    type Value = T;
    type Error = E;
}

/// Success type of a result type `R`.
pub type ExtractResultValue<R> = <R as ResultValue>::Value;

/// Error type of a result type `R`.
pub type ExtractResultError<R> = <R as ResultValue>::Error;
