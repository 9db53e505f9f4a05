//! Status lifecycles for ticket-like records.
//!
//! Every ticket collection stores a small closed set of states with a fixed
//! set of forward moves. Re-submitting the current state is always accepted
//! so that clients may send the full record back unchanged.

use std::fmt::Display;

use crate::error::CoreError;

/// A status enum with a fixed transition table.
pub trait StatusLifecycle: Copy + PartialEq + Display {
    /// Human-readable name of the owning record, used in error messages.
    const ENTITY: &'static str;

    /// Whether moving from `self` to a different state `next` is allowed.
    fn can_transition_to(self, next: Self) -> bool;

    /// Whether no further transitions are possible.
    fn is_terminal(self) -> bool;
}

/// Validate a status change, treating a repeat of the current state as a no-op.
pub fn check_transition<S: StatusLifecycle>(from: S, to: S) -> Result<(), CoreError> {
    if from == to || from.can_transition_to(to) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "{} status cannot change from '{from}' to '{to}'",
        S::ENTITY
    )))
}
