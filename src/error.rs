//! Errors shared by every container in the crate.

use thiserror::Error;

/// Errors raised by list and stack operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// An element was requested from a structure holding none.
    ///
    /// **Triggered by:** `pop`/`last` on an empty list, `pop`/`peek` on an empty stack.
    #[error("{structure} is empty")]
    EmptyCollection {
        /// Name of the structure that was empty
        structure: &'static str,
    },

    /// Two values (or two lists) have element types that cannot be unified.
    ///
    /// **Triggered by:** consing a `str` onto an `int` typed list, merging typed
    /// lists of different element types, ordering a number against a string.
    #[error("{found} != {expected}, all elements in {structure} must be of the same type")]
    TypeMismatch {
        /// Type that was offered
        found: String,
        /// Type the structure already holds
        expected: String,
        /// Name of the structure enforcing the type
        structure: &'static str,
    },
}

impl ListError {
    pub(crate) fn empty(structure: &'static str) -> Self {
        ListError::EmptyCollection { structure }
    }

    pub(crate) fn mismatch(
        found: impl Into<String>,
        expected: impl Into<String>,
        structure: &'static str,
    ) -> Self {
        ListError::TypeMismatch {
            found: found.into(),
            expected: expected.into(),
            structure,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ListError>;
