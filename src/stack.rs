//! Array-backed LIFO stack.

use crate::error::{ListError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A stack over a growable vector; push and pop are amortized O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Result<T> {
        self.items.pop().ok_or(ListError::empty("Stack"))
    }

    /// The top item, left in place.
    pub fn peek(&self) -> Result<&T> {
        self.items.last().ok_or(ListError::empty("Stack"))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
