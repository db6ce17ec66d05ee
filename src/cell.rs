//! Cons cells: one value plus the link to the rest of the chain.
//!
//! Links are `Rc<RefCell<_>>` so that a merged list can point its last cell at
//! another list's head and observe later mutation of that list, the way
//! `set-cdr!` splices lists together in Scheme.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::error::{ListError, Result};
use crate::value::TypeTag;

/// Shared, mutable handle to a cell.
pub type CellRef<T> = Rc<RefCell<ConsCell<T>>>;

/// Link to the next cell, `None` at the end of the chain.
pub type Link<T> = Option<CellRef<T>>;

/// One value and the link to the rest of the chain.
///
/// Both fields are public. Assigning `next` to an earlier cell of the same
/// chain builds a cycle, which every traversal then follows forever.
#[derive(Debug)]
pub struct ConsCell<T> {
    pub value: T,
    pub next: Link<T>,
}

impl<T> ConsCell<T> {
    /// Creates an unlinked cell.
    pub fn new(value: T) -> Self {
        ConsCell { value, next: None }
    }

    /// Creates a cell linked in front of `next`, wrapped in a shared handle.
    pub fn linked(value: T, next: Link<T>) -> CellRef<T> {
        Rc::new(RefCell::new(ConsCell { value, next }))
    }

    /// Orders two cells by their values.
    ///
    /// Fails with [`ListError::TypeMismatch`] when the values have no ordering,
    /// such as a number against a string.
    pub fn compare(&self, other: &ConsCell<T>) -> Result<Ordering>
    where
        T: PartialOrd + TypeTag,
    {
        self.value.partial_cmp(&other.value).ok_or_else(|| {
            ListError::mismatch(
                other.value.type_tag(),
                self.value.type_tag(),
                "ConsCell",
            )
        })
    }

    pub fn try_lt(&self, other: &ConsCell<T>) -> Result<bool>
    where
        T: PartialOrd + TypeTag,
    {
        Ok(self.compare(other)? == Ordering::Less)
    }

    pub fn try_le(&self, other: &ConsCell<T>) -> Result<bool>
    where
        T: PartialOrd + TypeTag,
    {
        Ok(self.compare(other)? != Ordering::Greater)
    }

    pub fn try_gt(&self, other: &ConsCell<T>) -> Result<bool>
    where
        T: PartialOrd + TypeTag,
    {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    pub fn try_ge(&self, other: &ConsCell<T>) -> Result<bool>
    where
        T: PartialOrd + TypeTag,
    {
        Ok(self.compare(other)? != Ordering::Less)
    }
}

// Unlink iteratively so freeing a long chain doesn't recurse once per cell.
// Stops at the first cell another handle still holds; that handle frees the
// rest the same way.
impl<T> Drop for ConsCell<T> {
    fn drop(&mut self) {
        let mut link = self.next.take();
        while let Some(node) = link {
            match Rc::try_unwrap(node) {
                Ok(mut cell) => link = cell.get_mut().next.take(),
                Err(_) => break,
            }
        }
    }
}

// Equality and ordering look only at the value, never at the link.
impl<T: PartialEq> PartialEq for ConsCell<T> {
    fn eq(&self, other: &ConsCell<T>) -> bool {
        self.value == other.value
    }
}

impl<T: PartialOrd> PartialOrd for ConsCell<T> {
    fn partial_cmp(&self, other: &ConsCell<T>) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: fmt::Display> fmt::Display for ConsCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_new_cell_is_unlinked() {
        let cell = ConsCell::new(5);
        assert_eq!(cell.value, 5);
        assert!(cell.next.is_none());
    }

    #[test]
    fn test_linked_cell() {
        let tail = ConsCell::linked(2, None);
        let head = ConsCell::linked(1, Some(Rc::clone(&tail)));
        let next = head.borrow().next.clone().unwrap();
        assert!(Rc::ptr_eq(&next, &tail));
    }

    #[test]
    fn test_comparisons_delegate_to_value() {
        let a = ConsCell::new(1);
        let b = ConsCell::new(2);
        assert!(a < b);
        assert!(a != b);
        assert_eq!(a.compare(&b), Ok(Ordering::Less));
        assert_eq!(a.try_lt(&b), Ok(true));
        assert_eq!(a.try_le(&a), Ok(true));
        assert_eq!(b.try_gt(&a), Ok(true));
        assert_eq!(a.try_ge(&b), Ok(false));
    }

    #[test]
    fn test_equality_ignores_link() {
        let mut a = ConsCell::new(7);
        a.next = Some(ConsCell::linked(8, None));
        assert_eq!(a, ConsCell::new(7));
    }

    #[test]
    fn test_incomparable_values() {
        let a = ConsCell::new(Value::Int(1));
        let b = ConsCell::new(Value::Str("one".into()));
        assert_eq!(
            a.compare(&b),
            Err(ListError::TypeMismatch {
                found: "str".into(),
                expected: "int".into(),
                structure: "ConsCell",
            })
        );
        assert!(b.try_ge(&a).is_err());
        assert!(a != b);
    }

    #[test]
    fn test_mixed_numeric_cells() {
        let a = ConsCell::new(Value::Int(2));
        let b = ConsCell::new(Value::Float(2.0));
        assert_eq!(a, b);
        assert_eq!(a.compare(&b), Ok(Ordering::Equal));
    }

    #[test]
    fn test_long_chain_drop() {
        let mut head = ConsCell::new(0u32);
        for i in 1..200_000 {
            head = ConsCell {
                value: i,
                next: Some(Rc::new(RefCell::new(head))),
            };
        }
        drop(head);
    }

    #[test]
    fn test_drop_stops_at_shared_cell() {
        let shared = ConsCell::linked(2, Some(ConsCell::linked(3, None)));
        let head = ConsCell::linked(1, Some(Rc::clone(&shared)));
        drop(head);
        let next = shared.borrow().next.clone().unwrap();
        assert_eq!(next.borrow().value, 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(ConsCell::new(Value::Float(3.0)).to_string(), "3.0");
    }
}
