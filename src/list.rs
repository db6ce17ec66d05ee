//! # Singly Linked Lists
//!
//! A `LinkedList<T>` owns a chain of [`ConsCell`]s starting at `head`. All
//! growth happens at the front through [`cons`](LinkedList::cons) and all
//! shrinking through [`pop`](LinkedList::pop); the derived operations (`tail`,
//! `reversed`, `merge`, ...) build fresh lists and leave their inputs alone.
//!
//! ## Shared tails
//!
//! [`merge`](LinkedList::merge) copies the cells of the first list and then
//! points the last copied cell at the *original* head cell of the second list,
//! like Scheme's `append!`. The two lists share those cells afterwards:
//!
//! ```
//! use cons_list::LinkedList;
//!
//! let front = LinkedList::from_sequence([1, 2]);
//! let mut back = LinkedList::from_sequence([3, 4, 5]);
//! let merged = LinkedList::merge(&front, &back);
//! assert_eq!(merged.to_vec(), vec![1, 2, 3, 4, 5]);
//!
//! // Popping `back` unlinks its old head cell, which `merged` still reaches.
//! assert_eq!(back.pop(), Ok(3));
//! assert_eq!(merged.to_vec(), vec![1, 2, 3]);
//! ```
//!
//! Iteration does not detect cycles; the public API never builds one.

use std::fmt;
use std::ops::Add;

use tracing::trace;

use crate::cell::{CellRef, ConsCell, Link};
use crate::error::{ListError, Result};

/// A singly linked list traversable from head to tail only.
pub struct LinkedList<T> {
    head: Link<T>,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        LinkedList { head: None }
    }

    /// Pushes `value` onto the front of the list. O(1).
    ///
    /// Returns the list so calls can be chained.
    pub fn cons(&mut self, value: T) -> &mut Self {
        let next = self.head.take();
        self.head = Some(ConsCell::linked(value, next));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Counts the cells by walking the whole chain. O(n).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Iterates over the cells from head to tail.
    ///
    /// Each call starts again from the current head.
    pub fn iter(&self) -> Cells<T> {
        Cells {
            next: self.head.clone(),
        }
    }

    /// Handle to the head cell.
    pub fn car(&self) -> Option<CellRef<T>> {
        self.head.clone()
    }

    fn last_cell(&self) -> Option<CellRef<T>> {
        self.iter().last()
    }

    /// Replaces this list's chain with the chain owned by `other`.
    pub(crate) fn take_chain(&mut self, mut other: LinkedList<T>) {
        self.head = other.head.take();
    }
}

impl<T: Clone> LinkedList<T> {
    /// Builds a list whose iteration order matches `seq`.
    ///
    /// The sequence is consed back to front, so it must be reversible.
    pub fn from_sequence<I>(seq: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut list = Self::new();
        for item in seq.into_iter().rev() {
            list.cons(item);
        }
        list
    }

    /// Removes the head cell and returns its value.
    ///
    /// The detached cell's link is cleared, so any list still sharing that
    /// cell ends there.
    pub fn pop(&mut self) -> Result<T> {
        self.pop_from("LinkedList")
    }

    pub(crate) fn pop_from(&mut self, structure: &'static str) -> Result<T> {
        let node = self.head.take().ok_or(ListError::empty(structure))?;
        let mut cell = node.borrow_mut();
        self.head = cell.next.take();
        Ok(cell.value.clone())
    }

    /// Value of the final cell. O(n).
    pub fn last(&self) -> Result<T> {
        self.last_from("LinkedList")
    }

    pub(crate) fn last_from(&self, structure: &'static str) -> Result<T> {
        let last = self.last_cell().ok_or(ListError::empty(structure))?;
        let value = last.borrow().value.clone();
        Ok(value)
    }

    /// Iterates over clones of the values from head to tail.
    pub fn values(&self) -> Values<T> {
        Values { cells: self.iter() }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.values().collect()
    }

    /// A fresh list holding every element but the first.
    ///
    /// Nothing is shared with `self`; the tail of an empty list is empty.
    pub fn tail(&self) -> Self {
        let rest: Vec<T> = self.values().skip(1).collect();
        Self::from_sequence(rest)
    }

    pub fn cdr(&self) -> Self {
        self.tail()
    }

    /// A fresh list with the elements in reverse order.
    pub fn reversed(&self) -> Self {
        let mut reversed = Self::new();
        for value in self.values() {
            reversed.cons(value);
        }
        reversed
    }

    /// Copies `first` and links the copy's last cell to `second`'s head cell.
    ///
    /// The result shares every cell of `second`. If `first` is empty the result
    /// starts at `second`'s head cell.
    pub fn merge(first: &Self, second: &Self) -> Self {
        let mut merged = Self::from_sequence(first.to_vec());
        match merged.last_cell() {
            Some(last) => last.borrow_mut().next = second.head.clone(),
            None => merged.head = second.head.clone(),
        }
        trace!(
            copied = first.len(),
            shared = second.head.is_some(),
            "merged lists"
        );
        merged
    }

    /// Same as [`merge`](Self::merge) with `self` in front.
    pub fn concat(&self, other: &Self) -> Self {
        Self::merge(self, other)
    }
}

/// Prepends `value` onto `list` and hands the list back.
pub fn cons<T>(value: T, list: &mut LinkedList<T>) -> &mut LinkedList<T> {
    list.cons(value)
}

/// Head cell of `list`, if any.
pub fn car<T>(list: &LinkedList<T>) -> Option<CellRef<T>> {
    list.car()
}

/// Everything after the head of `list`, as a fresh list.
pub fn cdr<T: Clone>(list: &LinkedList<T>) -> LinkedList<T> {
    list.tail()
}

/// Iterator over the cells of a [`LinkedList`].
pub struct Cells<T> {
    next: Link<T>,
}

impl<T> Iterator for Cells<T> {
    type Item = CellRef<T>;

    fn next(&mut self) -> Option<CellRef<T>> {
        let node = self.next.take()?;
        self.next = node.borrow().next.clone();
        Some(node)
    }
}

/// Iterator over clones of the values of a [`LinkedList`].
pub struct Values<T> {
    cells: Cells<T>,
}

impl<T: Clone> Iterator for Values<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let node = self.cells.next()?;
        let value = node.borrow().value.clone();
        Some(value)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = CellRef<T>;
    type IntoIter = Cells<T>;

    fn into_iter(self) -> Cells<T> {
        self.iter()
    }
}

impl<T: Clone> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        Self::from_sequence(items)
    }
}

// A clone never shares cells with the original.
impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        Self::from_sequence(self.to_vec())
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.borrow().value == b.borrow().value)
    }
}

impl<T: Clone> Add<&LinkedList<T>> for &LinkedList<T> {
    type Output = LinkedList<T>;

    fn add(self, other: &LinkedList<T>) -> LinkedList<T> {
        self.concat(other)
    }
}

impl<T: fmt::Display> fmt::Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("LL(")?;
        write_values(f, self)?;
        f.write_str(")")
    }
}

pub(crate) fn write_values<T: fmt::Display>(
    f: &mut fmt::Formatter,
    list: &LinkedList<T>,
) -> fmt::Result {
    for (i, cell) in list.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", cell.borrow().value)?;
    }
    Ok(())
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut entries = f.debug_list();
        for cell in self.iter() {
            entries.entry(&cell.borrow().value);
        }
        entries.finish()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::LinkedList;

    impl<T: Serialize> Serialize for LinkedList<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(None)?;
            for cell in self.iter() {
                seq.serialize_element(&cell.borrow().value)?;
            }
            seq.end()
        }
    }

    impl<'de, T: Deserialize<'de> + Clone> Deserialize<'de> for LinkedList<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Vec::<T>::deserialize(deserializer).map(LinkedList::from_sequence)
        }
    }
}
