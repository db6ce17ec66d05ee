//! # Typed Linked Lists
//!
//! A [`TypedLinkedList`] is a [`LinkedList<Value>`] whose elements all share one
//! [`ValueType`]. The first value consed onto an empty list fixes the type;
//! afterwards only values of that type are accepted, with one exception for
//! numbers:
//!
//! | list type | incoming | result                                          |
//! |-----------|----------|-------------------------------------------------|
//! | untyped   | any      | accepted, list takes the incoming type          |
//! | `T`       | `T`      | accepted                                        |
//! | float     | int      | incoming raised to float                        |
//! | int       | float    | every stored int raised to float, list is float |
//! | `T`       | `U`      | rejected with `TypeMismatch`                    |
//!
//! ```
//! use cons_list::{TypedLinkedList, ValueType};
//!
//! let mut xs = TypedLinkedList::new();
//! for i in 0..3 {
//!     xs.cons(i).unwrap();
//! }
//! assert_eq!(xs.to_string(), "int TLL(2 1 0)");
//!
//! xs.cons(3.5).unwrap();
//! assert_eq!(xs.value_type(), Some(ValueType::Float));
//! assert_eq!(xs.to_string(), "float TLL(3.5 2.0 1.0 0.0)");
//!
//! assert!(xs.cons("four").is_err());
//! ```

use std::fmt;
use std::ops::Add;

use tracing::debug;

use crate::cell::CellRef;
use crate::error::{ListError, Result};
use crate::list::{write_values, Cells, LinkedList, Values};
use crate::value::{Value, ValueType};

const NAME: &str = "TypedLinkedList";

#[derive(Debug, Clone, Default)]
pub struct TypedLinkedList {
    list: LinkedList<Value>,
    ty: Option<ValueType>,
}

fn type_name(ty: Option<ValueType>) -> &'static str {
    ty.map_or("None", ValueType::name)
}

impl TypedLinkedList {
    #[must_use]
    pub fn new() -> Self {
        TypedLinkedList {
            list: LinkedList::new(),
            ty: None,
        }
    }

    /// Element type currently enforced, `None` while the list is empty.
    pub fn value_type(&self) -> Option<ValueType> {
        self.ty
    }

    /// Pushes `value` onto the front of the list, unifying its type with the
    /// list's.
    ///
    /// On error the list is left exactly as it was.
    pub fn cons(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        let value = value.into();
        let found = value.value_type();
        let current = self.ty;
        let value = match current {
            _ if self.list.is_empty() => {
                self.ty = Some(found);
                value
            }
            Some(expected) if expected == found => value,
            Some(ValueType::Float) if found == ValueType::Int => value.into_float(),
            Some(ValueType::Int) if found == ValueType::Float => {
                self.upgrade_to_float();
                value
            }
            expected => {
                debug!(
                    found = found.name(),
                    expected = type_name(expected),
                    "rejected cons onto typed list"
                );
                return Err(ListError::mismatch(found.name(), type_name(expected), NAME));
            }
        };
        self.list.cons(value);
        Ok(self)
    }

    // Builds the float chain first and swaps it in, so the list never holds
    // a mix of ints and floats. Cells shared with a merged list are not
    // touched; this list simply stops sharing them.
    fn upgrade_to_float(&mut self) {
        let floats: Vec<Value> = self.list.values().map(Value::into_float).collect();
        debug!(len = floats.len(), "upgrading typed list from int to float");
        self.list.take_chain(LinkedList::from_sequence(floats));
        self.ty = Some(ValueType::Float);
    }

    /// Builds a typed list whose iteration order matches `seq`.
    ///
    /// Values are consed from the back, so the type is fixed by the last one.
    pub fn from_sequence<I>(seq: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut list = Self::new();
        for item in seq.into_iter().rev() {
            list.cons(item)?;
        }
        Ok(list)
    }

    /// Removes and returns the head value. Popping the last value makes the
    /// list untyped again.
    pub fn pop(&mut self) -> Result<Value> {
        let value = self.list.pop_from(NAME)?;
        if self.list.is_empty() {
            self.ty = None;
        }
        Ok(value)
    }

    pub fn last(&self) -> Result<Value> {
        self.list.last_from(NAME)
    }

    pub fn tail(&self) -> Self {
        let list = self.list.tail();
        let ty = if list.is_empty() { None } else { self.ty };
        TypedLinkedList { list, ty }
    }

    pub fn cdr(&self) -> Self {
        self.tail()
    }

    pub fn car(&self) -> Option<CellRef<Value>> {
        self.list.car()
    }

    pub fn reversed(&self) -> Self {
        TypedLinkedList {
            list: self.list.reversed(),
            ty: self.ty,
        }
    }

    /// Copies `first` and links the copy to `second`'s cells, as
    /// [`LinkedList::merge`] does.
    ///
    /// Both lists must carry the same element type; two empty lists are both
    /// untyped and merge to an empty list.
    pub fn merge(first: &Self, second: &Self) -> Result<Self> {
        if first.ty != second.ty {
            return Err(ListError::mismatch(
                type_name(second.ty),
                type_name(first.ty),
                NAME,
            ));
        }
        Ok(TypedLinkedList {
            list: LinkedList::merge(&first.list, &second.list),
            ty: first.ty,
        })
    }

    pub fn concat(&self, other: &Self) -> Result<Self> {
        Self::merge(self, other)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterates over the cells from head to tail.
    ///
    /// Writing through a cell handle bypasses type enforcement.
    pub fn iter(&self) -> Cells<Value> {
        self.list.iter()
    }

    pub fn values(&self) -> Values<Value> {
        self.list.values()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.list.to_vec()
    }

    /// The untyped view of the same cells.
    pub fn as_list(&self) -> &LinkedList<Value> {
        &self.list
    }
}

impl<'a> IntoIterator for &'a TypedLinkedList {
    type Item = CellRef<Value>;
    type IntoIter = Cells<Value>;

    fn into_iter(self) -> Cells<Value> {
        self.iter()
    }
}

impl PartialEq for TypedLinkedList {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

// Lists of different kinds are never equal, whatever they hold.
impl PartialEq<LinkedList<Value>> for TypedLinkedList {
    fn eq(&self, _other: &LinkedList<Value>) -> bool {
        false
    }
}

impl PartialEq<TypedLinkedList> for LinkedList<Value> {
    fn eq(&self, _other: &TypedLinkedList) -> bool {
        false
    }
}

impl Add<&TypedLinkedList> for &TypedLinkedList {
    type Output = Result<TypedLinkedList>;

    fn add(self, other: &TypedLinkedList) -> Result<TypedLinkedList> {
        self.concat(other)
    }
}

impl fmt::Display for TypedLinkedList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} TLL(", type_name(self.ty))?;
        write_values(f, &self.list)?;
        f.write_str(")")
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::TypedLinkedList;
    use crate::value::Value;

    impl Serialize for TypedLinkedList {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.list.serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for TypedLinkedList {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let values = Vec::<Value>::deserialize(deserializer)?;
            TypedLinkedList::from_sequence(values).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(items: &[i64]) -> TypedLinkedList {
        TypedLinkedList::from_sequence(items.to_vec()).unwrap()
    }

    #[test]
    fn test_first_cons_sets_type() {
        let mut list = TypedLinkedList::new();
        assert_eq!(list.value_type(), None);
        list.cons("a").unwrap();
        assert_eq!(list.value_type(), Some(ValueType::Str));
        list.cons("b").unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_int_then_float_upgrades() {
        let mut list = TypedLinkedList::new();
        list.cons(1).unwrap().cons(2.5).unwrap();
        assert_eq!(list.value_type(), Some(ValueType::Float));
        let stored: Vec<ValueType> = list.values().map(|v| v.value_type()).collect();
        assert_eq!(stored, vec![ValueType::Float, ValueType::Float]);
        assert_eq!(list.to_vec(), vec![Value::Float(2.5), Value::Float(1.0)]);
    }

    #[test]
    fn test_float_then_int_coerces_incoming() {
        let mut list = TypedLinkedList::new();
        list.cons(1.5).unwrap().cons(2).unwrap();
        assert_eq!(list.value_type(), Some(ValueType::Float));
        assert_eq!(list.car().unwrap().borrow().value.value_type(), ValueType::Float);
        assert_eq!(list.to_string(), "float TLL(2.0 1.5)");
    }

    #[test]
    fn test_rejects_mismatch_and_leaves_list_unchanged() {
        let mut list = ints(&[1, 2]);
        let head = list.car().unwrap();
        let err = list.cons("three").unwrap_err();
        assert_eq!(
            err,
            ListError::TypeMismatch {
                found: "str".into(),
                expected: "int".into(),
                structure: "TypedLinkedList",
            }
        );
        assert_eq!(list.value_type(), Some(ValueType::Int));
        assert!(std::rc::Rc::ptr_eq(&head, &list.car().unwrap()));
        assert_eq!(list, ints(&[1, 2]));
    }

    #[test]
    fn test_bool_is_not_numeric() {
        let mut list = ints(&[1]);
        assert!(list.cons(true).is_err());
        let mut list = TypedLinkedList::from_sequence([true]).unwrap();
        assert!(list.cons(1.0).is_err());
    }

    #[test]
    fn test_from_sequence_mixed_numbers() {
        let list = TypedLinkedList::from_sequence(vec![Value::Float(0.5), Value::Int(2)]).unwrap();
        assert_eq!(list.value_type(), Some(ValueType::Float));
        assert_eq!(list.to_vec(), vec![Value::Float(0.5), Value::Float(2.0)]);
        assert!(TypedLinkedList::from_sequence(vec![Value::Int(1), Value::Char('c')]).is_err());
    }

    #[test]
    fn test_pop_to_empty_resets_type() {
        let mut list = ints(&[4]);
        assert_eq!(list.pop(), Ok(Value::Int(4)));
        assert_eq!(list.value_type(), None);
        assert_eq!(
            list.pop(),
            Err(ListError::EmptyCollection {
                structure: "TypedLinkedList"
            })
        );
        list.cons('z').unwrap();
        assert_eq!(list.value_type(), Some(ValueType::Char));
    }

    #[test]
    fn test_last_and_tail() {
        let list = ints(&[1, 2, 3]);
        assert_eq!(list.last(), Ok(Value::Int(3)));
        assert_eq!(list.tail(), ints(&[2, 3]));
        assert_eq!(list.cdr().value_type(), Some(ValueType::Int));
        assert_eq!(ints(&[1]).tail().value_type(), None);
        assert!(TypedLinkedList::new().last().is_err());
    }

    #[test]
    fn test_reversed_keeps_type() {
        let list = TypedLinkedList::from_sequence([1.0, 2.0, 3.0]).unwrap();
        let reversed = list.reversed();
        assert_eq!(reversed.value_type(), Some(ValueType::Float));
        assert_eq!(reversed.to_string(), "float TLL(3.0 2.0 1.0)");
        assert_eq!(reversed.reversed(), list);
    }

    #[test]
    fn test_merge_same_type() {
        let a = ints(&[1, 2]);
        let mut b = ints(&[3, 4]);
        let merged = (&a + &b).unwrap();
        assert_eq!(merged, ints(&[1, 2, 3, 4]));
        assert_eq!(merged.value_type(), Some(ValueType::Int));

        b.pop().unwrap();
        assert_eq!(merged, ints(&[1, 2, 3]));
    }

    #[test]
    fn test_merge_different_types_fails() {
        let a = ints(&[1]);
        let b = TypedLinkedList::from_sequence([1.0]).unwrap();
        assert_eq!(
            TypedLinkedList::merge(&a, &b).unwrap_err(),
            ListError::TypeMismatch {
                found: "float".into(),
                expected: "int".into(),
                structure: "TypedLinkedList",
            }
        );
        assert!(a.concat(&TypedLinkedList::new()).is_err());
        assert!(TypedLinkedList::new()
            .concat(&TypedLinkedList::new())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_upgrade_stops_sharing() {
        let a = ints(&[1]);
        let b = ints(&[2, 3]);
        let mut merged = TypedLinkedList::merge(&a, &b).unwrap();
        merged.cons(0.5).unwrap();
        assert_eq!(merged.to_string(), "float TLL(0.5 1.0 2.0 3.0)");
        assert_eq!(b.to_string(), "int TLL(2 3)");
    }

    #[test]
    fn test_upgrade_long_int_list() {
        let items: Vec<i64> = (0..200_000).collect();
        let mut list = TypedLinkedList::from_sequence(items).unwrap();
        list.cons(0.5).unwrap();
        assert_eq!(list.value_type(), Some(ValueType::Float));
        assert_eq!(list.len(), 200_001);
        assert_eq!(list.last(), Ok(Value::Float(199_999.0)));
    }

    #[test]
    fn test_kinds_never_equal() {
        let typed = ints(&[1, 2, 3]);
        let plain = LinkedList::from_sequence(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(typed.as_list(), &plain);
        assert!(typed != plain);
        assert!(plain != typed);
    }

    #[test]
    fn test_display_untyped() {
        assert_eq!(TypedLinkedList::new().to_string(), "None TLL()");
    }
}
