//! # Cons Lists
//!
//! Elementary containers built from cons cells, plus a plain stack.
//!
//! ## Modules
//!
//! - [`cell`]: `ConsCell`, the node holding one value and the link to the next
//! - [`list`]: `LinkedList<T>`, a singly linked list with shared-tail merge
//! - [`typed_list`]: `TypedLinkedList`, a list of [`Value`]s kept at one type,
//!   coercing between ints and floats
//! - [`value`]: the tagged `Value` payload and its `ValueType`
//! - [`stack`]: `Stack<T>` over a `Vec<T>`
//! - [`error`]: `ListError`, shared by everything above
//!
//! ## Example
//!
//! ```
//! use cons_list::{LinkedList, ListError, Stack};
//!
//! let mut list = LinkedList::from_sequence([1, 2, 3]);
//! assert_eq!(list.to_string(), "LL(1 2 3)");
//! assert_eq!(list.cons(0).pop(), Ok(0));
//! assert_eq!(list.tail().to_vec(), vec![2, 3]);
//! assert_eq!(list.reversed().last(), Ok(1));
//!
//! let mut stack = Stack::new();
//! stack.push('a');
//! assert_eq!(stack.pop(), Ok('a'));
//! assert_eq!(stack.peek(), Err(ListError::EmptyCollection { structure: "Stack" }));
//! ```
//!
//! ## Ownership
//!
//! Cells are linked through `Rc<RefCell<_>>`. A list normally holds the only
//! handle to each of its cells; [`LinkedList::merge`] is the one operation that
//! leaves two lists sharing cells. Nothing here is `Send` or `Sync`.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for lists, stacks and values. Lists
//!   serialize as sequences from head to tail.

pub mod cell;
pub mod error;
pub mod list;
pub mod stack;
pub mod typed_list;
pub mod value;

// Re-export main types for convenience
pub use cell::{CellRef, ConsCell, Link};
pub use error::{ListError, Result};
pub use list::{car, cdr, cons, LinkedList};
pub use stack::Stack;
pub use typed_list::TypedLinkedList;
pub use value::{TypeTag, Value, ValueType};
