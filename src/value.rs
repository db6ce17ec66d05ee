//! Dynamically tagged payloads for [`TypedLinkedList`](crate::TypedLinkedList).
//!
//! `Value` is a closed sum over the kinds a typed list can hold. Integers and
//! floats form a small numeric tower: they compare with each other by numeric
//! value, and an integer can always be raised to a float. Every other pairing
//! of kinds is incomparable.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Type tag carried by every [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueType {
    Int,
    Float,
    Bool,
    Char,
    Str,
}

impl ValueType {
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::Char => "char",
            ValueType::Str => "str",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ValueType::Int | ValueType::Float)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single element of a typed list.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    Str(String),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Bool(_) => ValueType::Bool,
            Value::Char(_) => ValueType::Char,
            Value::Str(_) => ValueType::Str,
        }
    }

    /// Numeric value as a float, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(n) => Some(n as f64),
            Value::Float(x) => Some(x),
            _ => None,
        }
    }

    /// Raises an `Int` to the equivalent `Float`; every other value is returned as is.
    #[must_use]
    pub fn into_float(self) -> Value {
        match self {
            Value::Int(n) => Value::Float(n as f64),
            other => other,
        }
    }
}

/// Orders two numbers exactly, without rounding the int through `f64`.
fn numeric_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Int(n), Value::Float(x)) => cmp_int_float(*n, *x),
        (Value::Float(x), Value::Int(n)) => cmp_int_float(*n, *x).map(Ordering::reverse),
        _ => None,
    }
}

fn cmp_int_float(n: i64, x: f64) -> Option<Ordering> {
    // 2^63, exact in f64
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if x.is_nan() {
        return None;
    }
    if x >= BOUND {
        return Some(Ordering::Less);
    }
    if x < -BOUND {
        return Some(Ordering::Greater);
    }
    let whole = x.trunc();
    match n.cmp(&(whole as i64)) {
        // Same integer part: the fraction decides
        Ordering::Equal => 0.0f64.partial_cmp(&(x - whole)),
        unequal => Some(unequal),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Int(a), Int(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (a, b) => numeric_cmp(a, b) == Some(Ordering::Equal),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Int(a), Int(b)) => a.partial_cmp(b),
            (Bool(a), Bool(b)) => a.partial_cmp(b),
            (Char(a), Char(b)) => a.partial_cmp(b),
            (Str(a), Str(b)) => a.partial_cmp(b),
            (a, b) => numeric_cmp(a, b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            // Debug keeps the fractional part on whole floats: 2.0, not 2
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::Str(s) => f.write_str(s),
        }
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Value {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

value_from! {
    i8 => Int, i16 => Int, i32 => Int, i64 => Int,
    u8 => Int, u16 => Int, u32 => Int,
    f32 => Float, f64 => Float,
    bool => Bool,
    char => Char,
    String => Str,
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.to_string())
    }
}

/// Names the runtime type of a value for diagnostics.
///
/// Used by [`ConsCell::compare`](crate::ConsCell::compare) to report which
/// two types failed to order against each other.
pub trait TypeTag {
    fn type_tag(&self) -> Cow<'static, str>;
}

impl TypeTag for Value {
    fn type_tag(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.value_type().name())
    }
}

macro_rules! type_tag_by_name {
    ($($t:ty),* $(,)?) => {
        $(
            impl TypeTag for $t {
                fn type_tag(&self) -> Cow<'static, str> {
                    Cow::Borrowed(stringify!($t))
                }
            }
        )*
    };
}

type_tag_by_name!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
    &'static str,
);
