//! Primitive values carried by exact-match clauses.
//!
//! A [`TermValue`] is what a `term`, `terms` or `range` clause compares a
//! field against: a string, a boolean or a [`Number`].

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// The variant decides how the number is written on the wire, so `10u32`
/// serializes as `10` and `10.0f64` as `10.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to a JSON value.
    ///
    /// Non-finite floats have no JSON representation and become `null`.
    pub fn to_json(self) -> Value {
        match self {
            Number::I64(n) => Value::from(n),
            Number::U64(n) => Value::from(n),
            Number::F64(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Exact value for term-level clauses.
///
/// Owns its data so it can be stored in a [`BuildCommand`](crate::BuildCommand)
/// and serialized at compile time.
///
/// # Example
///
/// ```
/// use sift_query::{Number, TermValue};
///
/// assert_eq!(TermValue::from("draft"), TermValue::String("draft".into()));
/// assert_eq!(TermValue::from(true), TermValue::Bool(true));
/// assert_eq!(TermValue::from(42u32), TermValue::Number(Number::U64(42)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TermValue {
    /// String value.
    String(String),
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
}

impl TermValue {
    /// Converts the value to its JSON form.
    pub fn to_json(&self) -> Value {
        match self {
            TermValue::String(s) => Value::String(s.clone()),
            TermValue::Bool(b) => Value::Bool(*b),
            TermValue::Number(n) => n.to_json(),
        }
    }

}

impl Serialize for TermValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<String> for TermValue {
    fn from(s: String) -> Self {
        TermValue::String(s)
    }
}

impl From<&str> for TermValue {
    fn from(s: &str) -> Self {
        TermValue::String(s.to_string())
    }
}

impl From<&String> for TermValue {
    fn from(s: &String) -> Self {
        TermValue::String(s.clone())
    }
}

impl From<bool> for TermValue {
    fn from(b: bool) -> Self {
        TermValue::Bool(b)
    }
}

impl From<Number> for TermValue {
    fn from(n: Number) -> Self {
        TermValue::Number(n)
    }
}

macro_rules! term_value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TermValue {
                fn from(n: $ty) -> Self {
                    TermValue::Number(Number::from(n))
                }
            }
        )*
    };
}

term_value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, usize, isize);
