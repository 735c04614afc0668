//! Scalar cell values and categorical detection.
//!
//! A [`Row`] is an ordered sequence of heterogeneous [`Value`]s as delivered by
//! the upstream feed. Whether a position is categorical is decided per value:
//! anything that is not a finite number is categorical.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One input vector.
pub type Row = Vec<Value>;

/// A single cell of an input row.
///
/// Deserializes untagged, so a JSON array such as `[1, 2.5, "a", null, true]`
/// maps directly onto a [`Row`].
///
/// Numbers compare (and hash) by canonical bit pattern: every NaN equals every
/// other NaN and `-0.0 == 0.0`. Values of different variants are never equal,
/// so `1` and `"1"` are distinct vocabulary entries.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing cell. Treated like a position past the end of a short row.
    ///
    /// A null never makes its column categorical, unlike a present non-numeric
    /// value, and never becomes a vocabulary entry.
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Returns `true` if this value marks a missing cell.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the numeric payload, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns `true` if this value forces its column to be categorical.
    ///
    /// Non-numeric types, NaN and infinities are categorical. `Null` is not a
    /// value at all and never classifies a column.
    pub fn is_categorical(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Number(x) => !x.is_finite(),
            Value::Bool(_) | Value::Text(_) => true,
        }
    }
}

fn canonical_bits(x: f64) -> u64 {
    if x.is_nan() {
        f64::NAN.to_bits()
    } else if x == 0.0 {
        0
    } else {
        x.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Number(x) => canonical_bits(*x).hash(state),
            Value::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Number(f64::from(x))
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Number(f64::from(x))
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Number(x as f64)
    }
}

impl From<u32> for Value {
    fn from(x: u32) -> Self {
        Value::Number(f64::from(x))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Returns the positions of `row` holding categorical values, ascending.
pub fn classify_row(row: &[Value]) -> Vec<usize> {
    row.iter()
        .enumerate()
        .filter(|(_, v)| v.is_categorical())
        .map(|(i, _)| i)
        .collect()
}

/// Builds a [`Row`] from a list of heterogeneous literals.
///
/// ```
/// use streaming_onehot::{row, Value};
///
/// let r = row![1, 2.5, "a", true];
/// assert_eq!(r[2], Value::Text("a".into()));
/// ```
#[macro_export]
macro_rules! row {
    () => { ::std::vec::Vec::<$crate::Value>::new() };
    ($($x:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($x)),+]
    };
}
