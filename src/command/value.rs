//! Parameter values.

use std::fmt;

use serde::{Serialize, Serializer};

/// The value attached to a parameter letter.
///
/// A letter written on its own (`G28 X Y`) is a [`Value::Flag`]. A value
/// containing a decimal point is a [`Value::Float`], any other number is a
/// [`Value::Int`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Flag,
    Int(i64),
    Float(f64),
}

impl Value {
    /// Type a numeric literal the way the parser does.
    ///
    /// Integer literals too large for `i64` fall back to a float. Literals
    /// that only fit as an infinite float are rejected.
    pub(crate) fn from_literal(literal: &str) -> Option<Self> {
        if !literal.contains('.') {
            if let Ok(n) = literal.parse::<i64>() {
                return Some(Value::Int(n));
            }
        }
        literal
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .map(Value::Float)
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Value::Flag)
    }

    /// The value as an integer. Floats are only returned when they are whole.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(n) => Some(n),
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(n) => Some(n as f64),
            Value::Float(f) => Some(f),
            Value::Flag => None,
        }
    }
}

/// Canonical textual form of a number.
///
/// Floats always keep a decimal point so that the text reads back as a float.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Value::Flag => f.write_str("true"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => {
                let text = x.to_string();
                if x.is_finite() && !text.contains('.') {
                    write!(f, "{}.0", text)
                } else {
                    f.write_str(&text)
                }
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Value::Flag => serializer.serialize_bool(true),
            Value::Int(n) => serializer.serialize_i64(n),
            Value::Float(x) => serializer.serialize_f64(x),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

/// Only `true` is representable; it becomes [`Value::Flag`].
impl From<bool> for Value {
    fn from(_: bool) -> Self {
        Value::Flag
    }
}
