//! Typed configuration values and the coercion rules between raw tokens and
//! those values.
//!
//! Only four kinds exist: [`ValueKind::Int`], [`ValueKind::Float`],
//! [`ValueKind::Text`] and [`ValueKind::Vec2`]. A value never changes kind
//! after creation; assignments are coerced into the kind declared by the
//! schema entry they target.

mod coerce;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub use coerce::{CoercionError, RawToken, coerce};
pub(crate) use coerce::{parse_bool_word, parse_float};

/// The closed set of kinds a configuration value may take.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Signed 64-bit integer. Booleans and colours are stored as integers.
    Int,
    /// 64-bit floating point number.
    Float,
    /// Free-form text; accepts any token verbatim.
    Text,
    /// Pair of floating point numbers.
    Vec2,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "string",
            Self::Vec2 => "vec2",
        };
        f.write_str(name)
    }
}

/// Two-component vector, as used for sizes and offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// First component.
    pub x: f64,
    /// Second component.
    pub y: f64,
}

impl Vec2 {
    /// Build a vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// A typed configuration value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Two-component vector value.
    Vec2(Vec2),
}

impl ConfigValue {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::Vec2(_) => ValueKind::Vec2,
        }
    }

    /// Returns the integer payload, if this is an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float payload, if this is a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text payload, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the vector payload, if this is a vector value.
    #[must_use]
    pub const fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Self::Vec2(value) => Some(*value),
            _ => None,
        }
    }

    /// Convert into the JSON representation used by tree exports.
    ///
    /// Vectors become two-element arrays. Floats are always finite because
    /// coercion rejects non-finite literals.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Int(value) => JsonValue::from(*value),
            Self::Float(value) => JsonValue::from(*value),
            Self::Text(value) => JsonValue::from(value.as_str()),
            Self::Vec2(value) => JsonValue::from(vec![value.x, value.y]),
        }
    }

    /// Classify a dynamic host value into a typed default.
    ///
    /// The mapping is total over the accepted shapes: integer numbers become
    /// [`ConfigValue::Int`], other numbers [`ConfigValue::Float`], strings
    /// [`ConfigValue::Text`], and two-element numeric arrays
    /// [`ConfigValue::Vec2`]. Every other shape is rejected with the name of
    /// the offending shape so callers can report it.
    ///
    /// # Errors
    ///
    /// Returns the JSON type name when the value has no matching kind.
    pub fn from_json(value: &JsonValue) -> Result<Self, &'static str> {
        match value {
            JsonValue::Number(number) => number
                .as_i64()
                .map(Self::Int)
                .or_else(|| number.as_f64().map(Self::Float))
                .ok_or("number"),
            JsonValue::String(text) => Ok(Self::Text(text.clone())),
            JsonValue::Array(items) => match items.as_slice() {
                [x, y] => match (x.as_f64(), y.as_f64()) {
                    (Some(first), Some(second)) => Ok(Self::Vec2(Vec2::new(first, second))),
                    _ => Err("array"),
                },
                _ => Err("array"),
            },
            JsonValue::Bool(_) => Err("bool"),
            JsonValue::Null => Err("null"),
            JsonValue::Object(_) => Err("object"),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Vec2(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec2> for ConfigValue {
    fn from(value: Vec2) -> Self {
        Self::Vec2(value)
    }
}

impl From<(f64, f64)> for ConfigValue {
    fn from((x, y): (f64, f64)) -> Self {
        Self::Vec2(Vec2::new(x, y))
    }
}

#[cfg(test)]
mod tests;
