//! Conversion of raw assignment tokens into typed values.

use thiserror::Error;

use super::{ConfigValue, ValueKind, Vec2};

const TRUE_WORDS: [&str; 3] = ["true", "yes", "on"];
const FALSE_WORDS: [&str; 3] = ["false", "no", "off"];

/// Right-hand side of an assignment as delivered by the text engine.
///
/// Variable substitution has already been applied to `text`. When the engine
/// recognised a colour literal it attaches the packed ARGB value in `color`;
/// integer entries take that value unchanged while text entries keep the
/// literal.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawToken {
    /// Token text, trimmed of surrounding whitespace.
    pub text: String,
    /// Packed `0xAARRGGBB` colour pre-parsed by the engine.
    pub color: Option<i64>,
}

impl RawToken {
    /// Build a plain token without a pre-parsed colour.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    /// Attach a pre-parsed colour.
    #[must_use]
    pub const fn with_color(mut self, color: i64) -> Self {
        self.color = Some(color);
        self
    }
}

impl From<&str> for RawToken {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Failure to coerce a token into the declared kind of an entry.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum CoercionError {
    /// The token does not denote a value of the expected kind.
    #[error("invalid {expected} value '{got}'")]
    TypeMismatch {
        /// Kind declared by the target entry.
        expected: ValueKind,
        /// Offending token text.
        got: String,
    },
    /// The token has the wrong number of components.
    #[error("expected {expected} components but found {found}")]
    ArityMismatch {
        /// Number of components required.
        expected: usize,
        /// Number of components present.
        found: usize,
    },
}

/// Coerce `raw` into a value of `kind`.
///
/// There is no widening between kinds: a vector entry never accepts a lone
/// number and an integer entry never accepts a float.
///
/// # Errors
///
/// Returns [`CoercionError::TypeMismatch`] when the token cannot represent
/// the kind, or [`CoercionError::ArityMismatch`] when a vector token does not
/// have exactly two components.
///
/// # Examples
///
/// ```
/// use hyprconf::value::{ConfigValue, RawToken, ValueKind, coerce};
///
/// let value = coerce(&RawToken::new("yes"), ValueKind::Int)?;
/// assert_eq!(value, ConfigValue::Int(1));
/// # Ok::<_, hyprconf::value::CoercionError>(())
/// ```
pub fn coerce(raw: &RawToken, kind: ValueKind) -> Result<ConfigValue, CoercionError> {
    let text = raw.text.trim();
    match kind {
        ValueKind::Int => raw
            .color
            .or_else(|| parse_int(text))
            .map(ConfigValue::Int)
            .ok_or_else(|| mismatch(kind, text)),
        ValueKind::Float => parse_float(text)
            .map(ConfigValue::Float)
            .ok_or_else(|| mismatch(kind, text)),
        ValueKind::Text => Ok(ConfigValue::Text(text.to_owned())),
        ValueKind::Vec2 => parse_vec2(text).map(ConfigValue::Vec2),
    }
}

fn mismatch(expected: ValueKind, got: &str) -> CoercionError {
    CoercionError::TypeMismatch {
        expected,
        got: got.to_owned(),
    }
}

/// Recognise the boolean words accepted for integer entries.
pub(crate) fn parse_bool_word(text: &str) -> Option<i64> {
    if TRUE_WORDS.iter().any(|word| text.eq_ignore_ascii_case(word)) {
        Some(1)
    } else if FALSE_WORDS.iter().any(|word| text.eq_ignore_ascii_case(word)) {
        Some(0)
    } else {
        None
    }
}

fn parse_int(text: &str) -> Option<i64> {
    if let Some(word) = parse_bool_word(text) {
        return Some(word);
    }
    if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        let wide = u64::from_str_radix(digits, 16).ok()?;
        return i64::try_from(wide).ok();
    }
    text.parse::<i64>().ok()
}

/// Parse a decimal floating literal, rejecting `inf`, `nan` and friends.
pub(crate) fn parse_float(text: &str) -> Option<f64> {
    let plausible = !text.is_empty()
        && text.chars().any(|ch| ch.is_ascii_digit())
        && text
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E'));
    if !plausible {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_vec2(text: &str) -> Result<Vec2, CoercionError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [first, second] = parts.as_slice() else {
        return Err(CoercionError::ArityMismatch {
            expected: 2,
            found: parts.len(),
        });
    };
    match (parse_float(first), parse_float(second)) {
        (Some(x), Some(y)) => Ok(Vec2::new(x, y)),
        _ => Err(mismatch(ValueKind::Vec2, text)),
    }
}
