//! Schema inference for sources parsed without a host schema.
//!
//! Every assignment path gets the kind of the first token written to it.
//! Tokens are classified from their literal shape, before variable
//! substitution, so a value that starts with `$` is always text.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::engine::{Line, lex_line, parse_color, split_keyed_path, strip_comment};
use crate::schema::PATH_SEPARATOR;
use crate::value::{ConfigValue, RawToken, ValueKind, coerce};
use crate::value::{parse_bool_word, parse_float};

const INCLUDE_KEYWORD: &str = "source";

static COLOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^rgba?\s*\(.*\)$").ok());
static INTEGER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:0[xX][0-9a-fA-F]+|[0-9]+)$").ok());
static FLOAT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:[0-9]+\.[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").ok());

fn matches(pattern: &LazyLock<Option<Regex>>, token: &str) -> bool {
    pattern.as_ref().is_some_and(|regex| regex.is_match(token))
}

/// Classify a raw token into the default it implies.
///
/// Rules are tried in order: boolean word, colour literal, integer, float
/// with a decimal point, pair of numbers, text.
#[must_use]
pub fn classify_token(raw: &str) -> ConfigValue {
    let token = raw.trim();
    if token.starts_with('$') {
        return ConfigValue::from(token);
    }
    if let Some(flag) = parse_bool_word(token) {
        return ConfigValue::Int(flag);
    }
    if matches(&COLOR, token) {
        return ConfigValue::Int(parse_color(token).unwrap_or_default());
    }
    if matches(&INTEGER, token)
        && let Ok(value) = coerce(&RawToken::new(token), ValueKind::Int)
    {
        return value;
    }
    if matches(&FLOAT, token)
        && let Some(value) = parse_float(token)
    {
        return ConfigValue::Float(value);
    }
    let parts: Vec<&str> = token.split_whitespace().collect();
    if let [x, y] = parts.as_slice()
        && let (Some(first), Some(second)) = (parse_float(x), parse_float(y))
    {
        return ConfigValue::from((first, second));
    }
    ConfigValue::from(token)
}

/// Derive a schema from raw source text.
///
/// Paths are flattened from the enclosing blocks; `name[key]` blocks and
/// inline keys contribute only their name. Variable definitions and
/// `source =` includes are skipped, as are lines the engine would reject.
///
/// # Examples
///
/// ```
/// use hyprconf::infer_schema;
/// use hyprconf::value::ConfigValue;
///
/// let schema = infer_schema("general {\n  border_size = 3\n  layout = dwindle\n}\n");
/// assert_eq!(schema.get("general:border_size"), Some(&ConfigValue::Int(3)));
/// assert_eq!(schema.get("general:layout"), Some(&ConfigValue::from("dwindle")));
/// ```
#[must_use]
pub fn infer_schema(text: &str) -> IndexMap<String, ConfigValue> {
    let mut schema = IndexMap::new();
    let mut blocks: Vec<String> = Vec::new();
    for raw in text.lines() {
        let stripped = strip_comment(raw);
        match lex_line(&stripped) {
            Line::Open { name, .. } => blocks.push(name.to_owned()),
            Line::Close => {
                blocks.pop();
            }
            Line::Assign { key, value } if key != INCLUDE_KEYWORD => {
                let Some((relative, _)) = split_keyed_path(key) else {
                    continue;
                };
                let path = if blocks.is_empty() {
                    relative
                } else {
                    format!("{}{PATH_SEPARATOR}{relative}", blocks.join(":"))
                };
                schema
                    .entry(path)
                    .or_insert_with(|| classify_token(value));
            }
            Line::Assign { .. } | Line::Blank | Line::Variable { .. } | Line::Invalid(_) => {}
        }
    }
    schema
}
