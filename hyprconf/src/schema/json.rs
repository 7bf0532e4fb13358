//! Conversion between the schema tree and nested JSON objects.

use serde_json::{Map, Value as JsonValue};

use super::{Category, Member, PATH_SEPARATOR, SchemaError, SchemaTree};
use crate::value::ConfigValue;

/// Flatten a nested schema object into `(path, default)` pairs.
///
/// Objects introduce categories; every other value is a default classified
/// by [`ConfigValue::from_json`]. Keys may themselves contain `:`, so
/// `{"general:gaps": 1}` and `{"general": {"gaps": 1}}` are equivalent.
///
/// # Errors
///
/// Returns [`SchemaError::UnsupportedDefault`] for a leaf with no matching
/// kind, including a non-object schema root.
///
/// # Examples
///
/// ```
/// use hyprconf::schema::flatten_schema;
/// use hyprconf::value::ConfigValue;
///
/// let pairs = flatten_schema(&serde_json::json!({"general": {"gaps": 5}}))?;
/// assert_eq!(pairs, vec![("general:gaps".to_owned(), ConfigValue::Int(5))]);
/// # Ok::<_, hyprconf::schema::SchemaError>(())
/// ```
pub fn flatten_schema(schema: &JsonValue) -> Result<Vec<(String, ConfigValue)>, SchemaError> {
    let JsonValue::Object(root) = schema else {
        return Err(classify_failure("", schema));
    };
    let mut out = Vec::new();
    flatten_into(None, root, &mut out)?;
    Ok(out)
}

fn flatten_into(
    prefix: Option<&str>,
    object: &Map<String, JsonValue>,
    out: &mut Vec<(String, ConfigValue)>,
) -> Result<(), SchemaError> {
    for (name, value) in object {
        let path = prefix.map_or_else(|| name.clone(), |p| format!("{p}{PATH_SEPARATOR}{name}"));
        if let JsonValue::Object(child) = value {
            flatten_into(Some(&path), child, out)?;
            continue;
        }
        let default = ConfigValue::from_json(value).map_err(|found| {
            SchemaError::UnsupportedDefault {
                path: path.clone(),
                found,
            }
        })?;
        out.push((path, default));
    }
    Ok(())
}

fn classify_failure(path: &str, value: &JsonValue) -> SchemaError {
    let found = ConfigValue::from_json(value).map_or_else(|shape| shape, |_| "scalar");
    SchemaError::UnsupportedDefault {
        path: path.to_owned(),
        found,
    }
}

/// Insert `value` at the colon-separated `path`, creating objects on the way.
///
/// Existing non-object members along the path are left as they are.
pub(crate) fn insert_nested(target: &mut Map<String, JsonValue>, path: &str, value: JsonValue) {
    let mut segments = path.split(PATH_SEPARATOR);
    let Some(first) = segments.next() else {
        return;
    };
    let mut current = target;
    let mut name = first;
    for next in segments {
        let slot = current
            .entry(name.to_owned())
            .or_insert_with(|| JsonValue::Object(Map::new()));
        let JsonValue::Object(child) = slot else {
            return;
        };
        current = child;
        name = next;
    }
    current.insert(name.to_owned(), value);
}

impl Category {
    fn to_json(&self) -> Map<String, JsonValue> {
        self.members
            .iter()
            .map(|(name, member)| {
                let value = match member {
                    Member::Entry(entry) => entry.value().to_json(),
                    Member::Category(child) => JsonValue::Object(child.to_json()),
                };
                (name.clone(), value)
            })
            .collect()
    }
}

impl SchemaTree {
    /// Rebuild the nested view of every entry's current value.
    ///
    /// Categories become objects in registration order. Because a name can
    /// never be both a value and a category, the export is lossless.
    #[must_use]
    pub fn to_tree(&self) -> Map<String, JsonValue> {
        self.root.to_json()
    }
}
