//! Template and instance types for special categories.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::schema::{Entry, SchemaError, SchemaTree};

/// How instances of a special category are identified.
///
/// # Examples
///
/// ```
/// use hyprconf::special::SpecialCategoryOptions;
///
/// let options: SpecialCategoryOptions =
///     serde_json::from_value(serde_json::json!({"key": "name"}))?;
/// assert_eq!(options.key.as_deref(), Some("name"));
/// assert!(options.keyed);
/// assert!(!options.ignore_missing);
///
/// let plugin: SpecialCategoryOptions =
///     serde_json::from_value(serde_json::json!({"keyed": false}))?;
/// assert!(plugin.is_static());
/// # Ok::<_, serde_json::Error>(())
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct SpecialCategoryOptions {
    /// Instances are told apart by a key. A category that is neither keyed,
    /// anonymous nor given a key entry is static: it has exactly one
    /// instance, addressed without a key.
    pub keyed: bool,
    /// Entry whose assignment names the instance, as in
    /// `device { name = mouse }`. Without it, instances are named by the
    /// `device[mouse] { }` syntax.
    pub key: Option<String>,
    /// Accept a parse that never opens this category.
    pub ignore_missing: bool,
    /// Name every block occurrence `"0"`, `"1"`, ... in discovery order.
    pub anonymous_key_based: bool,
}

impl Default for SpecialCategoryOptions {
    fn default() -> Self {
        Self {
            keyed: true,
            key: None,
            ignore_missing: false,
            anonymous_key_based: false,
        }
    }
}

impl SpecialCategoryOptions {
    /// Options for a static category such as `plugin { x = 5 }`.
    #[must_use]
    pub fn unkeyed() -> Self {
        Self {
            keyed: false,
            ..Self::default()
        }
    }

    /// Whether the category has a single keyless instance.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        !self.keyed && self.key.is_none() && !self.anonymous_key_based
    }

    /// Whether a parse must discover at least one instance.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        !self.ignore_missing && !self.anonymous_key_based && !self.is_static()
    }
}

/// One discovered occurrence of a special category.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    key: String,
    values: SchemaTree,
}

impl Instance {
    /// Key identifying this instance.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Look up an entry by its name inside the category.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotFound`] when the template has no such entry.
    pub fn get(&self, entry: &str) -> Result<&Entry, SchemaError> {
        self.values.lookup(entry)
    }

    /// Every entry of the instance, in template order.
    #[must_use]
    pub fn entries(&self) -> Vec<&Entry> {
        self.values.entries()
    }

    pub(super) const fn values_mut(&mut self) -> &mut SchemaTree {
        &mut self.values
    }

    pub(super) fn to_json(&self) -> Map<String, JsonValue> {
        self.values.to_tree()
    }
}

#[derive(Clone, Debug)]
pub(super) struct Template {
    pub(super) options: SpecialCategoryOptions,
    pub(super) entries: SchemaTree,
    pub(super) instances: IndexMap<String, Instance>,
    next_anonymous: usize,
}

impl Template {
    pub(super) fn new(options: SpecialCategoryOptions) -> Self {
        Self {
            options,
            entries: SchemaTree::new(),
            instances: IndexMap::new(),
            next_anonymous: 0,
        }
    }

    /// Return the instance for `key`, stamping it from the template on first
    /// sight. The flag reports whether it was created.
    pub(super) fn discover(&mut self, key: &str) -> (&mut Instance, bool) {
        let created = !self.instances.contains_key(key);
        let entries = &self.entries;
        let instance = self
            .instances
            .entry(key.to_owned())
            .or_insert_with(|| Instance {
                key: key.to_owned(),
                values: entries.clone(),
            });
        (instance, created)
    }

    pub(super) fn next_anonymous_key(&mut self) -> String {
        let key = self.next_anonymous.to_string();
        self.next_anonymous = self.next_anonymous.saturating_add(1);
        key
    }
}
