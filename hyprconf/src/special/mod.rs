//! Special categories: blocks that may appear many times, each occurrence
//! identified by a key.
//!
//! A category such as `device` is declared once with a template of entries.
//! Every `device[my-mouse] { ... }` block found while parsing stamps a new
//! [`Instance`] from that template, keyed by `my-mouse`. Instances persist
//! across parses until the category is removed.
//!
//! A static category (see [`SpecialCategoryOptions::is_static`]) owns one
//! instance, stamped when it is declared and read back with a `None` key.

mod template;

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::schema::{
    AssignError, Entry, PATH_SEPARATOR, SchemaError, SchemaTree, insert_nested, is_valid_segment,
};
use crate::value::{ConfigValue, RawToken};

pub use template::{Instance, SpecialCategoryOptions};
use template::Template;

/// Key under which the single instance of a static category is stored.
pub(crate) const STATIC_KEY: &str = "";

/// Registry of special category templates and their instances.
#[derive(Clone, Debug, Default)]
pub struct SpecialCategories {
    templates: IndexMap<String, Template>,
}

impl SpecialCategories {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn template(&self, category: &str) -> Result<&Template, SchemaError> {
        self.templates
            .get(category)
            .ok_or_else(|| SchemaError::UnknownSpecialCategory {
                category: category.to_owned(),
            })
    }

    fn template_mut(&mut self, category: &str) -> Result<&mut Template, SchemaError> {
        self.templates
            .get_mut(category)
            .ok_or_else(|| SchemaError::UnknownSpecialCategory {
                category: category.to_owned(),
            })
    }

    /// Declare a special category.
    ///
    /// With [`SpecialCategoryOptions::key`] set, the key entry is added to
    /// the template as an empty text value. A static category gets its only
    /// instance here.
    ///
    /// # Errors
    ///
    /// Fails with [`SchemaError::AlreadyLocked`] once `schema` is locked,
    /// [`SchemaError::CategoryConflict`] when `schema` already uses the name
    /// or one of its prefixes as a value, and
    /// [`SchemaError::DuplicateSpecialCategory`] for a repeated name.
    pub fn declare(
        &mut self,
        schema: &SchemaTree,
        category: &str,
        options: SpecialCategoryOptions,
    ) -> Result<(), SchemaError> {
        if schema.is_locked() {
            return Err(SchemaError::AlreadyLocked {
                path: category.to_owned(),
            });
        }
        if !category.split(PATH_SEPARATOR).all(is_valid_segment) {
            return Err(SchemaError::InvalidPath {
                path: category.to_owned(),
            });
        }
        if self.templates.contains_key(category) {
            return Err(SchemaError::DuplicateSpecialCategory {
                category: category.to_owned(),
            });
        }
        let collides = schema.is_occupied(category)
            || prefixes(category).any(|prefix| schema.contains(prefix))
            || self
                .templates
                .keys()
                .any(|name| is_nested(name, category) || is_nested(category, name));
        if collides {
            return Err(SchemaError::CategoryConflict {
                category: category.to_owned(),
            });
        }
        let mut template = Template::new(options);
        if let Some(key) = template.options.key.clone() {
            template.entries.register(&key, ConfigValue::from(""))?;
        }
        if template.options.is_static() {
            template.discover(STATIC_KEY);
        }
        self.templates.insert(category.to_owned(), template);
        Ok(())
    }

    /// Add an entry to the template of `category`.
    ///
    /// Existing instances are extended with the new default so that every
    /// instance keeps exactly the template's entries.
    ///
    /// # Errors
    ///
    /// Fails with [`SchemaError::AlreadyLocked`] once `schema` is locked,
    /// [`SchemaError::UnknownSpecialCategory`] for an undeclared category and
    /// the registration errors of [`SchemaTree::register`].
    pub fn add_entry(
        &mut self,
        schema: &SchemaTree,
        category: &str,
        entry: &str,
        default: ConfigValue,
    ) -> Result<(), SchemaError> {
        if schema.is_locked() {
            return Err(SchemaError::AlreadyLocked {
                path: format!("{category}{PATH_SEPARATOR}{entry}"),
            });
        }
        let template = self.template_mut(category)?;
        template.entries.register(entry, default.clone())?;
        for instance in template.instances.values_mut() {
            instance.values_mut().register(entry, default.clone())?;
        }
        Ok(())
    }

    /// Drop a category, its template and all of its instances.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSpecialCategory`] for an undeclared
    /// category.
    pub fn remove_category(&mut self, category: &str) -> Result<(), SchemaError> {
        self.templates
            .shift_remove(category)
            .map(|_| ())
            .ok_or_else(|| SchemaError::UnknownSpecialCategory {
                category: category.to_owned(),
            })
    }

    /// Drop an entry from the template and from every instance.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSpecialCategory`] or
    /// [`SchemaError::NoSuchEntry`].
    pub fn remove_entry(&mut self, category: &str, entry: &str) -> Result<(), SchemaError> {
        let template = self.template_mut(category)?;
        template
            .entries
            .remove(entry)
            .map_err(|_| SchemaError::NoSuchEntry {
                category: category.to_owned(),
                entry: entry.to_owned(),
            })?;
        for instance in template.instances.values_mut() {
            instance.values_mut().remove(entry)?;
        }
        Ok(())
    }

    /// Options the category was declared with.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSpecialCategory`] for an undeclared
    /// category.
    pub fn options(&self, category: &str) -> Result<&SpecialCategoryOptions, SchemaError> {
        self.template(category).map(|template| &template.options)
    }

    /// Whether `category` is declared.
    #[must_use]
    pub fn is_declared(&self, category: &str) -> bool {
        self.templates.contains_key(category)
    }

    /// Find the declared category that owns the flattened `path`.
    ///
    /// Returns the category name and the entry name inside it, preferring
    /// the longest matching category.
    #[must_use]
    pub fn claims<'p>(&self, path: &'p str) -> Option<(&str, &'p str)> {
        self.templates
            .keys()
            .filter_map(|name| {
                path.strip_prefix(name.as_str())
                    .and_then(|rest| rest.strip_prefix(PATH_SEPARATOR))
                    .map(|entry| (name.as_str(), entry))
            })
            .max_by_key(|(name, _)| name.len())
    }

    /// Whether registering a plain value at `path` would overlap a declared
    /// category.
    #[must_use]
    pub fn overlaps(&self, path: &str) -> bool {
        self.is_declared(path)
            || self.claims(path).is_some()
            || self.templates.keys().any(|name| is_nested(path, name))
    }

    /// Create the instance for `key` if it does not exist yet. Repeated
    /// discovery of a key keeps the values already assigned to it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSpecialCategory`] for an undeclared
    /// category.
    pub fn discover(&mut self, category: &str, key: &str) -> Result<(), SchemaError> {
        self.template(category)?;
        self.touch(category, key);
        Ok(())
    }

    /// Discover `key` in a category known to be declared; unknown categories
    /// are ignored.
    pub(crate) fn touch(&mut self, category: &str, key: &str) {
        if let Some(template) = self.templates.get_mut(category)
            && template.discover(key).1
        {
            debug!(category, key, "special category instance discovered");
        }
    }

    /// Key every block of `category` resolves to, when it is static.
    pub(crate) fn static_key(&self, category: &str) -> Option<&'static str> {
        self.templates
            .get(category)
            .filter(|template| template.options.is_static())
            .map(|_| STATIC_KEY)
    }

    /// Allocate the next key of an anonymous category.
    pub(crate) fn next_anonymous_key(&mut self, category: &str) -> Option<String> {
        self.templates
            .get_mut(category)
            .map(Template::next_anonymous_key)
    }

    /// Coerce `token` into `entry` of the instance for `key`, creating the
    /// instance on demand.
    ///
    /// # Errors
    ///
    /// Returns [`AssignError::Schema`] for an unknown category or entry and
    /// [`AssignError::Coercion`] when the token does not fit; the instance
    /// keeps its previous value in both cases.
    pub fn apply_assignment(
        &mut self,
        category: &str,
        key: &str,
        entry: &str,
        token: &RawToken,
    ) -> Result<(), AssignError> {
        let template = self.template_mut(category)?;
        if !template.entries.contains(entry) {
            return Err(SchemaError::NoSuchEntry {
                category: category.to_owned(),
                entry: entry.to_owned(),
            }
            .into());
        }
        let (instance, created) = template.discover(key);
        instance.values_mut().apply_assignment(entry, token)?;
        if created {
            debug!(category, key, "special category instance discovered");
        }
        Ok(())
    }

    /// Look up `entry` of the instance for `key`. Static categories are read
    /// with `None`.
    ///
    /// The category is checked first, then the template entry, then the
    /// key.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSpecialCategory`],
    /// [`SchemaError::NoSuchEntry`] or [`SchemaError::NoSuchKey`]. A `None`
    /// key on a keyed category, or a key on a static one, is a
    /// [`SchemaError::NoSuchKey`].
    pub fn get(
        &self,
        category: &str,
        entry: &str,
        key: Option<&str>,
    ) -> Result<&Entry, SchemaError> {
        let template = self.template(category)?;
        let no_entry = || SchemaError::NoSuchEntry {
            category: category.to_owned(),
            entry: entry.to_owned(),
        };
        if !template.entries.contains(entry) {
            return Err(no_entry());
        }
        let no_key = || SchemaError::NoSuchKey {
            category: category.to_owned(),
            key: key.unwrap_or_default().to_owned(),
        };
        let resolved = match (template.options.is_static(), key) {
            (true, None) => STATIC_KEY,
            (false, Some(named)) => named,
            _ => return Err(no_key()),
        };
        template
            .instances
            .get(resolved)
            .ok_or_else(no_key)?
            .get(entry)
            .map_err(|_| no_entry())
    }

    /// Instance for `key`, if discovered.
    #[must_use]
    pub fn instance(&self, category: &str, key: &str) -> Option<&Instance> {
        self.templates.get(category)?.instances.get(key)
    }

    /// Whether an instance exists for `key`.
    #[must_use]
    pub fn exists(&self, category: &str, key: &str) -> bool {
        self.instance(category, key).is_some()
    }

    /// Keys of `category` in discovery order. Unknown categories have none.
    #[must_use]
    pub fn list_keys(&self, category: &str) -> Vec<String> {
        self.templates
            .get(category)
            .map(|template| template.instances.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Required categories that have no instance.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&str> {
        self.templates
            .iter()
            .filter(|(_, template)| {
                template.options.is_required() && template.instances.is_empty()
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Export every instance as `{category: {key: {entry: value}}}`, merged
    /// into `target`. Static categories export as `{category: {entry:
    /// value}}`. Category names containing `:` are nested.
    pub(crate) fn export_into(&self, target: &mut Map<String, JsonValue>) {
        for (name, template) in &self.templates {
            if template.options.is_static() {
                let values = template
                    .instances
                    .get(STATIC_KEY)
                    .map(Instance::to_json)
                    .unwrap_or_default();
                insert_nested(target, name, JsonValue::Object(values));
                continue;
            }
            let instances: Map<String, JsonValue> = template
                .instances
                .iter()
                .map(|(key, instance)| (key.clone(), JsonValue::Object(instance.to_json())))
                .collect();
            insert_nested(target, name, JsonValue::Object(instances));
        }
    }
}

/// Whether `inner` lies strictly below `outer`.
fn is_nested(outer: &str, inner: &str) -> bool {
    inner
        .strip_prefix(outer)
        .is_some_and(|rest| rest.starts_with(PATH_SEPARATOR))
}

/// Proper prefixes of a colon path, shortest first: `a:b:c` yields `a`, `a:b`.
fn prefixes(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices(PATH_SEPARATOR)
        .filter_map(move |(index, _)| path.get(..index))
}
