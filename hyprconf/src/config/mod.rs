//! The configuration object hosts build, lock and parse.

mod options;

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::engine::{LineEngine, SourceRef, TextEngine};
use crate::parse::{
    HandlerCall, HandlerOptions, Handlers, ParseError, ParseMode, ParseResult, Session,
};
use crate::schema::{SchemaError, SchemaTree, flatten_schema};
use crate::special::{SpecialCategories, SpecialCategoryOptions};
use crate::value::ConfigValue;

pub use options::ConfigOptions;

/// Which pass a parse belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Pass {
    /// `parse` or `parse_file`: a complete source.
    Full,
    /// `parse_dynamic`: a single line on top of earlier parses.
    Dynamic,
}

/// A schema, its special categories and the source to populate them from.
///
/// Values and special categories are registered first. [`Config::commence`]
/// then locks the schema, after which the source can be parsed any number
/// of times.
///
/// # Examples
///
/// ```
/// use hyprconf::{Config, ConfigOptions, value::ConfigValue};
///
/// let options = ConfigOptions { path_is_stream: true, ..ConfigOptions::default() };
/// let mut config = Config::new("general {\n  border_size = 3\n}\n", options);
/// config.add_value("general:border_size", 1_i64)?;
/// config.commence();
/// assert!(!config.parse()?.failed());
/// assert_eq!(config.get("general:border_size")?, &ConfigValue::Int(3));
/// # Ok::<_, hyprconf::SchemaError>(())
/// ```
pub struct Config {
    schema: SchemaTree,
    specials: SpecialCategories,
    handlers: Handlers,
    engine: Box<dyn TextEngine>,
    options: ConfigOptions,
    source: SourceRef,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("schema", &self.schema)
            .field("specials", &self.specials)
            .field("handlers", &self.handlers)
            .field("options", &self.options)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Create a configuration reading `path_or_text` with the built-in
    /// [`LineEngine`].
    ///
    /// `path_or_text` is a file path unless
    /// [`ConfigOptions::path_is_stream`] is set.
    #[must_use]
    pub fn new(path_or_text: impl Into<String>, options: ConfigOptions) -> Self {
        let raw = path_or_text.into();
        let source = if options.path_is_stream {
            SourceRef::Stream(raw)
        } else {
            SourceRef::Path(Utf8PathBuf::from(raw))
        };
        Self {
            schema: SchemaTree::new(),
            specials: SpecialCategories::new(),
            handlers: Handlers::default(),
            engine: Box::new(LineEngine::new()),
            options,
            source,
        }
    }

    /// Replace the text engine.
    #[must_use]
    pub fn with_engine(mut self, engine: impl TextEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    /// Options the configuration was created with.
    #[must_use]
    pub const fn options(&self) -> &ConfigOptions {
        &self.options
    }

    /// The schema tree.
    #[must_use]
    pub const fn schema(&self) -> &SchemaTree {
        &self.schema
    }

    /// The special category registry.
    #[must_use]
    pub const fn specials(&self) -> &SpecialCategories {
        &self.specials
    }

    /// Register a value at a flattened path. Its kind follows the default.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::CategoryConflict`] when the path overlaps a
    /// special category, otherwise the errors of [`SchemaTree::register`].
    pub fn add_value(
        &mut self,
        path: &str,
        default: impl Into<ConfigValue>,
    ) -> Result<(), SchemaError> {
        if self.specials.overlaps(path) {
            return Err(SchemaError::CategoryConflict {
                category: path.to_owned(),
            });
        }
        self.schema.register(path, default.into())
    }

    /// Register every leaf of a nested schema object.
    ///
    /// Leaves are registered into a staged copy of the schema that replaces
    /// the live one only once every leaf is accepted, so any error leaves
    /// the configuration unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnsupportedDefault`] for leaves outside the
    /// four kinds, and the errors of [`Config::add_value`].
    pub fn add_schema(&mut self, schema: &JsonValue) -> Result<(), SchemaError> {
        let leaves = flatten_schema(schema)?;
        let mut staged = self.schema.clone();
        for (path, default) in leaves {
            if self.specials.overlaps(&path) {
                return Err(SchemaError::CategoryConflict { category: path });
            }
            staged.register(&path, default)?;
        }
        self.schema = staged;
        Ok(())
    }

    /// Lock the schema. Safe to call more than once.
    pub fn commence(&mut self) {
        self.schema.lock();
    }

    /// Parse the source given to [`Config::new`].
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotCommenced`] before [`Config::commence`].
    /// Problems in the source are reported in the [`ParseResult`].
    pub fn parse(&mut self) -> Result<ParseResult, SchemaError> {
        let source = self.source.clone();
        self.run(&source, Pass::Full)
    }

    /// Parse another file into the same configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotCommenced`] before [`Config::commence`].
    pub fn parse_file(&mut self, path: &Utf8Path) -> Result<ParseResult, SchemaError> {
        self.run(&SourceRef::Path(path.to_path_buf()), Pass::Full)
    }

    /// Parse a single line, such as `general:border_size = 4`, on top of
    /// the values already parsed.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotCommenced`] before [`Config::commence`].
    pub fn parse_dynamic(&mut self, line: &str) -> Result<ParseResult, SchemaError> {
        self.run(&SourceRef::Stream(line.to_owned()), Pass::Dynamic)
    }

    /// Equivalent to `parse_dynamic("{command} = {value}")`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotCommenced`] before [`Config::commence`].
    pub fn parse_dynamic_kv(
        &mut self,
        command: &str,
        value: &str,
    ) -> Result<ParseResult, SchemaError> {
        self.parse_dynamic(&format!("{command} = {value}"))
    }

    fn run(&mut self, source: &SourceRef, pass: Pass) -> Result<ParseResult, SchemaError> {
        if !self.schema.is_locked() {
            return Err(SchemaError::NotCommenced);
        }
        let mode = self.options.mode();
        debug!(?source, ?pass, ?mode, "parse started");
        let mut session = Session::new(
            &mut self.schema,
            &mut self.specials,
            &mut self.handlers,
            mode,
        );
        match self.engine.open(source) {
            Ok(handle) => {
                let _flow = self.engine.scan(handle, &mut session);
            }
            Err(err) if err.is_not_found() && self.options.allow_missing_config => {
                warn!(%err, "configuration file missing; continuing with defaults");
            }
            Err(err) => {
                let _flow = session.record(ParseError::Source(err));
            }
        }
        let mut result = session.finish();
        let stopped = mode == ParseMode::FirstError && result.failed();
        if pass == Pass::Full && !self.options.verify_only && !stopped {
            for category in self.specials.missing_required() {
                result.push(ParseError::MissingRequired {
                    category: category.to_owned(),
                });
                if mode == ParseMode::FirstError {
                    break;
                }
            }
        }
        debug!(errors = result.errors().len(), "parse finished");
        Ok(result)
    }

    /// Current value at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotFound`] for an unregistered path.
    pub fn get(&self, path: &str) -> Result<&ConfigValue, SchemaError> {
        self.schema.lookup(path).map(|entry| entry.value())
    }

    /// Current value at `path` and whether it was assigned by the source.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotFound`] for an unregistered path.
    pub fn get_with_meta(&self, path: &str) -> Result<(&ConfigValue, bool), SchemaError> {
        self.schema
            .lookup(path)
            .map(|entry| (entry.value(), entry.is_set_by_user()))
    }

    /// Current value at `path`, or `default` when it is not registered.
    #[must_use]
    pub fn get_or(&self, path: &str, default: impl Into<ConfigValue>) -> ConfigValue {
        self.get(path)
            .map_or_else(|_| default.into(), ConfigValue::clone)
    }

    /// Whether `path` is a registered value.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.schema.contains(path)
    }

    /// Declare a special category.
    ///
    /// # Errors
    ///
    /// See [`SpecialCategories::declare`].
    pub fn add_special_category(
        &mut self,
        name: &str,
        options: SpecialCategoryOptions,
    ) -> Result<(), SchemaError> {
        self.specials.declare(&self.schema, name, options)
    }

    /// Add a value to a special category template.
    ///
    /// # Errors
    ///
    /// See [`SpecialCategories::add_entry`].
    pub fn add_special_value(
        &mut self,
        category: &str,
        entry: &str,
        default: impl Into<ConfigValue>,
    ) -> Result<(), SchemaError> {
        self.specials
            .add_entry(&self.schema, category, entry, default.into())
    }

    /// Remove a special category and its instances.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSpecialCategory`].
    pub fn remove_special_category(&mut self, name: &str) -> Result<(), SchemaError> {
        self.specials.remove_category(name)
    }

    /// Remove a value from a special category template and its instances.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSpecialCategory`] or
    /// [`SchemaError::NoSuchEntry`].
    pub fn remove_special_value(&mut self, category: &str, entry: &str) -> Result<(), SchemaError> {
        self.specials.remove_entry(category, entry)
    }

    /// Value of `entry` in the instance of `category` named `key`. Static
    /// categories are read with a `None` key.
    ///
    /// # Errors
    ///
    /// See [`SpecialCategories::get`].
    pub fn get_special(
        &self,
        category: &str,
        entry: &str,
        key: Option<&str>,
    ) -> Result<&ConfigValue, SchemaError> {
        self.specials
            .get(category, entry, key)
            .map(|found| found.value())
    }

    /// Like [`Config::get_special`], with the set-by-user flag.
    ///
    /// # Errors
    ///
    /// See [`SpecialCategories::get`].
    pub fn get_special_with_meta(
        &self,
        category: &str,
        entry: &str,
        key: Option<&str>,
    ) -> Result<(&ConfigValue, bool), SchemaError> {
        self.specials
            .get(category, entry, key)
            .map(|found| (found.value(), found.is_set_by_user()))
    }

    /// Whether `category` has an instance named `key`.
    #[must_use]
    pub fn special_category_exists(&self, category: &str, key: &str) -> bool {
        self.specials.exists(category, key)
    }

    /// Keys of `category` in discovery order.
    #[must_use]
    pub fn list_keys_for_special_category(&self, category: &str) -> Vec<String> {
        self.specials.list_keys(category)
    }

    /// Route assignments to `keyword` (and, with
    /// [`HandlerOptions::allow_flags`], `keyword` plus letters) to
    /// `handler`. A later registration for the same keyword replaces the
    /// earlier one.
    pub fn register_handler<F>(&mut self, keyword: &str, options: HandlerOptions, handler: F)
    where
        F: FnMut(&HandlerCall<'_>) -> Result<(), String> + 'static,
    {
        self.handlers.register(keyword, options, handler);
    }

    /// Remove the handler for `keyword`, reporting whether one existed.
    pub fn unregister_handler(&mut self, keyword: &str) -> bool {
        self.handlers.unregister(keyword)
    }

    /// Resolve relative `source =` includes against `root` from now on.
    pub fn change_root_path(&mut self, root: &Utf8Path) {
        self.engine.change_root_path(root);
    }

    /// Nested view of every value, with special categories exported as
    /// `{category: {key: {entry: value}}}`.
    #[must_use]
    pub fn to_tree(&self) -> JsonValue {
        let mut tree = self.schema.to_tree();
        self.specials.export_into(&mut tree);
        JsonValue::Object(tree)
    }
}
