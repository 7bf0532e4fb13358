//! A single typed configuration value and its provenance.

use crate::value::{CoercionError, ConfigValue, RawToken, ValueKind, coerce};

/// A registered value slot.
///
/// The declared kind is fixed at creation from the default value.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    name: String,
    kind: ValueKind,
    value: ConfigValue,
    set_by_user: bool,
}

impl Entry {
    pub(crate) fn new(name: impl Into<String>, default: ConfigValue) -> Self {
        Self {
            name: name.into(),
            kind: default.kind(),
            value: default,
            set_by_user: false,
        }
    }

    /// Flattened path of the entry, or the entry name inside a special
    /// category.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> &ConfigValue {
        &self.value
    }

    /// Whether the value came from an assignment rather than the default.
    #[must_use]
    pub const fn is_set_by_user(&self) -> bool {
        self.set_by_user
    }

    /// Coerce `token` into the declared kind and commit it.
    ///
    /// The entry is left untouched when coercion fails.
    pub(crate) fn assign(&mut self, token: &RawToken) -> Result<(), CoercionError> {
        self.value = coerce(token, self.kind)?;
        self.set_by_user = true;
        Ok(())
    }
}
