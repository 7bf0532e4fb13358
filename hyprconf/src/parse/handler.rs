//! Keyword handlers: host callbacks for assignments that are not values.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::engine::SourceLocation;

/// Options for a registered keyword handler.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct HandlerOptions {
    /// Also match the keyword followed by ASCII letters, which are passed
    /// to the handler as flags (`bindle` for a `bind` handler).
    pub allow_flags: bool,
}

/// Arguments passed to a keyword handler.
#[derive(Clone, Copy, Debug)]
pub struct HandlerCall<'a> {
    /// Keyword the handler was registered for.
    pub keyword: &'a str,
    /// Letters following the keyword, empty without flags.
    pub flags: &'a str,
    /// Assigned value after variable substitution.
    pub value: &'a str,
    /// Where the assignment was written.
    pub location: &'a SourceLocation,
}

type Callback = Box<dyn FnMut(&HandlerCall<'_>) -> Result<(), String>>;

struct Handler {
    options: HandlerOptions,
    callback: Callback,
}

/// Registered handlers by keyword.
#[derive(Default)]
pub(crate) struct Handlers {
    handlers: IndexMap<String, Handler>,
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.handlers.keys()).finish()
    }
}

impl Handlers {
    pub(crate) fn register<F>(&mut self, keyword: &str, options: HandlerOptions, callback: F)
    where
        F: FnMut(&HandlerCall<'_>) -> Result<(), String> + 'static,
    {
        self.handlers.insert(
            keyword.to_owned(),
            Handler {
                options,
                callback: Box::new(callback),
            },
        );
    }

    pub(crate) fn unregister(&mut self, keyword: &str) -> bool {
        self.handlers.shift_remove(keyword).is_some()
    }

    /// Match `path` exactly, or as a flag-accepting keyword plus letters.
    /// The longest keyword wins.
    fn resolve<'p>(&self, path: &'p str) -> Option<(String, &'p str)> {
        if self.handlers.contains_key(path) {
            return Some((path.to_owned(), ""));
        }
        self.handlers
            .iter()
            .filter(|(_, handler)| handler.options.allow_flags)
            .filter_map(|(keyword, _)| {
                let flags = path.strip_prefix(keyword.as_str())?;
                let valid = !flags.is_empty() && flags.chars().all(|ch| ch.is_ascii_alphabetic());
                valid.then(|| (keyword.clone(), flags))
            })
            .max_by_key(|(keyword, _)| keyword.len())
    }

    /// Run the handler for `path`, or return `None` when none matches.
    pub(crate) fn dispatch(
        &mut self,
        path: &str,
        value: &str,
        location: &SourceLocation,
    ) -> Option<Result<(), String>> {
        let (keyword, flags) = self.resolve(path)?;
        let handler = self.handlers.get_mut(&keyword)?;
        let call = HandlerCall {
            keyword: &keyword,
            flags,
            value,
            location,
        };
        Some((handler.callback)(&call))
    }
}
