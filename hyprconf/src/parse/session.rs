//! Routing of text engine events into the schema, special categories and
//! keyword handlers.

use std::ops::ControlFlow;

use tracing::trace;

use super::handler::Handlers;
use super::{ParseError, ParseMode, ParseResult};
use crate::engine::{Assignment, EventSink, SourceError, SourceLocation};
use crate::schema::{AssignError, SchemaTree};
use crate::special::SpecialCategories;
use crate::value::RawToken;

/// State of an open special category block.
#[derive(Debug, Default)]
struct SpecialScope {
    key: Option<String>,
    key_entry: Option<String>,
    buffered: Vec<(String, Assignment)>,
    reported: bool,
}

#[derive(Debug)]
struct Scope {
    category: String,
    special: Option<SpecialScope>,
}

/// One parse invocation over borrowed configuration state.
pub(crate) struct Session<'a> {
    schema: &'a mut SchemaTree,
    specials: &'a mut SpecialCategories,
    handlers: &'a mut Handlers,
    mode: ParseMode,
    result: ParseResult,
    scopes: Vec<Scope>,
    pending_key: Option<(String, String)>,
}

impl<'a> Session<'a> {
    pub(crate) fn new(
        schema: &'a mut SchemaTree,
        specials: &'a mut SpecialCategories,
        handlers: &'a mut Handlers,
        mode: ParseMode,
    ) -> Self {
        Self {
            schema,
            specials,
            handlers,
            mode,
            result: ParseResult::default(),
            scopes: Vec::new(),
            pending_key: None,
        }
    }

    /// Record a failure. In single-error mode this stops the traversal.
    pub(crate) fn record(&mut self, error: ParseError) -> ControlFlow<()> {
        self.result.push(error);
        match self.mode {
            ParseMode::FirstError => ControlFlow::Break(()),
            ParseMode::CollectAll => ControlFlow::Continue(()),
        }
    }

    pub(crate) fn finish(self) -> ParseResult {
        self.result
    }

    fn open_special(
        &mut self,
        category: &str,
        bracket_key: Option<String>,
        location: &SourceLocation,
    ) -> ControlFlow<(), SpecialScope> {
        let Ok(options) = self.specials.options(category).cloned() else {
            return ControlFlow::Continue(SpecialScope::default());
        };
        let key = self
            .specials
            .static_key(category)
            .map(str::to_owned)
            .or(bracket_key)
            .or_else(|| {
                options
                    .anonymous_key_based
                    .then(|| self.specials.next_anonymous_key(category))
                    .flatten()
            });
        if let Some(found) = &key {
            self.specials.touch(category, found);
            if let Some(key_entry) = &options.key {
                self.name_instance(category, found, key_entry, location)?;
            }
        }
        let mut scope = SpecialScope {
            key,
            key_entry: options.key,
            ..SpecialScope::default()
        };
        if scope.key.is_none() && scope.key_entry.is_none() {
            scope.reported = true;
            self.record(ParseError::SpecialKeyMissing {
                location: location.clone(),
                category: category.to_owned(),
            })?;
        }
        ControlFlow::Continue(scope)
    }

    /// Store the key of a `category[key] { }` block in its key entry.
    fn name_instance(
        &mut self,
        category: &str,
        key: &str,
        key_entry: &str,
        location: &SourceLocation,
    ) -> ControlFlow<()> {
        let token = RawToken::new(key);
        match self
            .specials
            .apply_assignment(category, key, key_entry, &token)
        {
            Ok(()) => ControlFlow::Continue(()),
            Err(AssignError::Coercion(source)) => self.record(ParseError::Coercion {
                location: location.clone(),
                path: format!("{category}[{key}]:{key_entry}"),
                source,
            }),
            Err(AssignError::Schema(_)) => self.record(ParseError::UnknownKey {
                location: location.clone(),
                path: format!("{category}:{key_entry}"),
            }),
        }
    }

    fn assign_plain(&mut self, assignment: Assignment) -> ControlFlow<()> {
        match self.schema.apply_assignment(&assignment.path, &assignment.token) {
            Ok(()) => {
                trace!(path = %assignment.path, value = %assignment.token.text, "value assigned");
                ControlFlow::Continue(())
            }
            Err(AssignError::Coercion(source)) => self.record(ParseError::Coercion {
                location: assignment.location,
                path: assignment.path,
                source,
            }),
            Err(AssignError::Schema(_)) => self.record(ParseError::UnknownKey {
                location: assignment.location,
                path: assignment.path,
            }),
        }
    }

    fn apply_special(
        &mut self,
        category: &str,
        key: &str,
        entry: &str,
        assignment: Assignment,
    ) -> ControlFlow<()> {
        match self
            .specials
            .apply_assignment(category, key, entry, &assignment.token)
        {
            Ok(()) => {
                trace!(category, key, entry, value = %assignment.token.text, "special value assigned");
                ControlFlow::Continue(())
            }
            Err(AssignError::Coercion(source)) => self.record(ParseError::Coercion {
                location: assignment.location,
                path: format!("{category}[{key}]:{entry}"),
                source,
            }),
            Err(AssignError::Schema(_)) => self.record(ParseError::UnknownKey {
                location: assignment.location,
                path: assignment.path,
            }),
        }
    }

    /// Route an assignment to a special category, resolving its key from
    /// a static category, the assignment, the enclosing block or a key
    /// entry.
    fn assign_special(
        &mut self,
        category: &str,
        entry: String,
        assignment: Assignment,
    ) -> ControlFlow<()> {
        if let Some(key) = self.specials.static_key(category) {
            return self.apply_special(category, key, &entry, assignment);
        }
        if let Some(key) = assignment.key.clone() {
            self.specials.touch(category, &key);
            return self.apply_special(category, &key, &entry, assignment);
        }
        let scope = self
            .scopes
            .iter_mut()
            .rev()
            .filter(|scope| scope.category == category)
            .find_map(|scope| scope.special.as_mut());
        let Some(scope) = scope else {
            return self.record(ParseError::SpecialKeyMissing {
                location: assignment.location,
                category: category.to_owned(),
            });
        };
        if let Some(key) = scope.key.clone() {
            return self.apply_special(category, &key, &entry, assignment);
        }
        if scope.reported {
            return ControlFlow::Continue(());
        }
        if scope.key_entry.as_deref() != Some(entry.as_str()) {
            scope.buffered.push((entry, assignment));
            return ControlFlow::Continue(());
        }
        let key = assignment.token.text.trim().to_owned();
        scope.key = Some(key.clone());
        let buffered = std::mem::take(&mut scope.buffered);
        self.specials.touch(category, &key);
        self.apply_special(category, &key, &entry, assignment)?;
        for (pending_entry, pending) in buffered {
            self.apply_special(category, &key, &pending_entry, pending)?;
        }
        ControlFlow::Continue(())
    }
}

impl EventSink for Session<'_> {
    fn on_assignment(&mut self, assignment: Assignment) -> ControlFlow<()> {
        let claimed = self
            .specials
            .claims(&assignment.path)
            .map(|(category, entry)| (category.to_owned(), entry.to_owned()));
        if let Some((category, entry)) = claimed {
            return self.assign_special(&category, entry, assignment);
        }
        if self.schema.contains(&assignment.path) {
            return self.assign_plain(assignment);
        }
        let handled = self.handlers.dispatch(
            &assignment.path,
            &assignment.token.text,
            &assignment.location,
        );
        match handled {
            Some(Ok(())) => ControlFlow::Continue(()),
            Some(Err(message)) => self.record(ParseError::Handler {
                location: assignment.location,
                keyword: assignment.path,
                message,
            }),
            None => self.record(ParseError::UnknownKey {
                location: assignment.location,
                path: assignment.path,
            }),
        }
    }

    fn on_category_enter(&mut self, path: &str, location: &SourceLocation) -> ControlFlow<()> {
        let bracket_key = self
            .pending_key
            .take()
            .filter(|(category, _)| category == path)
            .map(|(_, key)| key);
        let special = if self.specials.is_declared(path) {
            Some(self.open_special(path, bracket_key, location)?)
        } else {
            None
        };
        self.scopes.push(Scope {
            category: path.to_owned(),
            special,
        });
        ControlFlow::Continue(())
    }

    fn on_category_exit(&mut self, _path: &str, location: &SourceLocation) -> ControlFlow<()> {
        let Some(scope) = self.scopes.pop() else {
            return ControlFlow::Continue(());
        };
        match scope.special {
            Some(special) if special.key.is_none() && !special.reported => {
                self.record(ParseError::SpecialKeyMissing {
                    location: location.clone(),
                    category: scope.category,
                })
            }
            _ => ControlFlow::Continue(()),
        }
    }

    fn on_special_key(
        &mut self,
        category: &str,
        key: &str,
        _location: &SourceLocation,
    ) -> ControlFlow<()> {
        self.pending_key = Some((category.to_owned(), key.to_owned()));
        ControlFlow::Continue(())
    }

    fn on_engine_error(&mut self, error: SourceError) -> ControlFlow<()> {
        self.record(ParseError::Source(error))
    }
}
