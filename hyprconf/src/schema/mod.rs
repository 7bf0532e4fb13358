//! Schema tree: registration, colon flattening, locking and lookup.
//!
//! Paths such as `general:border_size` are split on `:` and stored as a
//! tree of categories, each indexing its members by name. A nested schema
//! `{"general": {"border_size": 1}}` produces the same tree, so both spellings
//! resolve to the same [`Entry`].
//!
//! The tree has two states. While open, entries may be registered; once
//! [`SchemaTree::lock`] runs, every registration fails with
//! [`SchemaError::AlreadyLocked`] and the tree only accepts assignments.

mod entry;
mod error;
mod json;

use indexmap::IndexMap;
use tracing::debug;

use crate::value::{ConfigValue, RawToken};

pub use entry::Entry;
pub use error::{AssignError, SchemaError};
pub use json::flatten_schema;
pub(crate) use json::insert_nested;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = ':';

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Lifecycle {
    #[default]
    Open,
    Locked,
}

#[derive(Clone, Debug, PartialEq)]
enum Member {
    Entry(Entry),
    Category(Category),
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Category {
    members: IndexMap<String, Member>,
}

impl Category {
    fn insert(
        &mut self,
        segments: &[&str],
        path: &str,
        default: ConfigValue,
    ) -> Result<(), SchemaError> {
        match segments {
            [] => Err(SchemaError::InvalidPath {
                path: path.to_owned(),
            }),
            [leaf] => match self.members.get(*leaf) {
                Some(Member::Entry(_)) => Err(SchemaError::DuplicateEntry {
                    path: path.to_owned(),
                }),
                Some(Member::Category(_)) => Err(SchemaError::PathConflict {
                    path: path.to_owned(),
                }),
                None => {
                    self.members
                        .insert((*leaf).to_owned(), Member::Entry(Entry::new(path, default)));
                    Ok(())
                }
            },
            [head, rest @ ..] => {
                let member = self
                    .members
                    .entry((*head).to_owned())
                    .or_insert_with(|| Member::Category(Self::default()));
                match member {
                    Member::Category(child) => child.insert(rest, path, default),
                    Member::Entry(_) => Err(SchemaError::PathConflict {
                        path: path.to_owned(),
                    }),
                }
            }
        }
    }

    fn category(&self, segments: &[&str]) -> Option<&Self> {
        segments
            .iter()
            .try_fold(self, |category, segment| match category.members.get(*segment) {
                Some(Member::Category(child)) => Some(child),
                _ => None,
            })
    }

    fn category_mut(&mut self, segments: &[&str]) -> Option<&mut Self> {
        segments
            .iter()
            .try_fold(self, |category, segment| {
                match category.members.get_mut(*segment) {
                    Some(Member::Category(child)) => Some(child),
                    _ => None,
                }
            })
    }

    fn remove(&mut self, segments: &[&str]) -> Option<Entry> {
        match segments {
            [] => None,
            [leaf] => {
                if !matches!(self.members.get(*leaf), Some(Member::Entry(_))) {
                    return None;
                }
                match self.members.shift_remove(*leaf) {
                    Some(Member::Entry(entry)) => Some(entry),
                    _ => None,
                }
            }
            [head, rest @ ..] => {
                let Some(Member::Category(child)) = self.members.get_mut(*head) else {
                    return None;
                };
                let removed = child.remove(rest)?;
                let emptied = child.members.is_empty();
                if emptied {
                    self.members.shift_remove(*head);
                }
                Some(removed)
            }
        }
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Entry>) {
        for member in self.members.values() {
            match member {
                Member::Entry(entry) => out.push(entry),
                Member::Category(child) => child.collect(out),
            }
        }
    }
}

/// Whether `segment` can be written in a source: not blank and without
/// surrounding whitespace, which the lexer strips.
pub(crate) fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.trim() == segment
}

/// Split `path` into its segments, rejecting blank or padded segments.
fn split_path(path: &str) -> Result<Vec<&str>, SchemaError> {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    if !segments.iter().all(|segment| is_valid_segment(segment)) {
        return Err(SchemaError::InvalidPath {
            path: path.to_owned(),
        });
    }
    Ok(segments)
}

/// Typed registry of configuration values.
///
/// # Examples
///
/// ```
/// use hyprconf::schema::SchemaTree;
/// use hyprconf::value::{ConfigValue, RawToken};
///
/// let mut tree = SchemaTree::new();
/// tree.register("general:border_size", ConfigValue::Int(1))?;
/// tree.lock();
/// tree.apply_assignment("general:border_size", &RawToken::new("3"))?;
/// assert_eq!(tree.lookup("general:border_size")?.value(), &ConfigValue::Int(3));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SchemaTree {
    root: Category,
    lifecycle: Lifecycle,
}

impl SchemaTree {
    /// Create an empty, open tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`SchemaTree::lock`] has been called.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Locked)
    }

    /// Register an entry whose kind and initial value come from `default`.
    ///
    /// Intermediate categories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::AlreadyLocked`] after [`SchemaTree::lock`],
    /// [`SchemaError::InvalidPath`] for empty segments,
    /// [`SchemaError::DuplicateEntry`] when the entry exists and
    /// [`SchemaError::PathConflict`] when a segment already names the other
    /// kind of member.
    pub fn register(&mut self, path: &str, default: ConfigValue) -> Result<(), SchemaError> {
        if self.is_locked() {
            return Err(SchemaError::AlreadyLocked {
                path: path.to_owned(),
            });
        }
        let segments = split_path(path)?;
        self.root.insert(&segments, path, default)
    }

    /// Lock the tree. Calling this more than once has no further effect.
    pub fn lock(&mut self) {
        if !self.is_locked() {
            self.lifecycle = Lifecycle::Locked;
            debug!(entries = self.entries().len(), "schema locked");
        }
    }

    /// Resolve `path` to its entry.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotFound`] when any segment is missing and
    /// [`SchemaError::InvalidPath`] for malformed paths.
    pub fn lookup(&self, path: &str) -> Result<&Entry, SchemaError> {
        let segments = split_path(path)?;
        let not_found = || SchemaError::NotFound {
            path: path.to_owned(),
        };
        let (leaf, parents) = segments.split_last().ok_or_else(not_found)?;
        match self.root.category(parents).and_then(|c| c.members.get(*leaf)) {
            Some(Member::Entry(entry)) => Ok(entry),
            _ => Err(not_found()),
        }
    }

    fn lookup_mut(&mut self, path: &str) -> Result<&mut Entry, SchemaError> {
        let segments = split_path(path)?;
        let not_found = || SchemaError::NotFound {
            path: path.to_owned(),
        };
        let (leaf, parents) = segments.split_last().ok_or_else(not_found)?;
        match self
            .root
            .category_mut(parents)
            .and_then(|c| c.members.get_mut(*leaf))
        {
            Some(Member::Entry(entry)) => Ok(entry),
            _ => Err(not_found()),
        }
    }

    /// Whether `path` names an entry.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_ok()
    }

    /// Whether `path` names a category, implicit or otherwise.
    #[must_use]
    pub fn has_category(&self, path: &str) -> bool {
        split_path(path).is_ok_and(|segments| self.root.category(&segments).is_some())
    }

    /// Whether `path` names any member, entry or category.
    #[must_use]
    pub fn is_occupied(&self, path: &str) -> bool {
        self.contains(path) || self.has_category(path)
    }

    /// Coerce `token` into the entry at `path` and commit it.
    ///
    /// # Errors
    ///
    /// Returns [`AssignError::Schema`] when the path does not resolve and
    /// [`AssignError::Coercion`] when the token does not fit; in both cases
    /// the tree is unchanged.
    pub fn apply_assignment(&mut self, path: &str, token: &RawToken) -> Result<(), AssignError> {
        let entry = self.lookup_mut(path)?;
        entry.assign(token)?;
        Ok(())
    }

    /// Remove the entry at `path`, pruning categories left empty.
    pub(crate) fn remove(&mut self, path: &str) -> Result<Entry, SchemaError> {
        let segments = split_path(path)?;
        self.root
            .remove(&segments)
            .ok_or_else(|| SchemaError::NotFound {
                path: path.to_owned(),
            })
    }

    /// Every entry in registration order.
    #[must_use]
    pub fn entries(&self) -> Vec<&Entry> {
        let mut out = Vec::new();
        self.root.collect(&mut out);
        out
    }
}
