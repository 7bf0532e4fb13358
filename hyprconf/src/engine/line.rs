//! Built-in line-oriented text engine.

use std::ops::ControlFlow;

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use tracing::{debug, warn};

use super::color::parse_color;
use super::source::{normalise_cycle_key, read_file, resolve_include};
use super::{
    Assignment, EventSink, Line, SourceError, SourceHandle, SourceLocation, SourceRef, TextEngine,
    lex_line, split_keyed_path, strip_comment,
};
use crate::value::RawToken;

const INCLUDE_KEYWORD: &str = "source";

#[derive(Debug)]
struct Block {
    name: String,
    key: Option<String>,
}

/// Reference implementation of [`TextEngine`] for hyprlang-style source.
///
/// Supports `#` comments (`##` for a literal `#`), `$VARIABLE` definitions
/// and substitution, `name { }` and `name[key] { }` blocks, flattened
/// `a:b = c` paths, colour literals and `source = path` includes.
///
/// Variables persist for the lifetime of the engine, so a value parsed with
/// [`crate::Config::parse_dynamic`] may refer to variables defined by an
/// earlier full parse.
///
/// # Examples
///
/// ```
/// use hyprconf::engine::{LineEngine, SourceRef, TextEngine};
///
/// let engine = LineEngine::new();
/// let handle = engine.open(&SourceRef::Stream("gaps = 5".into()))?;
/// assert_eq!(handle.text(), "gaps = 5");
/// # Ok::<_, hyprconf::engine::SourceError>(())
/// ```
#[derive(Debug, Default)]
pub struct LineEngine {
    root: Option<Utf8PathBuf>,
    variables: IndexMap<String, String>,
}

impl LineEngine {
    /// Create an engine without variables or root path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a defined variable.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Replace `$NAME` references with their values, longest name first so
    /// that `$GAPS_IN` is not consumed by `$GAPS`.
    fn substitute(&self, text: &str) -> String {
        if !text.contains('$') || self.variables.is_empty() {
            return text.to_owned();
        }
        let mut names: Vec<&String> = self.variables.keys().collect();
        names.sort_by_key(|name| std::cmp::Reverse(name.len()));
        let mut out = text.to_owned();
        for name in names {
            if let Some(value) = self.variables.get(name) {
                out = out.replace(&format!("${name}"), value);
            }
        }
        out
    }

    fn include_base(&self, handle: &SourceHandle) -> Utf8PathBuf {
        self.root
            .clone()
            .or_else(|| handle.directory().map(Utf8Path::to_path_buf))
            .unwrap_or_else(|| Utf8PathBuf::from("."))
    }

    fn scan_unit(
        &mut self,
        handle: &SourceHandle,
        sink: &mut dyn EventSink,
        chain: &mut Vec<Utf8PathBuf>,
    ) -> ControlFlow<()> {
        let mut blocks: Vec<Block> = Vec::new();
        let mut last_line = 0;
        for (index, raw) in handle.text().lines().enumerate() {
            last_line = index + 1;
            let location = SourceLocation::new(handle.origin(), last_line);
            let stripped = strip_comment(raw);
            match lex_line(&stripped) {
                Line::Blank => {}
                Line::Variable { name, value } => {
                    let resolved = self.substitute(value);
                    self.variables.insert(name.to_owned(), resolved);
                }
                Line::Open { name, key } => {
                    let path = join_path(&blocks, name);
                    if let Some(special) = key {
                        sink.on_special_key(&path, special, &location)?;
                    }
                    sink.on_category_enter(&path, &location)?;
                    blocks.push(Block {
                        name: name.to_owned(),
                        key: key.map(str::to_owned),
                    });
                }
                Line::Close => {
                    let path = blocks_path(&blocks);
                    if blocks.pop().is_none() {
                        sink.on_engine_error(SourceError::engine(
                            location,
                            "unexpected '}' without an open category",
                        ))?;
                    } else {
                        sink.on_category_exit(&path, &location)?;
                    }
                }
                Line::Assign { key, value } if key == INCLUDE_KEYWORD => {
                    self.include(handle, value, location, sink, chain)?;
                }
                Line::Assign { key, value } => {
                    let Some((relative, inline_key)) = split_keyed_path(key) else {
                        sink.on_engine_error(SourceError::engine(
                            location,
                            format!("malformed key '{key}'"),
                        ))?;
                        continue;
                    };
                    let text = self.substitute(value);
                    let mut token = RawToken::new(text.trim());
                    if let Some(color) = parse_color(&text) {
                        token = token.with_color(color);
                    }
                    sink.on_assignment(Assignment {
                        path: join_path(&blocks, &relative),
                        key: inline_key.or_else(|| innermost_key(&blocks)),
                        token,
                        location,
                    })?;
                }
                Line::Invalid(reason) => {
                    sink.on_engine_error(SourceError::engine(
                        location,
                        format!("invalid line '{}': {reason}", raw.trim()),
                    ))?;
                }
            }
        }
        if let Some(open) = blocks.last() {
            sink.on_engine_error(SourceError::engine(
                SourceLocation::new(handle.origin(), last_line),
                format!("missing '}}' for category '{}'", open.name),
            ))?;
        }
        ControlFlow::Continue(())
    }

    fn include(
        &mut self,
        handle: &SourceHandle,
        value: &str,
        location: SourceLocation,
        sink: &mut dyn EventSink,
        chain: &mut Vec<Utf8PathBuf>,
    ) -> ControlFlow<()> {
        let target = self.substitute(value);
        let path = resolve_include(&self.include_base(handle), target.trim());
        debug!(include = %path, from = %location, "resolving include");
        let included = match read_file(&path) {
            Ok(included) => included,
            Err(err) => {
                return sink.on_engine_error(SourceError::engine(
                    location,
                    format!("source= file {path} could not be included: {err}"),
                ));
            }
        };
        let canonical = included
            .canonical_path()
            .map_or_else(|| path.clone(), Utf8Path::to_path_buf);
        let cycle_key = normalise_cycle_key(&canonical);
        if chain.contains(&cycle_key) {
            let mut cycle: Vec<String> = chain.iter().map(ToString::to_string).collect();
            cycle.push(canonical.to_string());
            warn!(cycle = %cycle.join(" -> "), "rejecting cyclic include");
            return sink.on_engine_error(SourceError::engine(
                location,
                format!("cyclic source= detected: {}", cycle.join(" -> ")),
            ));
        }
        chain.push(cycle_key);
        let flow = self.scan_unit(&included, sink, chain);
        chain.pop();
        flow
    }
}

fn blocks_path(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|block| block.name.as_str())
        .collect::<Vec<_>>()
        .join(":")
}

fn join_path(blocks: &[Block], leaf: &str) -> String {
    if blocks.is_empty() {
        leaf.to_owned()
    } else {
        format!("{}:{leaf}", blocks_path(blocks))
    }
}

fn innermost_key(blocks: &[Block]) -> Option<String> {
    blocks.iter().rev().find_map(|block| block.key.clone())
}

impl TextEngine for LineEngine {
    fn open(&self, source: &SourceRef) -> Result<SourceHandle, SourceError> {
        match source {
            SourceRef::Stream(text) => Ok(SourceHandle::stream(text.clone())),
            SourceRef::Path(path) => read_file(path),
        }
    }

    fn scan(&mut self, handle: SourceHandle, sink: &mut dyn EventSink) -> ControlFlow<()> {
        let mut chain: Vec<Utf8PathBuf> = handle
            .canonical_path()
            .map(normalise_cycle_key)
            .into_iter()
            .collect();
        self.scan_unit(&handle, sink, &mut chain)
    }

    fn change_root_path(&mut self, root: &Utf8Path) {
        self.root = Some(root.to_path_buf());
    }
}
