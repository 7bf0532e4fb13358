//! Line classification shared by the line engine and the type pre-scanner.

use std::borrow::Cow;

/// Shape of a single source line once comments are removed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Line<'a> {
    /// Nothing but whitespace.
    Blank,
    /// `$NAME = value`.
    Variable { name: &'a str, value: &'a str },
    /// `name {` or `name[key] {`.
    Open { name: &'a str, key: Option<&'a str> },
    /// `}`.
    Close,
    /// `key = value`.
    Assign { key: &'a str, value: &'a str },
    /// Anything else, with a short reason.
    Invalid(&'static str),
}

/// Remove a trailing `#` comment. `##` stands for a literal `#`.
pub(crate) fn strip_comment(raw: &str) -> Cow<'_, str> {
    if !raw.contains('#') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '#' {
            out.push(ch);
            continue;
        }
        if chars.peek() == Some(&'#') {
            chars.next();
            out.push('#');
        } else {
            break;
        }
    }
    Cow::Owned(out)
}

/// Classify a comment-free line.
pub(crate) fn lex_line(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed == "}" {
        return Line::Close;
    }
    if let Some(head) = trimmed.strip_suffix('{') {
        return lex_open(head.trim());
    }
    let Some((raw_key, raw_value)) = trimmed.split_once('=') else {
        return Line::Invalid("expected an assignment or a block");
    };
    let key = raw_key.trim();
    let value = raw_value.trim();
    if key.is_empty() {
        return Line::Invalid("assignment has an empty key");
    }
    if let Some(name) = key.strip_prefix('$') {
        if name.is_empty() {
            return Line::Invalid("variable has an empty name");
        }
        return Line::Variable { name, value };
    }
    Line::Assign { key, value }
}

fn lex_open(head: &str) -> Line<'_> {
    if head.is_empty() || head.contains('=') {
        return Line::Invalid("malformed block header");
    }
    match head.split_once('[') {
        None => Line::Open {
            name: head,
            key: None,
        },
        Some((name, rest)) => match rest.trim_end().strip_suffix(']') {
            Some(key) if !name.trim().is_empty() && !key.trim().is_empty() => Line::Open {
                name: name.trim(),
                key: Some(key.trim()),
            },
            _ => Line::Invalid("malformed special category key"),
        },
    }
}

/// Split an assignment key such as `device[mouse]:sensitivity` into the
/// bracket-free path and the innermost special key.
///
/// Returns `None` when a bracket is unbalanced or a segment is empty.
pub(crate) fn split_keyed_path(key: &str) -> Option<(String, Option<String>)> {
    let mut segments = Vec::new();
    let mut special = None;
    for raw_segment in key.split(':') {
        let segment = raw_segment.trim();
        let name = match segment.split_once('[') {
            None => segment,
            Some((name, rest)) => {
                let inner = rest.strip_suffix(']')?.trim();
                if inner.is_empty() {
                    return None;
                }
                special = Some(inner.to_owned());
                name.trim()
            }
        };
        if name.is_empty() || name.contains(']') {
            return None;
        }
        segments.push(name);
    }
    Some((segments.join(":"), special))
}
