//! Text normalisation for configuration snippets embedded in feature files.

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Turns a quoted single-line snippet such as `"a = 1\nb = 2"` into
/// configuration text, expanding each literal `\n` into a line break.
#[must_use]
pub fn config_text(value: &str) -> String {
    unquote(value).replace("\\n", "\n")
}

/// Splits a comma separated step argument into trimmed, unquoted items.
#[must_use]
pub fn list(value: &str) -> Vec<String> {
    unquote(value)
        .split(',')
        .map(|item| unquote(item).to_owned())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{config_text, list, unquote};

    #[test]
    fn unquote_removes_single_outer_quotes() {
        assert_eq!(unquote("'value'"), "value");
        assert_eq!(unquote("\"value\""), "value");
        assert_eq!(unquote("  bare "), "bare");
    }

    #[test]
    fn config_text_expands_escaped_newlines() {
        assert_eq!(config_text(r#""a = 1\nb = 2""#), "a = 1\nb = 2");
    }

    #[test]
    fn list_drops_empty_items() {
        assert_eq!(list("\"b, a,\""), vec!["b", "a"]);
        assert!(list("\"\"").is_empty());
    }
}
