//! One-shot helpers that parse a source into a nested tree.

use camino::Utf8Path;
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::engine::{LineEngine, SourceRef, TextEngine};
use crate::{Config, ConfigOptions, HyprconfError, ParseResultExt, infer_schema};

fn load(
    mut config: Config,
    text: &str,
    schema: Option<&JsonValue>,
) -> Result<JsonValue, HyprconfError> {
    match schema {
        Some(declared) => config.add_schema(declared)?,
        None => {
            for (path, default) in infer_schema(text) {
                config.add_value(&path, default)?;
            }
        }
    }
    config.commence();
    config.parse().into_strict()?;
    Ok(config.to_tree())
}

/// Parse configuration text into a nested tree.
///
/// Without `schema`, the schema is inferred from `text`.
///
/// # Errors
///
/// Returns [`HyprconfError::Schema`] for an unusable schema, and the parse
/// failures otherwise. With [`ConfigOptions::throw_all_errors`] every
/// failure is returned, in order.
///
/// # Examples
///
/// ```
/// use hyprconf::{ConfigOptions, parse_str};
///
/// let tree = parse_str("general {\n  gaps_in = 5.0\n}\n", None, ConfigOptions::default())?;
/// assert_eq!(tree, serde_json::json!({"general": {"gaps_in": 5.0}}));
/// # Ok::<_, hyprconf::HyprconfError>(())
/// ```
pub fn parse_str(
    text: &str,
    schema: Option<&JsonValue>,
    options: ConfigOptions,
) -> Result<JsonValue, HyprconfError> {
    let config = Config::new(
        text,
        ConfigOptions {
            path_is_stream: true,
            ..options
        },
    );
    load(config, text, schema)
}

/// Parse a configuration file into a nested tree.
///
/// Without `schema`, the schema is inferred from the file's own text;
/// included files are parsed but do not contribute to inference.
///
/// # Errors
///
/// As [`parse_str`], plus the failure to read the file unless
/// [`ConfigOptions::allow_missing_config`] tolerates its absence.
pub fn parse_path(
    path: &Utf8Path,
    schema: Option<&JsonValue>,
    options: ConfigOptions,
) -> Result<JsonValue, HyprconfError> {
    let text = if schema.is_some() {
        String::new()
    } else {
        match LineEngine::new().open(&SourceRef::Path(path.to_path_buf())) {
            Ok(handle) => handle.text().to_owned(),
            Err(err) if err.is_not_found() && options.allow_missing_config => {
                warn!(%err, "configuration file missing; inferring an empty schema");
                String::new()
            }
            Err(err) => return Err(err.into()),
        }
    };
    let config = Config::new(
        path.as_str(),
        ConfigOptions {
            path_is_stream: false,
            ..options
        },
    );
    load(config, &text, schema)
}
