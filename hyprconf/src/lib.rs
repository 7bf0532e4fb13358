//! Schema-driven configuration values for hyprlang-style sources.
//!
//! A host declares the shape of its configuration: typed values addressed
//! by colon paths such as `general:border_size`, and special categories
//! that repeat once per key, such as `device[my-mouse] { ... }`. Source text
//! is then tokenised by a [`engine::TextEngine`] and each assignment is
//! coerced into the declared kind. Problems in the source are collected in
//! a [`ParseResult`]; misuse of the schema API is a [`SchemaError`].
//!
//! Without a schema, [`infer_schema`] derives one from the literal shape of
//! the first value written to each path.
//!
//! ```
//! use hyprconf::{Config, ConfigOptions, SpecialCategoryOptions, value::ConfigValue};
//!
//! let text = "device[mouse] {\n  sensitivity = 0.5\n}\n";
//! let options = ConfigOptions { path_is_stream: true, ..ConfigOptions::default() };
//! let mut config = Config::new(text, options);
//! config.add_special_category("device", SpecialCategoryOptions::default())?;
//! config.add_special_value("device", "sensitivity", 0.0)?;
//! config.commence();
//! assert!(!config.parse()?.failed());
//! assert_eq!(
//!     config.get_special("device", "sensitivity", Some("mouse"))?,
//!     &ConfigValue::Float(0.5)
//! );
//! # Ok::<_, hyprconf::SchemaError>(())
//! ```

mod config;
pub mod engine;
mod error;
mod infer;
mod load;
pub mod parse;
mod result_ext;
pub mod schema;
pub mod special;
pub mod value;

pub use config::{Config, ConfigOptions};
pub use error::{AggregatedErrors, HyprconfError};
pub use infer::{classify_token, infer_schema};
pub use load::{parse_path, parse_str};
pub use parse::{HandlerCall, HandlerOptions, ParseError, ParseMode, ParseResult};
pub use result_ext::ParseResultExt;
pub use schema::{Entry, SchemaError, SchemaTree};
pub use special::SpecialCategoryOptions;
