//! Test helpers shared across crates in the hyprconf workspace.
//!
//! [`figment`] wraps `figment::Jail` so configuration files can be written
//! into a throwaway directory, and [`text`] normalises configuration text
//! captured from behavioural feature files.

pub mod figment;
pub mod text;
